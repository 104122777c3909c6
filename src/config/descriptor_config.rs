use crate::utils::error::{PublishError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PUBLICATION_NAME: &str = "release";
pub const DEFAULT_GROUP_ID: &str = "com.paymenttools";
pub const DEFAULT_ARTIFACT_ID: &str = "paymenttoolssdk";
pub const DEFAULT_VERSION: &str = "1.0.13";
pub const DEFAULT_ARTIFACT_PATH: &str = "source/paymenttools-sdk-release.aar";
pub const DEFAULT_REPOSITORY_NAME: &str = "GithubPackages";
pub const DEFAULT_REPOSITORY_URL: &str =
    "https://maven.pkg.github.com/paymenttools/wlp-android-distribution";
pub const DEFAULT_PROPERTIES_FILE: &str = "github.properties";
pub const DEFAULT_USERNAME_KEY: &str = "gpr.usr";
pub const DEFAULT_PASSWORD_KEY: &str = "gpr.key";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Everything needed to assemble one publish run.
///
/// `Default` reproduces the release publication of the Android SDK; a TOML
/// descriptor may override any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Root against which relative paths are resolved. Never read from TOML.
    #[serde(skip)]
    pub project_root: PathBuf,
    pub publication: PublicationConfig,
    pub repository: RepositoryConfig,
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationConfig {
    pub name: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub artifact: String,
    pub classifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub name: String,
    pub url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub properties_file: String,
    pub username_key: String,
    pub password_key: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            publication: PublicationConfig::default(),
            repository: RepositoryConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PUBLICATION_NAME.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            artifact_id: DEFAULT_ARTIFACT_ID.to_string(),
            version: DEFAULT_VERSION.to_string(),
            artifact: DEFAULT_ARTIFACT_PATH.to_string(),
            classifier: None,
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_REPOSITORY_NAME.to_string(),
            url: DEFAULT_REPOSITORY_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            properties_file: DEFAULT_PROPERTIES_FILE.to_string(),
            username_key: DEFAULT_USERNAME_KEY.to_string(),
            password_key: DEFAULT_PASSWORD_KEY.to_string(),
        }
    }
}

impl PublishConfig {
    pub fn with_project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = project_root.into();
        self
    }

    /// 從 TOML 描述檔載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PublishError::config(format!(
                "cannot read descriptor {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| PublishError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${GPR_VERSION})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn properties_path(&self) -> PathBuf {
        self.project_root.join(&self.credentials.properties_file)
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.project_root.join(&self.publication.artifact)
    }
}

impl Validate for PublishConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("publication.name", &self.publication.name)?;
        validation::validate_coordinate("publication.group_id", &self.publication.group_id)?;
        validation::validate_coordinate("publication.artifact_id", &self.publication.artifact_id)?;
        validation::validate_coordinate("publication.version", &self.publication.version)?;
        // 只支援正式版發佈，snapshot 需要時間戳記路徑與版本層級 metadata
        if self.publication.version.ends_with("-SNAPSHOT") {
            return Err(PublishError::config(format!(
                "publication.version '{}' is a snapshot; only release versions can be published",
                self.publication.version
            )));
        }
        if let Some(classifier) = &self.publication.classifier {
            validation::validate_coordinate("publication.classifier", classifier)?;
        }
        validation::validate_path("publication.artifact", &self.publication.artifact)?;
        validation::validate_non_empty_string("repository.name", &self.repository.name)?;
        validation::validate_url("repository.url", &self.repository.url)?;
        if self.repository.timeout_seconds == 0 {
            return Err(PublishError::config(
                "repository.timeout_seconds must be at least 1",
            ));
        }
        validation::validate_path("credentials.properties_file", &self.credentials.properties_file)?;
        validation::validate_non_empty_string("credentials.username_key", &self.credentials.username_key)?;
        validation::validate_non_empty_string("credentials.password_key", &self.credentials.password_key)?;
        Ok(())
    }
}

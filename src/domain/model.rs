use crate::utils::error::{PublishError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Registry credentials. The password never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationIdentity {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl fmt::Display for PublicationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    pub path: PathBuf,
    pub extension: String,
    pub classifier: Option<String>,
}

impl ArtifactReference {
    /// 副檔名取自檔案路徑，沒有副檔名時視為 aar
    pub fn new(path: impl Into<PathBuf>, classifier: Option<String>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("aar")
            .to_string();
        Self {
            path,
            extension,
            classifier,
        }
    }

    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(self.not_found()),
            Err(e) => Err(PublishError::Io(e)),
        }
    }

    fn not_found(&self) -> PublishError {
        PublishError::ArtifactNotFound {
            path: display_path(&self.path),
        }
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub name: String,
    pub identity: PublicationIdentity,
    pub artifact: ArtifactReference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryTarget {
    pub name: String,
    pub url: String,
    pub credentials: Credentials,
}

/// URLs written to the registry, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReceipt {
    pub uploaded: Vec<String>,
}

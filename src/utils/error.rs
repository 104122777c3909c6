use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: String },

    #[error("Registry rejected credentials (HTTP {status}) for {url}")]
    Authentication { status: u16, url: String },

    #[error("Version {version} already exists at {url} (HTTP {status})")]
    PublishConflict {
        version: String,
        status: u16,
        url: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Registry returned HTTP {status} for {url}")]
    Registry { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Artifact,
    Authentication,
    Conflict,
    Network,
    Registry,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 可重試的錯誤 (網路)
    Medium,
    /// 需要人工修正的錯誤
    High,
    /// 非預期的系統錯誤
    Critical,
}

impl PublishError {
    pub fn config(message: impl Into<String>) -> Self {
        PublishError::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PublishError::ConfigurationError { .. } => ErrorCategory::Configuration,
            PublishError::ArtifactNotFound { .. } => ErrorCategory::Artifact,
            PublishError::Authentication { .. } => ErrorCategory::Authentication,
            PublishError::PublishConflict { .. } => ErrorCategory::Conflict,
            PublishError::Network(_) => ErrorCategory::Network,
            PublishError::Registry { .. } => ErrorCategory::Registry,
            PublishError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Registry | ErrorCategory::System => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼，永遠不為 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PublishError::ConfigurationError { .. } => {
                "Create or fix github.properties with non-empty gpr.usr and gpr.key entries"
            }
            PublishError::ArtifactNotFound { .. } => {
                "Rebuild the release AAR so it exists at the declared path"
            }
            PublishError::Authentication { .. } => {
                "Check the username and token in github.properties and the token's write:packages scope"
            }
            PublishError::PublishConflict { .. } => {
                "Bump the publication version before publishing again"
            }
            PublishError::Network(_) => "Check connectivity to the registry and re-run",
            PublishError::Registry { .. } => {
                "Inspect the registry response with --verbose and re-run"
            }
            PublishError::Io(_) => "Check file permissions in the project directory",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PublishError::ConfigurationError { message } => {
                format!("Invalid publish configuration: {}", message)
            }
            PublishError::ArtifactNotFound { path } => {
                format!("The artifact to publish does not exist: {}", path)
            }
            PublishError::Authentication { status, .. } => {
                format!("The registry rejected the credentials (HTTP {})", status)
            }
            PublishError::PublishConflict { version, .. } => {
                format!("Version {} has already been published", version)
            }
            PublishError::Network(e) => format!("Could not reach the registry: {}", e),
            PublishError::Registry { status, url } => {
                format!("Upload to {} failed with HTTP {}", url, status)
            }
            PublishError::Io(e) => format!("File system error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, PublishError>;

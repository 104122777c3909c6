pub mod descriptor_config;
pub mod properties;

pub use descriptor_config::PublishConfig;

use crate::utils::error::Result;
use std::path::PathBuf;

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "gpr-publish"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Publish the prebuilt Android SDK archive to a Maven package registry")
)]
pub struct CliConfig {
    /// Project root holding github.properties and the artifact
    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub project_dir: PathBuf,

    /// Optional TOML descriptor overriding the release publication
    #[cfg_attr(feature = "cli", arg(long))]
    pub descriptor: Option<PathBuf>,

    /// Publish under this version instead of the configured one
    #[cfg_attr(feature = "cli", arg(long))]
    pub version_override: Option<String>,

    /// Upload to this repository URL instead of the configured one
    #[cfg_attr(feature = "cli", arg(long))]
    pub repository_url: Option<String>,

    /// Assemble and validate everything, but send nothing
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub json_logs: bool,
}

impl CliConfig {
    /// 合併描述檔與命令列覆蓋設定
    pub fn to_publish_config(&self) -> Result<PublishConfig> {
        let mut config = match &self.descriptor {
            Some(path) => {
                tracing::info!("📁 Loading descriptor from: {}", path.display());
                PublishConfig::from_file(path)?
            }
            None => PublishConfig::default(),
        };

        if let Some(version) = &self.version_override {
            tracing::info!("🔧 Version overridden to: {}", version);
            config.publication.version = version.clone();
        }

        if let Some(url) = &self.repository_url {
            tracing::info!("🔧 Repository URL overridden to: {}", url);
            config.repository.url = url.clone();
        }

        Ok(config.with_project_root(&self.project_dir))
    }
}

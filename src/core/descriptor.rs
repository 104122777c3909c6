use crate::config::properties::load_credentials;
use crate::config::PublishConfig;
use crate::domain::model::{
    ArtifactReference, Credentials, Publication, PublicationIdentity, RegistryTarget,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use std::time::Duration;

/// One publication and the registry it goes to, ready to hand to a publisher.
#[derive(Debug, Clone)]
pub struct PublishDescriptor {
    pub publication: Publication,
    pub target: RegistryTarget,
    pub timeout: Duration,
}

impl PublishDescriptor {
    /// Validates `config`, loads the credentials and declares the publication
    /// and its target. Fails before anything is sent when the credentials are
    /// missing.
    pub fn assemble(config: PublishConfig) -> Result<Self> {
        config.validate()?;

        let credentials = Self::load_credentials(&config)?;
        let publication = Self::declare_publication(&config);
        let target = Self::declare_target(&config, credentials)?;

        Ok(Self {
            publication,
            target,
            timeout: Duration::from_secs(config.repository.timeout_seconds),
        })
    }

    pub fn load_credentials(config: &PublishConfig) -> Result<Credentials> {
        let path = config.properties_path();
        tracing::debug!("Reading credentials from {}", path.display());
        load_credentials(
            &path,
            &config.credentials.username_key,
            &config.credentials.password_key,
        )
    }

    /// 產物是否存在留到發佈前才檢查
    pub fn declare_publication(config: &PublishConfig) -> Publication {
        Publication {
            name: config.publication.name.clone(),
            identity: PublicationIdentity {
                group_id: config.publication.group_id.clone(),
                artifact_id: config.publication.artifact_id.clone(),
                version: config.publication.version.clone(),
            },
            artifact: ArtifactReference::new(
                config.artifact_path(),
                config.publication.classifier.clone(),
            ),
        }
    }

    pub fn declare_target(config: &PublishConfig, credentials: Credentials) -> Result<RegistryTarget> {
        validate_url("repository.url", &config.repository.url)?;
        Ok(RegistryTarget {
            name: config.repository.name.clone(),
            url: config.repository.url.clone(),
            credentials,
        })
    }
}

use crate::domain::model::{Publication, PublishReceipt, RegistryTarget};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The package-registry client that uploads a publication.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        publication: &Publication,
        target: &RegistryTarget,
    ) -> Result<PublishReceipt>;
}

pub mod checksum;
pub mod descriptor;
pub mod engine;
pub mod layout;
pub mod maven_publisher;
pub mod metadata;
pub mod pom;

pub use crate::domain::model::{
    ArtifactReference, Credentials, Publication, PublicationIdentity, PublishReceipt,
    RegistryTarget,
};
pub use crate::domain::ports::Publisher;
pub use crate::utils::error::Result;

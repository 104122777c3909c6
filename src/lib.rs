pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{CliConfig, PublishConfig};
pub use crate::core::{
    descriptor::PublishDescriptor,
    engine::{PublishEngine, PublishOutcome},
    maven_publisher::MavenPublisher,
};
pub use crate::utils::error::{PublishError, Result};

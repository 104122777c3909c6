use crate::core::descriptor::PublishDescriptor;
use crate::core::layout::MavenLayout;
use crate::domain::model::PublishReceipt;
use crate::domain::ports::Publisher;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published(PublishReceipt),
    /// URLs that would have been uploaded.
    DryRun { planned: Vec<String> },
}

pub struct PublishEngine<P: Publisher> {
    publisher: P,
    dry_run: bool,
}

impl<P: Publisher> PublishEngine<P> {
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, descriptor: &PublishDescriptor) -> Result<PublishOutcome> {
        let publication = &descriptor.publication;
        let target = &descriptor.target;

        tracing::info!(
            "🚀 Publishing '{}' {} to {} ({})",
            publication.name,
            publication.identity,
            target.name,
            target.url
        );

        // 沒有產物就不發送任何請求
        publication.artifact.ensure_exists()?;

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - nothing will be uploaded");
            let planned = MavenLayout::new(&target.url).planned_uploads(publication);
            for url in &planned {
                tracing::info!("  would upload {}", url);
            }
            return Ok(PublishOutcome::DryRun { planned });
        }

        let receipt = self.publisher.publish(publication, target).await?;
        Ok(PublishOutcome::Published(receipt))
    }
}

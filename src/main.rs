use clap::Parser;
use gpr_publish::utils::logger;
use gpr_publish::{
    CliConfig, MavenPublisher, PublishDescriptor, PublishEngine, PublishError, PublishOutcome,
};

async fn run(cli: &CliConfig) -> Result<PublishOutcome, PublishError> {
    let config = cli.to_publish_config()?;
    let descriptor = PublishDescriptor::assemble(config)?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let publisher = MavenPublisher::new(descriptor.timeout)?;
    let engine = PublishEngine::new(publisher).with_dry_run(cli.dry_run);
    engine.run(&descriptor).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gpr-publish");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli).await {
        Ok(PublishOutcome::Published(receipt)) => {
            tracing::info!("✅ Publish completed, {} files uploaded", receipt.uploaded.len());
            println!("✅ Publish completed successfully!");
        }
        Ok(PublishOutcome::DryRun { planned }) => {
            println!("🔍 Dry run: {} files would be uploaded", planned.len());
        }
        Err(e) => {
            tracing::error!(
                "❌ Publish failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

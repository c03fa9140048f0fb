use clap::Parser;
use yatri_ingest::utils::{logger, validation::Validate};
use yatri_ingest::{CliConfig, ConfigProvider, IngestError, RestStore, UploadOrchestrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting yatri-ingest");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let bytes = std::fs::read(&config.file)?;

    let store = RestStore::from_config(&config);
    let orchestrator = UploadOrchestrator::new(store)
        .with_max_upload_bytes(config.max_upload_bytes())
        .with_dry_run(config.dry_run);

    match orchestrator.ingest(&config.file, None, &bytes).await {
        Ok(result) => {
            let s = result.summary;
            println!("✅ Processed {} rows: {} valid, {} invalid ({} duplicates)", s.total, s.valid, s.invalid, s.duplicates);
            println!("📊 Validation rate: {:.2}%", s.validation_rate);
            if config.dry_run {
                println!("🧪 Dry run: nothing was persisted");
            }

            for row in result.invalid.iter().take(config.show_invalid) {
                println!("  Row {}: {}", row.row, row.reasons.join("; "));
            }
            let remaining = result.invalid.len().saturating_sub(config.show_invalid);
            if remaining > 0 {
                println!("  ... and {} more invalid rows", remaining);
            }
        }
        Err(e @ IngestError::UploadRejectedError { .. }) => {
            tracing::error!("Upload rejected: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("Ingest failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

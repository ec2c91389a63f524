use anyhow::Context;
use catalogue_etl::utils::{logger, validation::Validate};
use catalogue_etl::{CataloguePipeline, CliConfig, EtlEngine, LocalStorage, RunConfig};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting catalogue-etl");
    tracing::debug!("CLI args: {:?}", cli);

    let config = match RunConfig::from_cli(&cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    let pipeline = CataloguePipeline::new(LocalStorage::default(), config)
        .context("failed to build the HTTP client")?;
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            tracing::debug!("Run finished: {:?}", outcome);
            let code = outcome.exit_code();
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            tracing::error!("❌ Scrape failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use price_tracker::{
    cli::commands::Cli,
    config::{Config, load_config_path},
    logging::init_logging,
    pipeline::{Settings, run},
};
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    // POLYGON_API_KEY may live in a .env file next to the binary's working dir.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {e}");
        }
    }

    let config = match &cli.config {
        Some(path) => load_config_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let settings = Settings {
        config: cli.apply(config),
        ticker: cli.ticker.clone(),
        lookback: cli.days,
        clear_screen: !cli.no_clear,
    };

    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    run(&settings, &mut input, &mut output).await?;

    Ok(())
}

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use packcraft_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let config = Config::load()?;

    match cli.command {
        cli::Commands::Catalog {
            search,
            category,
            sort,
        } => commands::catalog::handle(search, category, sort),
        cli::Commands::Presets => commands::catalog::presets(),
        cli::Commands::Plan { preset } => commands::plan::handle(&config, preset).await,
    }
}

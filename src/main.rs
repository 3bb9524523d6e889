mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use monitor_core::MonitorConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config =
        MonitorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    init_logging(cli.log_level.as_deref(), &config.logging.filter);
    tracing::info!("Starting sentiment monitor");

    cli::run(cli, config).await
}

/// `--log-level` wins over `RUST_LOG`, which wins over the config filter.
/// Logs go to stderr; stdout carries command output.
fn init_logging(level: Option<&str>, configured: &str) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

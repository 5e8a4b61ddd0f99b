//! Fraud Threshold Simulator - Main Entry Point
//!
//! Loads scored transactions, re-derives confusion and economic metrics
//! under the requested threshold and prints a report.

use anyhow::Result;
use clap::Parser;
use fraud_threshold_simulator::{
    cli::{self, Cli},
    config::{AppConfig, LoggingConfig},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize logging
    init_logging(&config.logging, cli.log_level.as_deref())?;
    info!(
        transactions = %config.data.transactions_path.display(),
        threshold = config.economics.threshold,
        investigation_cost = config.economics.investigation_cost_per_case,
        recovery_rate = config.economics.recovery_rate_percent,
        "Configuration loaded"
    );

    cli::run(cli, config)
}

/// Logs go to stderr so reports on stdout stay machine-readable.
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig, level_override: Option<&str>) -> Result<()> {
    let level = level_override.unwrap_or(logging.level.as_str());
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn")
            .add_directive(format!("fraud_threshold_simulator={level}").parse()?)
            .add_directive(format!("fraud_sim={level}").parse()?),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

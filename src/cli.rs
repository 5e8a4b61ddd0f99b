//! Command-line interface definitions and handlers

use crate::config::AppConfig;
use crate::engine::{compare_with_summary, sweep_thresholds, SweepRange};
use crate::filter::ViewFilter;
use crate::ingest::{load_dataset, read_economic_summary};
use crate::report::{
    render_comparison, render_summary, render_sweep, render_transactions, MetricsReport,
};
use crate::session::AnalysisSession;
use crate::types::{Action, EconomicParameters, RiskLevel};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

fn parse_risk_level(s: &str) -> Result<RiskLevel, String> {
    RiskLevel::from_label(s).ok_or_else(|| format!("'{}' is not a risk level (high, medium, low)", s))
}

fn parse_action(s: &str) -> Result<Action, String> {
    Action::from_label(s).ok_or_else(|| format!("'{}' is not an action (block, review, accept)", s))
}

/// Re-derive fraud detection metrics under a variable decision threshold
#[derive(Parser, Debug)]
#[command(name = "fraud-sim", version)]
#[command(after_help = "\
Examples:
  fraud-sim simulate -t results.csv --threshold 0.7
  fraud-sim simulate -t results.csv -s summary.csv --format json
  fraud-sim sweep -t results.csv --start 0.1 --end 0.9 --step 0.05
  fraud-sim list -t results.csv --risk-level high --action review")]
pub struct Cli {
    /// Configuration file (default: config/config.toml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Input file overrides
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Scored transactions CSV
    #[arg(long, short = 't')]
    pub transactions: Option<PathBuf>,

    /// Upstream economic summary CSV
    #[arg(long, short = 's')]
    pub summary: Option<PathBuf>,
}

/// Economic parameter overrides
#[derive(Args, Debug, Clone, Default)]
pub struct EconomicArgs {
    /// Decision threshold (clamped to 0.01-0.99)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Cost per investigated case
    #[arg(long)]
    pub investigation_cost: Option<f64>,

    /// Recovery rate on detected fraud, percent
    #[arg(long)]
    pub recovery_rate: Option<f64>,
}

impl EconomicArgs {
    fn apply(&self, base: EconomicParameters) -> EconomicParameters {
        EconomicParameters {
            threshold: self.threshold.unwrap_or(base.threshold),
            investigation_cost_per_case: self
                .investigation_cost
                .unwrap_or(base.investigation_cost_per_case),
            recovery_rate_percent: self.recovery_rate.unwrap_or(base.recovery_rate_percent),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute metrics at one threshold (default command)
    Simulate {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        economics: EconomicArgs,

        /// Output format: text or json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Evaluate a range of thresholds and report the best net benefit
    Sweep {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        economics: EconomicArgs,

        /// First threshold
        #[arg(long)]
        start: Option<f64>,

        /// Last threshold (inclusive)
        #[arg(long)]
        end: Option<f64>,

        /// Distance between thresholds
        #[arg(long)]
        step: Option<f64>,

        /// Output format: text or json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List transactions matching a risk level and action filter
    List {
        #[command(flatten)]
        data: DataArgs,

        /// Risk level (high, medium, low)
        #[arg(long, value_parser = parse_risk_level)]
        risk_level: Option<RiskLevel>,

        /// Action (block, review, accept)
        #[arg(long, value_parser = parse_action)]
        action: Option<Action>,

        /// Maximum transactions shown
        #[arg(long)]
        limit: Option<usize>,

        /// Output format: text or json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Simulate {
            data: DataArgs::default(),
            economics: EconomicArgs::default(),
            format: "text".to_string(),
        }
    }
}

/// Build a session from configuration plus command-line overrides
fn open_session(
    config: &AppConfig,
    data: &DataArgs,
    economics: &EconomicArgs,
) -> Result<AnalysisSession> {
    let transactions = data
        .transactions
        .as_ref()
        .unwrap_or(&config.data.transactions_path);
    let dataset = load_dataset(transactions)?;

    let mut session = AnalysisSession::new(dataset, economics.apply(config.economics));

    let summary_path = data
        .summary
        .as_ref()
        .or(config.data.economic_summary_path.as_ref());
    if let Some(path) = summary_path {
        session.set_summary(read_economic_summary(path)?);
    }

    Ok(session)
}

/// Run the parsed command
pub fn run(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command.unwrap_or_default() {
        Commands::Simulate {
            data,
            economics,
            format,
        } => simulate(&config, &data, &economics, &format),
        Commands::Sweep {
            data,
            economics,
            start,
            end,
            step,
            format,
        } => {
            let range = SweepRange {
                start: start.unwrap_or(config.sweep.start),
                end: end.unwrap_or(config.sweep.end),
                step: step.unwrap_or(config.sweep.step),
            };
            sweep(&config, &data, &economics, range, &format)
        }
        Commands::List {
            data,
            risk_level,
            action,
            limit,
            format,
        } => {
            let filter = ViewFilter::new(
                risk_level.or(config.view.risk_level),
                action.or(config.view.action),
            );
            list(&config, &data, filter, limit.unwrap_or(config.view.limit), &format)
        }
    }
}

fn simulate(config: &AppConfig, data: &DataArgs, economics: &EconomicArgs, format: &str) -> Result<()> {
    let mut session = open_session(config, data, economics)?;
    let records = session.dataset().len();
    let metrics = session.metrics().clone();

    info!(
        threshold = metrics.parameters.threshold,
        tp = metrics.tp,
        fp = metrics.fp,
        tn = metrics.tn,
        fn_count = metrics.fn_count,
        net_benefit = metrics.net_benefit,
        "Simulation complete"
    );

    let comparison = session
        .summary()
        .map(|summary| compare_with_summary(summary, &metrics));

    if format == "json" {
        let report = MetricsReport::new(session.dataset(), &metrics, comparison);
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print!("{}", render_summary(&metrics, records));
        if let Some(rows) = &comparison {
            println!();
            print!("{}", render_comparison(rows));
        }
    }

    Ok(())
}

fn sweep(
    config: &AppConfig,
    data: &DataArgs,
    economics: &EconomicArgs,
    range: SweepRange,
    format: &str,
) -> Result<()> {
    range.validate()?;
    let session = open_session(config, data, economics)?;

    let points = sweep_thresholds(session.dataset().records(), session.parameters(), &range);
    info!(
        points = points.len(),
        start = range.start,
        end = range.end,
        step = range.step,
        "Threshold sweep complete"
    );

    if format == "json" {
        let json = serde_json::to_string_pretty(&points).context("Failed to serialize sweep")?;
        println!("{json}");
    } else {
        print!("{}", render_sweep(&points));
    }

    Ok(())
}

fn list(
    config: &AppConfig,
    data: &DataArgs,
    filter: ViewFilter,
    limit: usize,
    format: &str,
) -> Result<()> {
    let mut session = open_session(config, data, &EconomicArgs::default())?;
    session.set_view_filter(filter);
    let shown = session.visible_records(limit);
    let matching = session.matching_count();

    info!(
        shown = shown.len(),
        matching,
        risk_level = ?filter.risk_level,
        action = ?filter.action,
        "Filtered transactions"
    );

    if format == "json" {
        let json = serde_json::to_string_pretty(&shown).context("Failed to serialize transactions")?;
        println!("{json}");
    } else {
        print!("{}", render_transactions(&shown, matching));
    }

    Ok(())
}

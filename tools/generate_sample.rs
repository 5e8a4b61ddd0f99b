//! Sample Data Generator
//!
//! Writes a synthetic scored-transactions CSV and a matching economic
//! summary CSV so the simulator can be tried without real model output.

use anyhow::{Context, Result};
use clap::Parser;
use fraud_threshold_simulator::engine::compute_metrics;
use fraud_threshold_simulator::types::{
    Action, EconomicParameters, FraudLabel, RiskLevel, TransactionRecord,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::info;

const TRANSACTION_HEADER: [&str; 9] = [
    "Time",
    "Amount",
    "Real_Class",
    "Pred_Class",
    "Fraud_Prob",
    "Risk_Level",
    "Action",
    "Expected_Savings",
    "Investigation_Cost",
];

const SUMMARY_HEADER: [&str; 10] = [
    "TP",
    "FN",
    "FP",
    "TN",
    "Detected_Amount",
    "Lost_Amount",
    "Investigation_Cost",
    "Net_Benefit",
    "ROI",
    "Precision",
];

/// Generate synthetic scored transactions
#[derive(Parser, Debug)]
#[command(name = "generate-sample")]
struct Args {
    /// Number of transactions
    #[arg(long, short = 'n', default_value = "10000")]
    count: usize,

    /// Share of fraudulent transactions
    #[arg(long, default_value = "0.02")]
    fraud_rate: f64,

    /// RNG seed for reproducible output
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Threshold used for the stored prediction and the summary
    #[arg(long, default_value = "0.5")]
    threshold: f64,

    /// Cost per investigated case
    #[arg(long, default_value = "18000")]
    investigation_cost: f64,

    /// Transactions output file
    #[arg(long, default_value = "data/fraud_results.csv")]
    transactions: PathBuf,

    /// Economic summary output file
    #[arg(long, default_value = "data/economic_summary.csv")]
    summary: PathBuf,
}

/// Scored transaction generator
struct TransactionGenerator {
    rng: StdRng,
    elapsed: u64,
    fraud_rate: f64,
}

impl TransactionGenerator {
    fn new(seed: u64, fraud_rate: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            elapsed: 0,
            fraud_rate: fraud_rate.clamp(0.0, 1.0),
        }
    }

    fn risk_level(probability: f64) -> RiskLevel {
        if probability >= 0.7 {
            RiskLevel::High
        } else if probability >= 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn action(level: RiskLevel) -> Action {
        match level {
            RiskLevel::High => Action::Block,
            RiskLevel::Medium => Action::Review,
            RiskLevel::Low => Action::Accept,
        }
    }

    /// Generate one transaction with a model score skewed by its true label
    fn generate(&mut self, threshold: f64, investigation_cost: f64) -> TransactionRecord {
        self.elapsed += self.rng.gen_range(1..120);
        let is_fraud = self.rng.gen_bool(self.fraud_rate);

        let (amount, probability) = if is_fraud {
            // Fraud skews toward larger amounts and higher scores
            (
                self.rng.gen_range(50.0..5_000.0_f64),
                self.rng.gen_range(0.35..1.0_f64),
            )
        } else {
            (
                self.rng.gen_range(1.0..800.0_f64),
                self.rng.gen_range(0.0..0.6_f64).powi(2),
            )
        };
        let amount = (amount * 100.0).round() / 100.0;
        let probability = (probability * 10_000.0).round() / 10_000.0;

        let actual = if is_fraud {
            FraudLabel::Fraud
        } else {
            FraudLabel::Legitimate
        };
        let stored = if probability >= threshold {
            FraudLabel::Fraud
        } else {
            FraudLabel::Legitimate
        };
        let level = Self::risk_level(probability);

        TransactionRecord {
            time: self.elapsed.to_string(),
            amount,
            actual_class: actual,
            stored_predicted_class: stored,
            fraud_probability: probability,
            risk_level: level,
            action: Self::action(level),
            expected_savings: if stored.is_fraud() && actual.is_fraud() {
                amount
            } else {
                0.0
            },
            investigation_cost: if stored.is_fraud() { investigation_cost } else { 0.0 },
        }
    }
}

fn write_transactions(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(TRANSACTION_HEADER)?;
    for r in records {
        wtr.write_record([
            r.time.clone(),
            format!("{:.2}", r.amount),
            r.actual_class.as_class().to_string(),
            r.stored_predicted_class.as_class().to_string(),
            format!("{:.4}", r.fraud_probability),
            r.risk_level.to_string(),
            r.action.to_string(),
            format!("{:.2}", r.expected_savings),
            format!("{:.2}", r.investigation_cost),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("generate_sample=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut generator = TransactionGenerator::new(args.seed, args.fraud_rate);

    let records: Vec<TransactionRecord> = (0..args.count)
        .map(|_| generator.generate(args.threshold, args.investigation_cost))
        .collect();

    for path in [&args.transactions, &args.summary] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    write_transactions(&args.transactions, &records)?;
    info!(
        path = %args.transactions.display(),
        count = records.len(),
        "Wrote scored transactions"
    );

    let params = EconomicParameters::new(args.threshold, args.investigation_cost, 100.0);
    let m = compute_metrics(&records, &params);

    let mut wtr = csv::Writer::from_path(&args.summary)
        .with_context(|| format!("Failed to create {}", args.summary.display()))?;
    wtr.write_record(SUMMARY_HEADER)?;
    wtr.write_record([
        m.tp.to_string(),
        m.fn_count.to_string(),
        m.fp.to_string(),
        m.tn.to_string(),
        format!("{:.2}", m.detected_amount),
        format!("{:.2}", m.lost_amount),
        format!("{:.2}", m.total_investigation_cost),
        format!("{:.2}", m.net_benefit),
        format!("{:.2}", m.roi),
        format!("{:.2}", m.precision),
    ])?;
    wtr.flush()?;

    info!(
        path = %args.summary.display(),
        tp = m.tp,
        fp = m.fp,
        net_benefit = m.net_benefit,
        "Wrote economic summary"
    );

    Ok(())
}

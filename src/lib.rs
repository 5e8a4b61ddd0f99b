//! Fraud Threshold Simulator Library
//!
//! Re-derives confusion-matrix and economic-impact metrics for a set of
//! pre-scored transactions under an adjustable decision threshold,
//! investigation cost and recovery rate.

pub mod cli;
pub mod config;
pub mod engine;
pub mod filter;
pub mod ingest;
pub mod report;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use engine::{compute_metrics, DerivedMetrics};
pub use filter::{filter_records, ViewFilter};
pub use session::{AnalysisSession, Dataset};
pub use types::{EconomicParameters, EconomicSummary, TransactionRecord};

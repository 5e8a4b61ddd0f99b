//! Type definitions for scored transactions and economic inputs

pub mod field;
pub mod params;
pub mod summary;
pub mod transaction;

pub use params::EconomicParameters;
pub use summary::EconomicSummary;
pub use transaction::{Action, FraudLabel, RiskLevel, TransactionRecord};

//! Confusion-matrix aggregation over scored transactions

use crate::engine::classifier::classify;
use crate::types::transaction::{FraudLabel, TransactionRecord};
use serde::{Deserialize, Serialize};

/// Confusion counts and monetary sums for one threshold.
///
/// Every field is a plain sum, so partial aggregates over disjoint batches
/// can be combined with [`ConfusionAggregate::merge`] in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfusionAggregate {
    /// Predicted fraud, actually fraud
    pub tp: u64,
    /// Predicted fraud, actually legitimate
    pub fp: u64,
    /// Predicted legitimate, actually legitimate
    pub tn: u64,
    /// Predicted legitimate, actually fraud
    #[serde(rename = "fn")]
    pub fn_count: u64,
    /// Recovered share of true-positive amounts
    pub detected_amount: f64,
    /// Full amount of false negatives
    pub lost_amount: f64,
}

impl ConfusionAggregate {
    /// Aggregate a record sequence in a single pass.
    pub fn from_records(
        records: &[TransactionRecord],
        threshold: f64,
        recovery_rate_percent: f64,
    ) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.add(record, threshold, recovery_rate_percent);
            acc
        })
    }

    /// Fold one record into the aggregate.
    pub fn add(&mut self, record: &TransactionRecord, threshold: f64, recovery_rate_percent: f64) {
        let predicted = classify(record.fraud_probability, threshold);

        match (predicted, record.actual_class) {
            (FraudLabel::Fraud, FraudLabel::Fraud) => {
                self.tp += 1;
                self.detected_amount += record.amount * (recovery_rate_percent / 100.0);
            }
            (FraudLabel::Fraud, FraudLabel::Legitimate) => self.fp += 1,
            (FraudLabel::Legitimate, FraudLabel::Legitimate) => self.tn += 1,
            (FraudLabel::Legitimate, FraudLabel::Fraud) => {
                self.fn_count += 1;
                self.lost_amount += record.amount;
            }
        }
    }

    /// Combine two partial aggregates.
    pub fn merge(self, other: Self) -> Self {
        Self {
            tp: self.tp + other.tp,
            fp: self.fp + other.fp,
            tn: self.tn + other.tn,
            fn_count: self.fn_count + other.fn_count,
            detected_amount: self.detected_amount + other.detected_amount,
            lost_amount: self.lost_amount + other.lost_amount,
        }
    }

    /// Number of records aggregated
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_count
    }

    /// Number of cases predicted as fraud (each one gets investigated)
    pub fn flagged(&self) -> u64 {
        self.tp + self.fp
    }
}

/// Aggregate records into confusion counts and monetary sums.
///
/// Empty input yields an all-zero aggregate.
pub fn aggregate(
    records: &[TransactionRecord],
    threshold: f64,
    recovery_rate_percent: f64,
) -> ConfusionAggregate {
    ConfusionAggregate::from_records(records, threshold, recovery_rate_percent)
}

//! Economic summary computed by the upstream analysis

use crate::types::field::{parse_count, parse_real};
use serde::{Deserialize, Serialize};

/// Number of positional columns in the economic summary row
pub const SUMMARY_FIELD_COUNT: usize = 10;

/// Upstream-computed outcome of the scoring run.
///
/// Kept alongside the recomputed metrics for comparison only; it never
/// seeds or alters the recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicSummary {
    /// Frauds detected (TP)
    pub true_positives: u64,

    /// Frauds missed (FN)
    pub false_negatives: u64,

    /// Legitimate transactions flagged (FP)
    pub false_positives: u64,

    /// Legitimate transactions passed (TN)
    pub true_negatives: u64,

    /// Amount detected
    pub detected_amount: f64,

    /// Amount lost to undetected fraud
    pub lost_amount: f64,

    /// Total investigation cost
    pub investigation_cost: f64,

    /// Net benefit
    pub net_benefit: f64,

    /// Return on investment, percent
    pub roi_percent: f64,

    /// Precision as reported upstream
    pub precision: f64,
}

impl EconomicSummary {
    /// Build a summary from positional fields:
    /// TP, FN, FP, TN, detected, lost, investigation cost, net benefit,
    /// ROI %, precision. Missing or malformed values become 0.
    pub fn from_fields(fields: &[&str]) -> Self {
        let get = |i: usize| fields.get(i).copied();

        Self {
            true_positives: parse_count(get(0)),
            false_negatives: parse_count(get(1)),
            false_positives: parse_count(get(2)),
            true_negatives: parse_count(get(3)),
            detected_amount: parse_real(get(4)),
            lost_amount: parse_real(get(5)),
            investigation_cost: parse_real(get(6)),
            net_benefit: parse_real(get(7)),
            roi_percent: parse_real(get(8)),
            precision: parse_real(get(9)),
        }
    }

    /// Total number of classified transactions
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_negatives + self.false_positives + self.true_negatives
    }
}

//! Metrics derivation engine.
//!
//! A pure pipeline: threshold classification, confusion aggregation,
//! economic evaluation and chart projections, recomputed in full from
//! `(records, parameters)` with no hidden state.

pub mod aggregator;
pub mod classifier;
pub mod comparison;
pub mod evaluator;
pub mod projection;
pub mod sweep;

pub use aggregator::{aggregate, ConfusionAggregate};
pub use classifier::classify;
pub use comparison::{compare_with_summary, MetricComparison};
pub use evaluator::{evaluate, EconomicOutcome};
pub use projection::{
    confusion_breakdown, economic_comparison, ConfusionCategory, ConfusionSlice, Scenario,
    ScenarioOutcome,
};
pub use sweep::{best_threshold, sweep_thresholds, SweepPoint, SweepRange};

use crate::types::{EconomicParameters, TransactionRecord};
use serde::{Deserialize, Serialize};

/// Everything derived from one `(records, parameters)` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Parameters the metrics were computed with
    pub parameters: EconomicParameters,
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[serde(rename = "fn")]
    pub fn_count: u64,
    pub detected_amount: f64,
    pub lost_amount: f64,
    pub total_investigation_cost: f64,
    pub net_benefit: f64,
    /// Percent
    pub roi: f64,
    /// Percent
    pub precision: f64,
    pub confusion_breakdown: [ConfusionSlice; 4],
    pub economic_comparison: [ScenarioOutcome; 2],
}

impl DerivedMetrics {
    /// Share of actual frauds that were flagged, percent. 0 without frauds.
    pub fn recall(&self) -> f64 {
        let actual_frauds = self.tp + self.fn_count;
        if actual_frauds > 0 {
            (self.tp as f64 / actual_frauds as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Number of transactions the metrics cover
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_count
    }
}

/// Compute the full metrics set for a dataset under the given parameters.
///
/// Parameters are used as given; clamping to the interactive range is the
/// caller's responsibility (see [`EconomicParameters::clamped`]).
pub fn compute_metrics(records: &[TransactionRecord], params: &EconomicParameters) -> DerivedMetrics {
    let agg = aggregate(records, params.threshold, params.recovery_rate_percent);
    debug_assert_eq!(agg.total(), records.len() as u64);
    let outcome = evaluate(&agg, params.investigation_cost_per_case);

    DerivedMetrics {
        parameters: *params,
        tp: agg.tp,
        fp: agg.fp,
        tn: agg.tn,
        fn_count: agg.fn_count,
        detected_amount: agg.detected_amount,
        lost_amount: agg.lost_amount,
        total_investigation_cost: outcome.total_investigation_cost,
        net_benefit: outcome.net_benefit,
        roi: outcome.roi,
        precision: outcome.precision,
        confusion_breakdown: confusion_breakdown(&agg),
        economic_comparison: economic_comparison(&agg, &outcome),
    }
}

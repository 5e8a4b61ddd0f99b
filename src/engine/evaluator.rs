//! Economic evaluation of a confusion aggregate

use crate::engine::aggregator::ConfusionAggregate;
use serde::{Deserialize, Serialize};

/// Monetary outcome and summary ratios for one threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicOutcome {
    /// One investigation per flagged case
    pub total_investigation_cost: f64,
    /// Detected amount minus investigation cost minus lost amount
    pub net_benefit: f64,
    /// Net benefit over investigation cost, percent. 0 when nothing was flagged.
    pub roi: f64,
    /// Share of flagged cases that were fraud, percent. 0 when nothing was flagged.
    pub precision: f64,
}

/// Derive investigation cost, net benefit, ROI and precision.
pub fn evaluate(agg: &ConfusionAggregate, investigation_cost_per_case: f64) -> EconomicOutcome {
    let flagged = agg.flagged();
    let total_investigation_cost = flagged as f64 * investigation_cost_per_case;
    let net_benefit = agg.detected_amount - total_investigation_cost - agg.lost_amount;

    let roi = if total_investigation_cost > 0.0 {
        (net_benefit / total_investigation_cost) * 100.0
    } else {
        0.0
    };

    let precision = if flagged > 0 {
        (agg.tp as f64 / flagged as f64) * 100.0
    } else {
        0.0
    };

    EconomicOutcome {
        total_investigation_cost,
        net_benefit,
        roi,
        precision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(tp: u64, fp: u64, tn: u64, fn_count: u64, detected: f64, lost: f64) -> ConfusionAggregate {
        ConfusionAggregate {
            tp,
            fp,
            tn,
            fn_count,
            detected_amount: detected,
            lost_amount: lost,
        }
    }

    #[test]
    fn test_concrete_scenario() {
        let outcome = evaluate(&agg(1, 1, 1, 1, 100.0, 200.0), 10.0);

        assert_eq!(outcome.total_investigation_cost, 20.0);
        assert_eq!(outcome.net_benefit, -120.0);
        assert!((outcome.roi - (-600.0)).abs() < 1e-9);
        assert!((outcome.precision - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_guard_nothing_flagged() {
        let outcome = evaluate(&agg(0, 0, 10, 3, 0.0, 900.0), 18000.0);

        assert_eq!(outcome.roi, 0.0);
        assert_eq!(outcome.precision, 0.0);
        assert_eq!(outcome.total_investigation_cost, 0.0);
        assert_eq!(outcome.net_benefit, -900.0);
    }

    #[test]
    fn test_zero_cost_keeps_precision() {
        // Flagged cases exist but cost nothing: ROI is guarded, precision is not.
        let outcome = evaluate(&agg(3, 1, 0, 0, 300.0, 0.0), 0.0);

        assert_eq!(outcome.roi, 0.0);
        assert!((outcome.precision - 75.0).abs() < 1e-9);
        assert_eq!(outcome.net_benefit, 300.0);
    }

    #[test]
    fn test_empty_aggregate() {
        let outcome = evaluate(&ConfusionAggregate::default(), 50.0);
        assert_eq!(outcome, EconomicOutcome::default());
        assert!(outcome.roi.is_finite() && outcome.precision.is_finite());
    }

    #[test]
    fn test_positive_roi() {
        let outcome = evaluate(&agg(2, 0, 5, 0, 1000.0, 0.0), 100.0);
        assert_eq!(outcome.total_investigation_cost, 200.0);
        assert_eq!(outcome.net_benefit, 800.0);
        assert!((outcome.roi - 400.0).abs() < 1e-9);
        assert!((outcome.precision - 100.0).abs() < 1e-9);
    }
}

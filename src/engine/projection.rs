//! Chart-ready views of the derived metrics

use crate::engine::aggregator::ConfusionAggregate;
use crate::engine::evaluator::EconomicOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confusion-matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfusionCategory {
    TruePositive,
    FalsePositive,
    TrueNegative,
    FalseNegative,
}

impl ConfusionCategory {
    pub fn label(self) -> &'static str {
        match self {
            ConfusionCategory::TruePositive => "True Positives",
            ConfusionCategory::FalsePositive => "False Positives",
            ConfusionCategory::TrueNegative => "True Negatives",
            ConfusionCategory::FalseNegative => "False Negatives",
        }
    }
}

impl fmt::Display for ConfusionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One slice of the proportional confusion chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfusionSlice {
    pub category: ConfusionCategory,
    pub count: u64,
}

/// Before/after scenario for the economic comparison chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    WithoutModel,
    WithModel,
}

impl Scenario {
    pub fn label(self) -> &'static str {
        match self {
            Scenario::WithoutModel => "Without model",
            Scenario::WithModel => "With model",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Benefit and cost under one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub benefit: f64,
    pub cost: f64,
}

/// Confusion counts in the fixed order TP, FP, TN, FN.
pub fn confusion_breakdown(agg: &ConfusionAggregate) -> [ConfusionSlice; 4] {
    [
        ConfusionSlice {
            category: ConfusionCategory::TruePositive,
            count: agg.tp,
        },
        ConfusionSlice {
            category: ConfusionCategory::FalsePositive,
            count: agg.fp,
        },
        ConfusionSlice {
            category: ConfusionCategory::TrueNegative,
            count: agg.tn,
        },
        ConfusionSlice {
            category: ConfusionCategory::FalseNegative,
            count: agg.fn_count,
        },
    ]
}

/// Compare operating without the model against operating with it.
///
/// Without the model, the detected amount is lost along with the missed
/// frauds and nothing is spent on investigations.
pub fn economic_comparison(
    agg: &ConfusionAggregate,
    outcome: &EconomicOutcome,
) -> [ScenarioOutcome; 2] {
    [
        ScenarioOutcome {
            scenario: Scenario::WithoutModel,
            benefit: -(agg.lost_amount + agg.detected_amount),
            cost: 0.0,
        },
        ScenarioOutcome {
            scenario: Scenario::WithModel,
            benefit: outcome.net_benefit,
            cost: outcome.total_investigation_cost,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::evaluate;

    fn sample() -> ConfusionAggregate {
        ConfusionAggregate {
            tp: 4,
            fp: 3,
            tn: 2,
            fn_count: 1,
            detected_amount: 100.0,
            lost_amount: 200.0,
        }
    }

    #[test]
    fn test_breakdown_order() {
        let slices = confusion_breakdown(&sample());
        let categories: Vec<_> = slices.iter().map(|s| s.category).collect();
        let counts: Vec<_> = slices.iter().map(|s| s.count).collect();

        assert_eq!(
            categories,
            vec![
                ConfusionCategory::TruePositive,
                ConfusionCategory::FalsePositive,
                ConfusionCategory::TrueNegative,
                ConfusionCategory::FalseNegative,
            ]
        );
        assert_eq!(counts, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_economic_comparison() {
        let agg = sample();
        let outcome = evaluate(&agg, 10.0);
        let [without, with] = economic_comparison(&agg, &outcome);

        assert_eq!(without.scenario, Scenario::WithoutModel);
        assert_eq!(without.benefit, -300.0);
        assert_eq!(without.cost, 0.0);

        assert_eq!(with.scenario, Scenario::WithModel);
        assert_eq!(with.benefit, outcome.net_benefit);
        assert_eq!(with.cost, 70.0);
    }

    #[test]
    fn test_empty_comparison_is_zero() {
        let agg = ConfusionAggregate::default();
        let [without, _] = economic_comparison(&agg, &evaluate(&agg, 1.0));
        assert_eq!(without.benefit, 0.0);
    }
}

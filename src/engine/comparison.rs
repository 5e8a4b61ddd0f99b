//! Side-by-side comparison of imported and recomputed economics

use crate::engine::DerivedMetrics;
use crate::types::EconomicSummary;
use serde::Serialize;

/// One metric as reported upstream and as recomputed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub metric: &'static str,
    pub imported: f64,
    pub recomputed: f64,
    /// `recomputed - imported`
    pub delta: f64,
}

impl MetricComparison {
    fn new(metric: &'static str, imported: f64, recomputed: f64) -> Self {
        Self {
            metric,
            imported,
            recomputed,
            delta: recomputed - imported,
        }
    }
}

/// Pair every field of the imported summary with its recomputed value.
///
/// Read-only: the summary never influences the metrics it is compared to.
pub fn compare_with_summary(
    summary: &EconomicSummary,
    metrics: &DerivedMetrics,
) -> Vec<MetricComparison> {
    vec![
        MetricComparison::new("TP", summary.true_positives as f64, metrics.tp as f64),
        MetricComparison::new("FN", summary.false_negatives as f64, metrics.fn_count as f64),
        MetricComparison::new("FP", summary.false_positives as f64, metrics.fp as f64),
        MetricComparison::new("TN", summary.true_negatives as f64, metrics.tn as f64),
        MetricComparison::new(
            "Detected amount",
            summary.detected_amount,
            metrics.detected_amount,
        ),
        MetricComparison::new("Lost amount", summary.lost_amount, metrics.lost_amount),
        MetricComparison::new(
            "Investigation cost",
            summary.investigation_cost,
            metrics.total_investigation_cost,
        ),
        MetricComparison::new("Net benefit", summary.net_benefit, metrics.net_benefit),
        MetricComparison::new("ROI %", summary.roi_percent, metrics.roi),
        MetricComparison::new("Precision", summary.precision, metrics.precision),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_metrics;
    use crate::types::{EconomicParameters, FraudLabel, TransactionRecord};

    #[test]
    fn test_compare_with_summary() {
        let records = vec![
            TransactionRecord::new(100.0, FraudLabel::Fraud, 0.9),
            TransactionRecord::new(50.0, FraudLabel::Legitimate, 0.8),
        ];
        let metrics = compute_metrics(&records, &EconomicParameters::new(0.5, 10.0, 100.0));
        let summary = EconomicSummary {
            true_positives: 1,
            false_positives: 2,
            net_benefit: 100.0,
            ..Default::default()
        };

        let rows = compare_with_summary(&summary, &metrics);
        assert_eq!(rows.len(), 10);

        assert_eq!(rows[0].metric, "TP");
        assert_eq!(rows[0].delta, 0.0);

        let fp = rows.iter().find(|r| r.metric == "FP").unwrap();
        assert_eq!(fp.imported, 2.0);
        assert_eq!(fp.recomputed, 1.0);
        assert_eq!(fp.delta, -1.0);

        let net = rows.iter().find(|r| r.metric == "Net benefit").unwrap();
        assert_eq!(net.recomputed, 80.0);
        assert_eq!(net.delta, -20.0);
    }
}

//! Text and JSON rendering of the derived metrics

use crate::engine::{best_threshold, DerivedMetrics, MetricComparison, SweepPoint};
use crate::session::Dataset;
use crate::types::TransactionRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Write};
use std::path::PathBuf;
use uuid::Uuid;

const RULE: &str = "══════════════════════════════════════════════════════════════";
const BAR_WIDTH: usize = 30;

/// Serializable snapshot of one simulation run
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub dataset_id: Uuid,
    pub source: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
    pub records: usize,
    pub metrics: &'a DerivedMetrics,
    /// Percent
    pub recall: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Vec<MetricComparison>>,
}

impl<'a> MetricsReport<'a> {
    pub fn new(
        dataset: &Dataset,
        metrics: &'a DerivedMetrics,
        comparison: Option<Vec<MetricComparison>>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            dataset_id: dataset.id(),
            source: dataset.source().map(|p| p.to_path_buf()),
            loaded_at: dataset.loaded_at(),
            records: dataset.len(),
            metrics,
            recall: metrics.recall(),
            comparison,
        }
    }
}

/// Run a writer against a fresh buffer.
fn render<F>(write: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    // `fmt::Write` for `String` never fails.
    let _ = write(&mut out);
    out
}

/// Format an amount with thousands separators and two decimals.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u64;
    let fraction = (cents % 100.0) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value.abs() / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

/// Render the metrics summary as a text panel.
pub fn render_summary(metrics: &DerivedMetrics, records: usize) -> String {
    render(|out| write_summary(out, metrics, records))
}

fn write_summary(out: &mut String, metrics: &DerivedMetrics, records: usize) -> fmt::Result {
    let p = &metrics.parameters;

    writeln!(out, "╔{RULE}╗")?;
    writeln!(out, "  FRAUD THRESHOLD SIMULATION")?;
    writeln!(out, "╠{RULE}╣")?;
    writeln!(
        out,
        "  Threshold: {:.2}   Investigation cost: {}   Recovery rate: {:.1}%",
        p.threshold,
        format_currency(p.investigation_cost_per_case),
        p.recovery_rate_percent
    )?;
    writeln!(out, "  Transactions: {records}")?;
    writeln!(out, "╠{RULE}╣")?;

    writeln!(out, "  Confusion matrix:")?;
    let total = metrics.total().max(1) as f64;
    for slice in &metrics.confusion_breakdown {
        let pct = slice.count as f64 / total * 100.0;
        writeln!(
            out,
            "    {:<16} {:>8} ({:>5.1}%) {}",
            slice.category.label(),
            slice.count,
            pct,
            bar(slice.count as f64, total)
        )?;
    }

    writeln!(out, "╠{RULE}╣")?;
    writeln!(out, "  Detected amount:     {:>20}", format_currency(metrics.detected_amount))?;
    writeln!(out, "  Lost amount:         {:>20}", format_currency(metrics.lost_amount))?;
    writeln!(
        out,
        "  Investigation cost:  {:>20}",
        format_currency(metrics.total_investigation_cost)
    )?;
    writeln!(out, "  Net benefit:         {:>20}", format_currency(metrics.net_benefit))?;
    writeln!(out, "  ROI:                 {:>19.1}%", metrics.roi)?;
    writeln!(out, "  Precision:           {:>19.1}%", metrics.precision)?;
    writeln!(out, "  Recall:              {:>19.1}%", metrics.recall())?;

    writeln!(out, "╠{RULE}╣")?;
    writeln!(out, "  Economic comparison (benefit):")?;
    let max = metrics
        .economic_comparison
        .iter()
        .map(|s| s.benefit.abs())
        .fold(0.0, f64::max);
    for scenario in &metrics.economic_comparison {
        writeln!(
            out,
            "    {:<14} {:>20}  cost {:>16} {}",
            scenario.scenario.label(),
            format_currency(scenario.benefit),
            format_currency(scenario.cost),
            bar(scenario.benefit, max)
        )?;
    }
    writeln!(out, "╚{RULE}╝")
}

/// Render imported vs recomputed values.
pub fn render_comparison(rows: &[MetricComparison]) -> String {
    render(|out| {
        writeln!(out, "Imported summary vs recomputed:")?;
        writeln!(
            out,
            "  {:<20} {:>18} {:>18} {:>18}",
            "Metric", "Imported", "Recomputed", "Delta"
        )?;
        for row in rows {
            writeln!(
                out,
                "  {:<20} {:>18.2} {:>18.2} {:>18.2}",
                row.metric, row.imported, row.recomputed, row.delta
            )?;
        }
        Ok(())
    })
}

/// Render a threshold sweep table, marking the best net benefit.
pub fn render_sweep(points: &[SweepPoint]) -> String {
    let best = best_threshold(points);

    render(|out| {
        writeln!(
            out,
            "  {:>9} {:>7} {:>7} {:>7} {:>7} {:>10} {:>9} {:>20} {:>10}",
            "Threshold", "TP", "FP", "TN", "FN", "Precision", "Recall", "Net benefit", "ROI"
        )?;
        for p in points {
            let marker = if best.map(|b| b.threshold) == Some(p.threshold) {
                "*"
            } else {
                " "
            };
            writeln!(
                out,
                "{marker} {:>9.2} {:>7} {:>7} {:>7} {:>7} {:>9.1}% {:>8.1}% {:>20} {:>9.1}%",
                p.threshold,
                p.tp,
                p.fp,
                p.tn,
                p.fn_count,
                p.precision,
                p.recall,
                format_currency(p.net_benefit),
                p.roi
            )?;
        }

        if let Some(best) = best {
            writeln!(
                out,
                "Best threshold by net benefit: {:.2} ({})",
                best.threshold,
                format_currency(best.net_benefit)
            )?;
        }
        Ok(())
    })
}

/// Render the transaction list panel; `matching` counts every record that
/// passed the filter, including those cut by the limit.
pub fn render_transactions(records: &[&TransactionRecord], matching: usize) -> String {
    render(|out| {
        writeln!(
            out,
            "  {:>12} {:>18} {:>12} {:<8} {:<8}",
            "Time", "Amount", "Probability", "Risk", "Action"
        )?;
        for r in records {
            writeln!(
                out,
                "  {:>12} {:>18} {:>11.1}% {:<8} {:<8}",
                r.time,
                format_currency(r.amount),
                r.fraud_probability * 100.0,
                r.risk_level,
                r.action
            )?;
        }
        if records.is_empty() {
            writeln!(out, "  (no matching transactions)")
        } else {
            writeln!(out, "  Showing {} of {} matching transactions", records.len(), matching)
        }
    })
}

//! Threshold sweep: the engine evaluated across a range of thresholds

use crate::engine::compute_metrics;
use crate::types::{EconomicParameters, TransactionRecord};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of thresholds in one sweep
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Evenly spaced thresholds `start, start + step, ...` up to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            start: 0.05,
            end: 0.95,
            step: 0.05,
        }
    }
}

impl SweepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Reject ranges that would produce no thresholds or more than
    /// [`MAX_SWEEP_POINTS`].
    pub fn validate(&self) -> Result<()> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            bail!("Sweep bounds must be finite numbers");
        }
        if self.step <= 0.0 {
            bail!("Sweep step must be positive, got {}", self.step);
        }
        if self.start > self.end {
            bail!(
                "Sweep start {} is greater than sweep end {}",
                self.start,
                self.end
            );
        }
        if self.point_count().is_none() {
            bail!(
                "Sweep from {} to {} in steps of {} exceeds {} thresholds",
                self.start,
                self.end,
                self.step,
                MAX_SWEEP_POINTS
            );
        }
        Ok(())
    }

    /// Number of thresholds, `None` when it is not finite or above the cap.
    fn point_count(&self) -> Option<usize> {
        let steps = ((self.end - self.start) / self.step + 1e-9).floor();
        if steps.is_finite() && steps >= 0.0 && steps < MAX_SWEEP_POINTS as f64 {
            Some(steps as usize + 1)
        } else {
            None
        }
    }

    /// Thresholds covered by the range, empty when the range is invalid.
    ///
    /// Points are computed from an integer index and rounded to 10 decimal
    /// places, so `0.05 + 2 * 0.05` lands exactly on `0.15`.
    pub fn thresholds(&self) -> Vec<f64> {
        if self.validate().is_err() {
            return Vec::new();
        }

        let count = self.point_count().unwrap_or(0);
        (0..count)
            .map(|i| round_to(self.start + i as f64 * self.step, 1e10))
            .collect()
    }
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

/// Key metrics at one threshold of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub threshold: f64,
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[serde(rename = "fn")]
    pub fn_count: u64,
    pub precision: f64,
    pub recall: f64,
    pub total_investigation_cost: f64,
    pub net_benefit: f64,
    pub roi: f64,
}

/// Evaluate the engine at every threshold of `range`, keeping the economic
/// parameters of `base` fixed.
pub fn sweep_thresholds(
    records: &[TransactionRecord],
    base: &EconomicParameters,
    range: &SweepRange,
) -> Vec<SweepPoint> {
    range
        .thresholds()
        .into_iter()
        .map(|threshold| {
            let m = compute_metrics(records, &base.with_threshold(threshold));
            SweepPoint {
                threshold,
                tp: m.tp,
                fp: m.fp,
                tn: m.tn,
                fn_count: m.fn_count,
                precision: m.precision,
                recall: m.recall(),
                total_investigation_cost: m.total_investigation_cost,
                net_benefit: m.net_benefit,
                roi: m.roi,
            }
        })
        .collect()
}

/// Point with the highest net benefit; ties go to the lowest threshold.
pub fn best_threshold(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points.iter().fold(None, |best: Option<&SweepPoint>, point| match best {
        Some(b) if b.net_benefit >= point.net_benefit => Some(b),
        _ => Some(point),
    })
}

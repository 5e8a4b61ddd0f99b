//! Adjustable economic parameters for the simulation

use serde::{Deserialize, Serialize};

/// Lowest threshold reachable through the interactive controls
pub const MIN_THRESHOLD: f64 = 0.01;

/// Highest threshold reachable through the interactive controls
pub const MAX_THRESHOLD: f64 = 0.99;

const DEFAULT_THRESHOLD: f64 = 0.5;
const DEFAULT_INVESTIGATION_COST: f64 = 18000.0;
const DEFAULT_RECOVERY_RATE: f64 = 100.0;

/// Decision threshold plus the economic model applied to its outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicParameters {
    /// Minimum fraud probability classified as fraud
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Cost charged for every flagged case
    #[serde(default = "default_investigation_cost")]
    pub investigation_cost_per_case: f64,

    /// Share of a detected fraud's amount that is recovered, in percent
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate_percent: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_investigation_cost() -> f64 {
    DEFAULT_INVESTIGATION_COST
}

fn default_recovery_rate() -> f64 {
    DEFAULT_RECOVERY_RATE
}

impl EconomicParameters {
    pub fn new(threshold: f64, investigation_cost_per_case: f64, recovery_rate_percent: f64) -> Self {
        Self {
            threshold,
            investigation_cost_per_case,
            recovery_rate_percent,
        }
    }

    /// Restrict every parameter to its interactive range.
    ///
    /// Threshold goes to [0.01, 0.99], cost to >= 0 and recovery rate to
    /// [0, 100]. Non-finite values take the field's default.
    pub fn clamped(self) -> Self {
        Self {
            threshold: finite_or(self.threshold, DEFAULT_THRESHOLD)
                .clamp(MIN_THRESHOLD, MAX_THRESHOLD),
            investigation_cost_per_case: finite_or(
                self.investigation_cost_per_case,
                DEFAULT_INVESTIGATION_COST,
            )
            .max(0.0),
            recovery_rate_percent: finite_or(self.recovery_rate_percent, DEFAULT_RECOVERY_RATE)
                .clamp(0.0, 100.0),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Default for EconomicParameters {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            investigation_cost_per_case: DEFAULT_INVESTIGATION_COST,
            recovery_rate_percent: DEFAULT_RECOVERY_RATE,
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = EconomicParameters::default();
        assert_eq!(params.threshold, 0.5);
        assert_eq!(params.investigation_cost_per_case, 18000.0);
        assert_eq!(params.recovery_rate_percent, 100.0);
    }

    #[test]
    fn test_clamped_ranges() {
        let params = EconomicParameters::new(1.5, -10.0, 250.0).clamped();
        assert_eq!(params.threshold, MAX_THRESHOLD);
        assert_eq!(params.investigation_cost_per_case, 0.0);
        assert_eq!(params.recovery_rate_percent, 100.0);

        let params = EconomicParameters::new(0.0, 5.0, -1.0).clamped();
        assert_eq!(params.threshold, MIN_THRESHOLD);
        assert_eq!(params.investigation_cost_per_case, 5.0);
        assert_eq!(params.recovery_rate_percent, 0.0);
    }

    #[test]
    fn test_clamped_non_finite() {
        let params = EconomicParameters::new(f64::NAN, f64::INFINITY, f64::NAN).clamped();
        assert_eq!(params, EconomicParameters::default());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let params: EconomicParameters = serde_json::from_str(r#"{"threshold": 0.7}"#).unwrap();
        assert_eq!(params.threshold, 0.7);
        assert_eq!(params.investigation_cost_per_case, 18000.0);
    }
}

//! Threshold classification of fraud probabilities

use crate::types::transaction::FraudLabel;

/// Classify a fraud probability against a decision threshold.
///
/// A probability equal to the threshold is classified as fraud. The
/// comparison is total for any input: out-of-range values compare as
/// ordinary numbers and a NaN probability is never flagged. Keeping the
/// threshold inside a meaningful range is up to the caller.
#[inline]
pub fn classify(fraud_probability: f64, threshold: f64) -> FraudLabel {
    if fraud_probability >= threshold {
        FraudLabel::Fraud
    } else {
        FraudLabel::Legitimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_positive() {
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            assert_eq!(classify(t, t), FraudLabel::Fraud, "threshold {t}");
        }
    }

    #[test]
    fn test_above_and_below() {
        assert_eq!(classify(0.9, 0.5), FraudLabel::Fraud);
        assert_eq!(classify(0.49, 0.5), FraudLabel::Legitimate);
    }

    #[test]
    fn test_extreme_thresholds() {
        assert_eq!(classify(0.0, 0.0), FraudLabel::Fraud);
        assert_eq!(classify(0.99, 1.0), FraudLabel::Legitimate);
        assert_eq!(classify(1.0, 1.0), FraudLabel::Fraud);
    }

    #[test]
    fn test_out_of_range_inputs_are_total() {
        assert_eq!(classify(1.5, 0.5), FraudLabel::Fraud);
        assert_eq!(classify(-0.2, 0.0), FraudLabel::Legitimate);
        assert_eq!(classify(0.3, -1.0), FraudLabel::Fraud);
        assert_eq!(classify(f64::NAN, 0.5), FraudLabel::Legitimate);
    }
}

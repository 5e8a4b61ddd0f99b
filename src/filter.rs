//! Categorical display filter over the raw record list.
//!
//! Takes only records and a [`ViewFilter`]; it has no access to the
//! economic parameters and cannot influence the derived metrics.

use crate::types::{Action, RiskLevel, TransactionRecord};
use serde::{Deserialize, Serialize};

/// Default number of transactions shown in the list view
pub const DEFAULT_LIST_LIMIT: usize = 15;

/// Risk level and action filter; `None` means "all"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub action: Option<Action>,
}

impl ViewFilter {
    pub fn new(risk_level: Option<RiskLevel>, action: Option<Action>) -> Self {
        Self { risk_level, action }
    }

    /// Whether a record passes both criteria
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.risk_level.map_or(true, |r| record.risk_level == r)
            && self.action.map_or(true, |a| record.action == a)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.risk_level.is_none() && self.action.is_none()
    }
}

/// Records matching the filter, lazily and in dataset order.
pub fn filter_records<'a>(
    records: &'a [TransactionRecord],
    filter: &'a ViewFilter,
) -> impl Iterator<Item = &'a TransactionRecord> + 'a {
    records.iter().filter(move |r| filter.matches(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FraudLabel;

    fn records() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord::new(10.0, FraudLabel::Fraud, 0.95)
                .with_display(RiskLevel::High, Action::Block),
            TransactionRecord::new(20.0, FraudLabel::Legitimate, 0.6)
                .with_display(RiskLevel::Medium, Action::Review),
            TransactionRecord::new(30.0, FraudLabel::Legitimate, 0.7)
                .with_display(RiskLevel::High, Action::Review),
            TransactionRecord::new(40.0, FraudLabel::Legitimate, 0.05)
                .with_display(RiskLevel::Low, Action::Accept),
        ]
    }

    #[test]
    fn test_unfiltered_returns_all() {
        let records = records();
        let filter = ViewFilter::default();

        assert!(filter.is_unfiltered());
        assert_eq!(filter_records(&records, &filter).count(), 4);
    }

    #[test]
    fn test_filter_by_risk_level() {
        let records = records();
        let filter = ViewFilter::new(Some(RiskLevel::High), None);
        let amounts: Vec<f64> = filter_records(&records, &filter).map(|r| r.amount).collect();
        assert_eq!(amounts, vec![10.0, 30.0]);
    }

    #[test]
    fn test_filter_by_both() {
        let records = records();
        let filter = ViewFilter::new(Some(RiskLevel::High), Some(Action::Review));
        let shown: Vec<_> = filter_records(&records, &filter).collect();

        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].amount, 30.0);
    }

    #[test]
    fn test_limit() {
        let records = records();
        let filter = ViewFilter::default();
        let shown: Vec<_> = filter_records(&records, &filter).take(2).collect();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[1].amount, 20.0);
    }

    #[test]
    fn test_no_match() {
        let records = records();
        let filter = ViewFilter::new(Some(RiskLevel::Low), Some(Action::Block));
        assert_eq!(filter_records(&records, &filter).next(), None);
    }
}

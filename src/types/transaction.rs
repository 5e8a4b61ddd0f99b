//! Scored transaction records produced by an upstream fraud model

use crate::types::field::{non_empty, parse_integer, parse_real};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of positional columns in a scored-transaction row
pub const TRANSACTION_FIELD_COUNT: usize = 9;

/// Binary fraud label (0 = legitimate, 1 = fraud)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FraudLabel {
    #[default]
    Legitimate,
    Fraud,
}

impl FraudLabel {
    /// Map a numeric class to a label. Only `1` is fraud.
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            FraudLabel::Fraud
        } else {
            FraudLabel::Legitimate
        }
    }

    /// Numeric class of this label
    pub fn as_class(self) -> u8 {
        match self {
            FraudLabel::Legitimate => 0,
            FraudLabel::Fraud => 1,
        }
    }

    pub fn is_fraud(self) -> bool {
        self == FraudLabel::Fraud
    }
}

/// Risk level assigned by the upstream scorer (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl RiskLevel {
    /// Parse a risk level label, falling back to `Low`.
    ///
    /// Accepts English names and the Spanish labels (`Alto`, `Medio`, `Bajo`)
    /// emitted by the scoring notebook, case-insensitively.
    pub fn parse_or_default(label: Option<&str>) -> Self {
        non_empty(label)
            .and_then(Self::from_label)
            .unwrap_or_default()
    }

    /// Strict parse, `None` for unknown labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" | "alto" => Some(RiskLevel::High),
            "medium" | "medio" => Some(RiskLevel::Medium),
            "low" | "bajo" => Some(RiskLevel::Low),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Recommended action attached by the upstream scorer (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Block,
    Review,
    #[default]
    Accept,
}

impl Action {
    /// Parse an action label, falling back to `Accept`.
    pub fn parse_or_default(label: Option<&str>) -> Self {
        non_empty(label)
            .and_then(Self::from_label)
            .unwrap_or_default()
    }

    /// Strict parse, `None` for unknown labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "block" | "bloquear" => Some(Action::Block),
            "review" | "revisar" => Some(Action::Review),
            "accept" | "aceptar" => Some(Action::Accept),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Block => "Block",
            Action::Review => "Review",
            Action::Accept => "Accept",
        };
        f.write_str(label)
    }
}

/// One transaction scored by an upstream model.
///
/// Records are built once at ingestion and never mutated; a new dataset
/// replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque timestamp or sequence token
    pub time: String,

    /// Transaction amount
    pub amount: f64,

    /// Ground-truth label
    pub actual_class: FraudLabel,

    /// Label as stored by the upstream scorer. Informational only, the
    /// engine derives its own prediction from `fraud_probability`.
    pub stored_predicted_class: FraudLabel,

    /// Model fraud probability, expected in [0, 1]
    pub fraud_probability: f64,

    /// Risk bucket for display
    pub risk_level: RiskLevel,

    /// Recommended action for display
    pub action: Action,

    /// Upstream expected savings (provenance only)
    pub expected_savings: f64,

    /// Upstream per-row investigation cost (provenance only)
    pub investigation_cost: f64,
}

impl TransactionRecord {
    /// Create a record with the fields the engine reads; the rest take
    /// their neutral defaults.
    pub fn new(amount: f64, actual_class: FraudLabel, fraud_probability: f64) -> Self {
        Self {
            time: String::new(),
            amount,
            actual_class,
            stored_predicted_class: FraudLabel::Legitimate,
            fraud_probability,
            risk_level: RiskLevel::default(),
            action: Action::default(),
            expected_savings: 0.0,
            investigation_cost: 0.0,
        }
    }

    /// Build a record from positional fields:
    /// time, amount, actual class, stored predicted class, fraud probability,
    /// risk level, action, expected savings, investigation cost.
    ///
    /// Never fails. Missing or malformed numbers become 0, unknown classes
    /// become `Legitimate`, unknown risk levels `Low` and unknown actions
    /// `Accept`.
    pub fn from_fields(fields: &[&str]) -> Self {
        let get = |i: usize| fields.get(i).copied();

        Self {
            time: get(0).map(|s| s.trim().to_string()).unwrap_or_default(),
            amount: parse_real(get(1)),
            actual_class: FraudLabel::from_class(parse_integer(get(2))),
            stored_predicted_class: FraudLabel::from_class(parse_integer(get(3))),
            fraud_probability: parse_real(get(4)),
            risk_level: RiskLevel::parse_or_default(get(5)),
            action: Action::parse_or_default(get(6)),
            expected_savings: parse_real(get(7)),
            investigation_cost: parse_real(get(8)),
        }
    }

    /// Attach display metadata
    pub fn with_display(mut self, risk_level: RiskLevel, action: Action) -> Self {
        self.risk_level = risk_level;
        self.action = action;
        self
    }

    /// Attach the opaque time token
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }
}

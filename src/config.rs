//! Configuration management for the threshold simulator

use crate::engine::SweepRange;
use crate::filter::{ViewFilter, DEFAULT_LIST_LIMIT};
use crate::types::{Action, EconomicParameters, RiskLevel};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file, used when present and no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Prefix for environment overrides, e.g. `FRAUD_SIM__ECONOMICS__THRESHOLD`
const ENV_PREFIX: &str = "FRAUD_SIM";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub economics: EconomicParameters,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub sweep: SweepRange,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input files
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Scored transactions CSV
    #[serde(default = "default_transactions_path")]
    pub transactions_path: PathBuf,
    /// Optional upstream economic summary CSV
    #[serde(default)]
    pub economic_summary_path: Option<PathBuf>,
}

fn default_transactions_path() -> PathBuf {
    PathBuf::from("data/fraud_results.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            transactions_path: default_transactions_path(),
            economic_summary_path: None,
        }
    }
}

/// Transaction list view
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    /// Only list this risk level
    #[serde(default, deserialize_with = "deserialize_risk_level")]
    pub risk_level: Option<RiskLevel>,
    /// Only list this action
    #[serde(default, deserialize_with = "deserialize_action")]
    pub action: Option<Action>,
    /// Maximum transactions listed
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Same labels as the CLI and the CSV columns, case-insensitive
fn deserialize_risk_level<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|label| {
            RiskLevel::from_label(&label)
                .ok_or_else(|| de::Error::custom(format!("unknown risk level '{label}'")))
        })
        .transpose()
}

fn deserialize_action<'de, D>(deserializer: D) -> Result<Option<Action>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|label| {
            Action::from_label(&label)
                .ok_or_else(|| de::Error::custom(format!("unknown action '{label}'")))
        })
        .transpose()
}

fn default_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            risk_level: None,
            action: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ViewConfig {
    pub fn filter(&self) -> ViewFilter {
        ViewFilter::new(self.risk_level, self.action)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// `FRAUD_SIM__SECTION__KEY` overrides
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl AppConfig {
    /// Load configuration from an explicit path, else from
    /// `config/config.toml` when it exists, else defaults. Environment
    /// overrides apply in every case.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_path(DEFAULT_CONFIG_PATH)
            }
            None => Self::from_builder(Config::builder(), environment()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::from_builder(Config::builder().add_source(File::from(path)), environment())
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        env: Environment,
    ) -> Result<Self> {
        let config = builder
            .add_source(env)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.economics.threshold, 0.5);
        assert_eq!(config.economics.investigation_cost_per_case, 18000.0);
        assert_eq!(config.economics.recovery_rate_percent, 100.0);
        assert_eq!(config.view.limit, 15);
        assert!(config.view.filter().is_unfiltered());
        assert_eq!(config.sweep, SweepRange::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[data]
transactions_path = "results.csv"
economic_summary_path = "summary.csv"

[economics]
threshold = 0.65
investigation_cost_per_case = 250.0

[view]
risk_level = "high"
action = "review"
limit = 5

[sweep]
start = 0.1
end = 0.9
step = 0.1
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();

        assert_eq!(config.data.transactions_path, PathBuf::from("results.csv"));
        assert_eq!(
            config.data.economic_summary_path,
            Some(PathBuf::from("summary.csv"))
        );
        assert_eq!(config.economics.threshold, 0.65);
        assert_eq!(config.economics.investigation_cost_per_case, 250.0);
        assert_eq!(config.economics.recovery_rate_percent, 100.0);
        assert_eq!(config.view.risk_level, Some(RiskLevel::High));
        assert_eq!(config.view.action, Some(Action::Review));
        assert_eq!(config.view.limit, 5);
        assert_eq!(config.sweep, SweepRange::new(0.1, 0.9, 0.1));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_view_labels_are_case_insensitive() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[view]\nrisk_level = \"Alto\"\naction = \"BLOCK\"\n").unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.view.risk_level, Some(RiskLevel::High));
        assert_eq!(config.view.action, Some(Action::Block));

        let mut bad = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(bad, "[view]\nrisk_level = \"extreme\"\n").unwrap();
        assert!(AppConfig::load_from_path(bad.path()).is_err());
    }

    #[test]
    fn test_env_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[economics]\nthreshold = 0.65\ninvestigation_cost_per_case = 250.0\n").unwrap();

        let vars = config::Map::from([
            ("FRAUD_SIM__ECONOMICS__THRESHOLD".to_string(), "0.7".to_string()),
            ("FRAUD_SIM__VIEW__RISK_LEVEL".to_string(), "high".to_string()),
            ("FRAUD_SIM__VIEW__LIMIT".to_string(), "3".to_string()),
            ("OTHER_APP__ECONOMICS__THRESHOLD".to_string(), "0.1".to_string()),
        ]);
        let config = AppConfig::from_builder(
            Config::builder().add_source(File::from(file.path())),
            environment().source(Some(vars)),
        )
        .unwrap();

        assert_eq!(config.economics.threshold, 0.7);
        assert_eq!(config.economics.investigation_cost_per_case, 250.0);
        assert_eq!(config.view.risk_level, Some(RiskLevel::High));
        assert_eq!(config.view.limit, 3);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(AppConfig::load_from_path("/nonexistent/config.toml").is_err());
    }
}

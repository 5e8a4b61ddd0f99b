//! Analysis session: owns the dataset, parameters and view filter, and
//! memoizes the derived metrics.

use crate::engine::{compute_metrics, DerivedMetrics};
use crate::filter::{filter_records, ViewFilter};
use crate::types::{EconomicParameters, EconomicSummary, TransactionRecord};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// An immutable, identified set of scored transactions.
///
/// Each construction gets a fresh id, so replacing the dataset wholesale
/// always invalidates cached metrics.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: Uuid,
    records: Arc<[TransactionRecord]>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            records: records.into(),
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// Record where the data came from
    pub fn with_source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Everything the metrics depend on, and nothing else.
///
/// Parameters are keyed by bit pattern so the key is `Eq` and `Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricsKey {
    dataset_id: Uuid,
    threshold: u64,
    investigation_cost_per_case: u64,
    recovery_rate_percent: u64,
}

impl MetricsKey {
    pub fn new(dataset: &Dataset, params: &EconomicParameters) -> Self {
        Self {
            dataset_id: dataset.id(),
            threshold: params.threshold.to_bits(),
            investigation_cost_per_case: params.investigation_cost_per_case.to_bits(),
            recovery_rate_percent: params.recovery_rate_percent.to_bits(),
        }
    }
}

/// Interactive state around the metrics engine.
///
/// Parameters are clamped to their interactive ranges on every update.
/// Only dataset and parameter changes can cause a recomputation; the view
/// filter and the imported summary never do.
pub struct AnalysisSession {
    dataset: Dataset,
    params: EconomicParameters,
    view: ViewFilter,
    summary: Option<EconomicSummary>,
    cache: Option<(MetricsKey, DerivedMetrics)>,
    recomputations: u64,
}

impl AnalysisSession {
    pub fn new(dataset: Dataset, params: EconomicParameters) -> Self {
        Self {
            dataset,
            params: params.clamped(),
            view: ViewFilter::default(),
            summary: None,
            cache: None,
            recomputations: 0,
        }
    }

    /// Current metrics, recomputed only when the dataset or parameters changed
    pub fn metrics(&mut self) -> &DerivedMetrics {
        let key = MetricsKey::new(&self.dataset, &self.params);

        let entry = match self.cache.take() {
            Some((cached, metrics)) if cached == key => {
                debug!(threshold = self.params.threshold, "Metrics cache hit");
                (cached, metrics)
            }
            _ => {
                debug!(
                    dataset_id = %self.dataset.id(),
                    records = self.dataset.len(),
                    threshold = self.params.threshold,
                    "Recomputing metrics"
                );
                self.recomputations += 1;
                (key, compute_metrics(self.dataset.records(), &self.params))
            }
        };

        &self.cache.insert(entry).1
    }

    /// Replace the whole dataset
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }

    pub fn set_parameters(&mut self, params: EconomicParameters) {
        self.params = params.clamped();
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.set_parameters(self.params.with_threshold(threshold));
    }

    pub fn set_investigation_cost(&mut self, cost: f64) {
        self.set_parameters(EconomicParameters {
            investigation_cost_per_case: cost,
            ..self.params
        });
    }

    pub fn set_recovery_rate(&mut self, rate_percent: f64) {
        self.set_parameters(EconomicParameters {
            recovery_rate_percent: rate_percent,
            ..self.params
        });
    }

    pub fn set_view_filter(&mut self, view: ViewFilter) {
        self.view = view;
    }

    pub fn set_summary(&mut self, summary: Option<EconomicSummary>) {
        self.summary = summary;
    }

    /// Records passing the view filter, at most `limit`
    pub fn visible_records(&self, limit: usize) -> Vec<&TransactionRecord> {
        filter_records(self.dataset.records(), &self.view)
            .take(limit)
            .collect()
    }

    /// Number of records passing the view filter, ignoring any limit
    pub fn matching_count(&self) -> usize {
        filter_records(self.dataset.records(), &self.view).count()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn parameters(&self) -> &EconomicParameters {
        &self.params
    }

    pub fn view_filter(&self) -> &ViewFilter {
        &self.view
    }

    pub fn summary(&self) -> Option<&EconomicSummary> {
        self.summary.as_ref()
    }

    /// Number of times the engine actually ran
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

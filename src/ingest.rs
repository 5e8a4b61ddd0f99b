//! CSV ingestion of scored transactions and the economic summary.
//!
//! Both files are positional: the first row is a header and is discarded,
//! blank lines are skipped and rows may be ragged. Field-level problems are
//! absorbed by the record constructors; only I/O and CSV framing errors
//! surface here.

use crate::session::Dataset;
use crate::types::summary::SUMMARY_FIELD_COUNT;
use crate::types::transaction::TRANSACTION_FIELD_COUNT;
use crate::types::{EconomicSummary, TransactionRecord};
use anyhow::{Context, Result};
use csv::{ByteRecord, ReaderBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

/// Decode a row leniently; invalid UTF-8 is replaced rather than rejected.
fn decode(row: &ByteRecord) -> Vec<Cow<'_, str>> {
    row.iter().map(String::from_utf8_lossy).collect()
}

/// Parse scored transactions from any reader.
pub fn read_transactions_from_reader<R: Read>(input: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = reader(input);
    let mut records = Vec::new();
    let mut short_rows = 0usize;
    let mut row = ByteRecord::new();

    while rdr.read_byte_record(&mut row).context("Failed to read transaction row")? {
        if row.len() < TRANSACTION_FIELD_COUNT {
            short_rows += 1;
        }
        let fields = decode(&row);
        let fields: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
        records.push(TransactionRecord::from_fields(&fields));
    }

    if short_rows > 0 {
        warn!(
            short_rows,
            expected_fields = TRANSACTION_FIELD_COUNT,
            "Transaction rows with missing fields were filled with defaults"
        );
    }

    Ok(records)
}

/// Parse scored transactions from a CSV file.
pub fn read_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<TransactionRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open transactions file {}", path.display()))?;

    let records = read_transactions_from_reader(file)
        .with_context(|| format!("Failed to parse transactions file {}", path.display()))?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Loaded scored transactions"
    );

    Ok(records)
}

/// Load a transactions file as an identified dataset.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    Ok(Dataset::new(read_transactions(path)?).with_source(path))
}

/// Parse the economic summary from any reader.
///
/// Returns `None` when there is no row after the header.
pub fn read_economic_summary_from_reader<R: Read>(input: R) -> Result<Option<EconomicSummary>> {
    let mut rdr = reader(input);
    let mut row = ByteRecord::new();

    if !rdr.read_byte_record(&mut row).context("Failed to read economic summary row")? {
        return Ok(None);
    }

    if row.len() < SUMMARY_FIELD_COUNT {
        warn!(
            fields = row.len(),
            expected_fields = SUMMARY_FIELD_COUNT,
            "Economic summary row is short, missing values default to 0"
        );
    }

    let fields = decode(&row);
    let fields: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
    Ok(Some(EconomicSummary::from_fields(&fields)))
}

/// Parse the economic summary from a CSV file.
pub fn read_economic_summary<P: AsRef<Path>>(path: P) -> Result<Option<EconomicSummary>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open economic summary file {}", path.display()))?;

    let summary = read_economic_summary_from_reader(file)
        .with_context(|| format!("Failed to parse economic summary file {}", path.display()))?;

    match &summary {
        Some(_) => info!(path = %path.display(), "Loaded economic summary"),
        None => warn!(path = %path.display(), "Economic summary file has no data row"),
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, FraudLabel, RiskLevel};
    use std::io::Write;

    const TRANSACTIONS: &str = "\
Time,Amount,Real_Class,Pred_Class,Fraud_Prob,Risk_Level,Action,Expected_Savings,Investigation_Cost
0,149.62,0,0,0.02,Bajo,Accept,0,18000
406,529.00,1,1,0.97,Alto,Block,529,18000

472,239.93,1,0,0.41,Medio,Review,0,18000
";

    #[test]
    fn test_header_discarded_and_blank_lines_skipped() {
        let records = read_transactions_from_reader(TRANSACTIONS.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].time, "0");
        assert_eq!(records[1].actual_class, FraudLabel::Fraud);
        assert_eq!(records[1].risk_level, RiskLevel::High);
        assert_eq!(records[1].action, Action::Block);
        assert_eq!(records[2].risk_level, RiskLevel::Medium);
        assert_eq!(records[2].fraud_probability, 0.41);
    }

    #[test]
    fn test_malformed_and_short_rows() {
        let input = "h1,h2,h3\nabc,xyz,1\n5\n";
        let records = read_transactions_from_reader(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, 0.0);
        assert_eq!(records[0].actual_class, FraudLabel::Fraud);
        assert_eq!(records[1].time, "5");
        assert_eq!(records[1].action, Action::Accept);
    }

    #[test]
    fn test_header_only_is_empty() {
        let records = read_transactions_from_reader("Time,Amount\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_lenient() {
        let mut input = b"h\n1,".to_vec();
        input.extend_from_slice(&[0xff, 0xfe]);
        input.extend_from_slice(b",1,1,0.9,Alto,Block,0,0\n");

        let records = read_transactions_from_reader(input.as_slice()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 0.0);
        assert_eq!(records[0].fraud_probability, 0.9);
    }

    #[test]
    fn test_economic_summary() {
        let input = "\
TP,FN,FP,TN,Detected,Lost,Cost,Net,ROI,Precision
80,12,40,9868,950000.5,120000,2160000,-1329999.5,-61.57,66.67
";
        let summary = read_economic_summary_from_reader(input.as_bytes())
            .unwrap()
            .unwrap();

        assert_eq!(summary.true_positives, 80);
        assert_eq!(summary.true_negatives, 9868);
        assert_eq!(summary.detected_amount, 950000.5);
        assert_eq!(summary.precision, 66.67);
    }

    #[test]
    fn test_economic_summary_without_data_row() {
        let summary = read_economic_summary_from_reader("TP,FN\n".as_bytes()).unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRANSACTIONS.as_bytes()).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.source(), Some(file.path()));
    }

    #[test]
    fn test_bundled_sample_matches_its_summary() {
        use crate::engine::compute_metrics;
        use crate::types::EconomicParameters;

        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let records = read_transactions(dir.join("fraud_results.csv")).unwrap();
        let summary = read_economic_summary(dir.join("economic_summary.csv"))
            .unwrap()
            .unwrap();

        let m = compute_metrics(&records, &EconomicParameters::new(0.5, 18000.0, 100.0));

        assert_eq!(m.total(), summary.total());
        assert_eq!(m.tp, summary.true_positives);
        assert_eq!(m.fn_count, summary.false_negatives);
        assert_eq!(m.fp, summary.false_positives);
        assert_eq!(m.tn, summary.true_negatives);
        assert!((m.detected_amount - summary.detected_amount).abs() < 0.01);
        assert!((m.lost_amount - summary.lost_amount).abs() < 0.01);
        assert!((m.net_benefit - summary.net_benefit).abs() < 0.01);
        assert!((m.roi - summary.roi_percent).abs() < 0.01);
        assert!((m.precision - summary.precision).abs() < 0.01);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_transactions("/nonexistent/results.csv").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/results.csv"));
    }
}

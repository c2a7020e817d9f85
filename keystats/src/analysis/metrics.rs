//! Set-overlap metrics between a groundtruth hot-key file and an
//! algorithm's detection result.
//!
//! Membership is a set predicate: duplicated rows in either file count
//! once, and row order never matters.

use std::fs::File;

use anyhow::Context;
use polars::error::PolarsError;
use polars::error::PolarsResult;
use polars::frame::DataFrame;
use serde::Serialize;
use tracing::info;

use crate::data_handling::KEYS_COLUMN;
use crate::helper_functions::key_set;
use crate::models::{polars_err, AlgorithmResult};

/// Fraction of result keys present in the groundtruth, expressed 0-100.
///
/// This is the precision of the result set; the legacy YCSB report calls
/// it the identification ratio. An empty result set leaves the ratio
/// undefined and fails the run rather than reporting zero.
pub fn coverage(df_gt: &DataFrame, df_result: &DataFrame) -> PolarsResult<f64> {
    let gt = key_set(df_gt, KEYS_COLUMN)?;
    let result = key_set(df_result, KEYS_COLUMN)?;
    if result.is_empty() {
        return Err(PolarsError::ComputeError(
            "result key set is empty, coverage is undefined".into(),
        ));
    }
    let hit = result.intersection(&gt).count();
    Ok(hit as f64 / result.len() as f64 * 100.0)
}

/// Recall and precision of one algorithm's hot-key set against the
/// groundtruth, both expressed 0-100.
///
/// Both ratios share the overlap as numerator; recall divides by the
/// groundtruth size, precision by the result-set size.
pub fn recall_and_precision(
    df_gt: &DataFrame,
    df_result: &DataFrame,
) -> PolarsResult<(f64, f64)> {
    let gt = key_set(df_gt, KEYS_COLUMN)?;
    let result = key_set(df_result, KEYS_COLUMN)?;
    if gt.is_empty() {
        return Err(PolarsError::ComputeError(
            "groundtruth key set is empty, recall is undefined".into(),
        ));
    }
    if result.is_empty() {
        return Err(PolarsError::ComputeError(
            "result key set is empty, precision is undefined".into(),
        ));
    }
    let hit = result.intersection(&gt).count();
    let recall = hit as f64 / gt.len() as f64 * 100.0;
    let precision = hit as f64 / result.len() as f64 * 100.0;
    Ok((recall, precision))
}

/// Hit / miss / false-positive breakdown consumed by the stacked bar chart.
pub fn classification_counts(
    df_gt: &DataFrame,
    df_result: &DataFrame,
    algorithm: &str,
) -> PolarsResult<AlgorithmResult> {
    let gt = key_set(df_gt, KEYS_COLUMN)?;
    let result = key_set(df_result, KEYS_COLUMN)?;
    if gt.is_empty() {
        return Err(PolarsError::ComputeError(
            "groundtruth key set is empty, classification shares are undefined".into(),
        ));
    }
    let hit = result.intersection(&gt).count();
    Ok(AlgorithmResult {
        algorithm: algorithm.to_string(),
        hit,
        miss: gt.len() - hit,
        false_positive: result.len() - hit,
        groundtruth_total: gt.len(),
    })
}

/// One line of the persisted per-algorithm summary.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub algorithm: String,
    pub hit: usize,
    pub miss: usize,
    pub false_positive: usize,
    pub recall_pct: f64,
    pub precision_pct: f64,
}

impl SummaryRow {
    pub fn new(counts: &AlgorithmResult, recall_pct: f64, precision_pct: f64) -> Self {
        SummaryRow {
            algorithm: counts.algorithm.clone(),
            hit: counts.hit,
            miss: counts.miss,
            false_positive: counts.false_positive,
            recall_pct,
            precision_pct,
        }
    }
}

/// Everything a run learned about one workload, in persistable form.
#[derive(Debug, Serialize)]
pub struct EvaluationSummary {
    pub workload: String,
    pub groundtruth_total: usize,
    pub algorithms: Vec<SummaryRow>,
}

/// Persist the summary as CSV and JSON next to the charts.
pub fn write_evaluation_summary(
    summary: &EvaluationSummary,
    csv_path: &str,
    json_path: &str,
) -> PolarsResult<()> {
    write_summary_csv(summary, csv_path).map_err(|e| polars_err(e.into()))?;
    write_summary_json(summary, json_path).map_err(|e| polars_err(e.into()))?;
    info!("Metrics summary saved to {} and {}", csv_path, json_path);
    Ok(())
}

fn write_summary_csv(summary: &EvaluationSummary, path: &str) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in &summary.algorithms {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_summary_json(summary: &EvaluationSummary, path: &str) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn groundtruth_and_result() -> (DataFrame, DataFrame) {
        let gt = df!["Keys" => &[1i64, 2, 3, 4, 5]].unwrap();
        let result = df!["Keys" => &[3i64, 4, 5, 6]].unwrap();
        (gt, result)
    }

    #[test]
    fn counts_and_rates_for_a_partial_overlap() {
        let (gt, result) = groundtruth_and_result();

        let counts = classification_counts(&gt, &result, "lru").unwrap();
        assert_eq!(counts.hit, 3);
        assert_eq!(counts.miss, 2);
        assert_eq!(counts.false_positive, 1);
        assert_eq!(counts.groundtruth_total, 5);

        let (recall, precision) = recall_and_precision(&gt, &result).unwrap();
        assert!((recall - 60.0).abs() < 1e-9);
        assert!((precision - 75.0).abs() < 1e-9);
        assert!((coverage(&gt, &result).unwrap() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn hits_and_misses_partition_the_groundtruth() {
        let (gt, result) = groundtruth_and_result();
        let counts = classification_counts(&gt, &result, "lfu").unwrap();
        assert_eq!(counts.hit + counts.miss, counts.groundtruth_total);
        assert_eq!(counts.result_total(), 4);
        assert_eq!(counts.stacked_total(), 6);
    }

    #[test]
    fn duplicated_rows_count_once() {
        let gt = df!["Keys" => &[1i64, 2]].unwrap();
        let result = df!["Keys" => &[2i64, 2, 2]].unwrap();
        let counts = classification_counts(&gt, &result, "window").unwrap();
        assert_eq!(counts.hit, 1);
        assert_eq!(counts.false_positive, 0);
        assert!((coverage(&gt, &result).unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_is_full_exactly_for_subsets() {
        let gt = df!["Keys" => &[1i64, 2, 3]].unwrap();
        let subset = df!["Keys" => &[1i64, 3]].unwrap();
        assert!((coverage(&gt, &subset).unwrap() - 100.0).abs() < 1e-9);

        let with_stray = df!["Keys" => &[1i64, 3, 9]].unwrap();
        assert!(coverage(&gt, &with_stray).unwrap() < 100.0);
    }

    #[test]
    fn integer_and_string_keys_compare_equal() {
        let gt = df!["Keys" => &["1", "2"]].unwrap();
        let result = df!["Keys" => &[1i64, 3]].unwrap();
        let counts = classification_counts(&gt, &result, "lirs").unwrap();
        assert_eq!(counts.hit, 1);
        assert_eq!(counts.miss, 1);
        assert_eq!(counts.false_positive, 1);
    }

    #[test]
    fn empty_groundtruth_is_an_error() {
        let gt = df!["Keys" => Vec::<i64>::new()].unwrap();
        let result = df!["Keys" => &[1i64]].unwrap();
        assert!(recall_and_precision(&gt, &result).is_err());
        assert!(classification_counts(&gt, &result, "lru").is_err());
    }

    #[test]
    fn empty_result_set_is_an_error() {
        let gt = df!["Keys" => &[1i64]].unwrap();
        let result = df!["Keys" => Vec::<i64>::new()].unwrap();
        assert!(recall_and_precision(&gt, &result).is_err());
        assert!(coverage(&gt, &result).is_err());
    }
}

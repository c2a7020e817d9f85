use std::collections::HashSet;
use std::path::PathBuf;

use polars::error::PolarsError;
use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::{CsvReadOptions, DataType, SerReader};

/// Read a headerless key-statistics CSV into a DataFrame whose columns are
/// named per `column_names`. Row order is preserved and dtypes are inferred
/// from the content, so integer keys load as integers.
pub fn read_key_stats_csv(file_path: &str, column_names: &[&str]) -> PolarsResult<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .try_into_reader_with_file_path(Some(PathBuf::from(file_path)))
        .map_err(|e| {
            PolarsError::ComputeError(format!("failed to open {file_path}: {e}").into())
        })?
        .finish()
        .map_err(|e| {
            PolarsError::ComputeError(format!("failed to parse {file_path}: {e}").into())
        })?;
    if df.width() != column_names.len() {
        return Err(PolarsError::ComputeError(
            format!(
                "{file_path} has {} columns, expected {} ({})",
                df.width(),
                column_names.len(),
                column_names.join(", ")
            )
            .into(),
        ));
    }
    df.set_column_names(column_names.iter().copied())?;
    Ok(df)
}

/// Collect a key column into a set of canonical string keys.
///
/// Casting to string first makes integer-keyed and string-keyed files
/// comparable. Duplicated rows collapse here, so every downstream metric is
/// a pure set predicate.
pub fn key_set(df: &DataFrame, column: &str) -> PolarsResult<HashSet<String>> {
    let keys = df.column(column)?.cast(&DataType::String)?;
    Ok(keys
        .str()?
        .into_no_null_iter()
        .map(|k| k.to_string())
        .collect())
}

/// Extract a numeric column as f64, casting when the reader inferred an
/// integer dtype.
pub fn column_as_f64(df: &DataFrame, column: &str) -> PolarsResult<Vec<f64>> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_no_null_iter().collect())
}

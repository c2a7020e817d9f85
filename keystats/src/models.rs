use std::error::Error;

use polars::error::PolarsError;
use polars::error::PolarsResult;
use polars::frame::DataFrame;

/// Wrap a foreign error into the polars error type the pipeline runs on.
pub fn polars_err(e: Box<dyn Error>) -> PolarsError {
    PolarsError::ComputeError(format!("{e}").into())
}

/// A key-statistics input file that can be loaded into a DataFrame.
pub trait Dataset {
    fn load(&self) -> PolarsResult<DataFrame>;
}

/// Classification of one algorithm's hot-key set against the groundtruth.
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub algorithm: String,
    /// Result keys that are in the groundtruth (true positives).
    pub hit: usize,
    /// Groundtruth keys the algorithm failed to report (false negatives).
    pub miss: usize,
    /// Result keys that are not in the groundtruth (false positives).
    pub false_positive: usize,
    /// Distinct keys in the groundtruth set.
    pub groundtruth_total: usize,
}

impl AlgorithmResult {
    /// Distinct keys the algorithm reported.
    pub fn result_total(&self) -> usize {
        self.hit + self.false_positive
    }

    /// Height of the algorithm's bar in the stacked chart.
    pub fn stacked_total(&self) -> usize {
        self.hit + self.miss + self.false_positive
    }
}

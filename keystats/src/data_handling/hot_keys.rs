use polars::error::PolarsResult;
use polars::frame::DataFrame;

use crate::data_handling::KEYS_COLUMN;
use crate::helper_functions::read_key_stats_csv;
use crate::models::Dataset;

/// Single-column hot-key file: the groundtruth set or one algorithm's
/// detection result.
pub struct HotKeyDataset {
    pub path: String,
}

impl Dataset for HotKeyDataset {
    fn load(&self) -> PolarsResult<DataFrame> {
        read_key_stats_csv(&self.path, &[KEYS_COLUMN])
    }
}

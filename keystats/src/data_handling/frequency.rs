use polars::error::PolarsResult;
use polars::frame::DataFrame;

use crate::data_handling::{FREQUENCIES_COLUMN, KEYS_COLUMN};
use crate::helper_functions::read_key_stats_csv;
use crate::models::Dataset;

/// Two-column key/frequency distribution file, one row per key in the
/// order the measurement harness wrote them.
pub struct FrequencyDataset {
    pub path: String,
}

impl Dataset for FrequencyDataset {
    fn load(&self) -> PolarsResult<DataFrame> {
        read_key_stats_csv(&self.path, &[KEYS_COLUMN, FREQUENCIES_COLUMN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_keys_with_their_frequencies() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"user1,42\nuser2,7\n").expect("write csv");

        let dataset = FrequencyDataset {
            path: file.path().to_str().unwrap().to_string(),
        };
        let df = dataset.load().unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.get_column_names_str(), &[KEYS_COLUMN, FREQUENCIES_COLUMN]);
    }
}

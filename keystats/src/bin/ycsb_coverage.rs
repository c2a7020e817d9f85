//! Legacy coverage report for the YCSB measurement layout: fixed file
//! names in the working directory, coverage only, no charts.

use polars::error::PolarsResult;
use tracing_subscriber::EnvFilter;

use keystats::analysis::metrics::coverage;
use keystats::data_handling::hot_keys::HotKeyDataset;
use keystats::models::Dataset;

const ALGORITHMS: &[&str] = &["lruk", "window", "sketch"];
const GROUNDTRUTH_FILE: &str = "./key_stats_hotkeys.csv";

fn main() -> PolarsResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let groundtruth = HotKeyDataset {
        path: GROUNDTRUTH_FILE.to_string(),
    }
    .load()?;

    for algorithm in ALGORITHMS {
        let result = HotKeyDataset {
            path: format!("./hotkeys_{algorithm}.csv"),
        }
        .load()?;
        let ratio = coverage(&groundtruth, &result)?;
        println!("{algorithm}: \n - Hot keys identified ratio: {ratio:.2}%");
    }

    Ok(())
}

//! Workload-derived file layout.
//!
//! Every input and output of a run is keyed off a single workload prefix.
//! Resolving the prefix into explicit paths once keeps the rest of the
//! pipeline free of filename arithmetic.

/// Detection algorithms evaluated by the main driver, in report order.
pub const ALGORITHMS: &[&str] = &[
    "lru",
    "lfu",
    "lruk",
    "window",
    "sketch_window",
    "w_tinylfu",
    "lirs",
];

/// Input and output paths for one workload evaluation run.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub workload: String,
    pub output_dir: String,
    pub groundtruth_path: String,
    /// `(algorithm, hot-key result file)` pairs in evaluation order.
    pub result_paths: Vec<(String, String)>,
    pub ordered_frequency_path: String,
    pub descending_frequency_path: String,
}

impl WorkloadConfig {
    /// Resolve the standard layout for a workload prefix, reading inputs
    /// from and writing charts to the current directory, which is where the
    /// measurement harness leaves its CSV files.
    pub fn for_workload(workload: &str) -> Self {
        Self::with_dirs(workload, ".", ".")
    }

    pub fn with_dirs(workload: &str, data_dir: &str, output_dir: &str) -> Self {
        let result_paths = ALGORITHMS
            .iter()
            .map(|algo| {
                (
                    (*algo).to_string(),
                    format!("{data_dir}/{workload}_hotkeys_{algo}.csv"),
                )
            })
            .collect();
        WorkloadConfig {
            workload: workload.to_string(),
            output_dir: output_dir.to_string(),
            groundtruth_path: format!("{data_dir}/{workload}_key_stats_hotkeys.csv"),
            result_paths,
            ordered_frequency_path: format!("{data_dir}/{workload}_key_stats_dict_ordered.csv"),
            descending_frequency_path: format!("{data_dir}/{workload}_key_stats_descend.csv"),
        }
    }

    pub fn venn_output_path(&self, algorithm: &str) -> String {
        format!("{}/{}_venn_{}.png", self.output_dir, self.workload, algorithm)
    }

    pub fn stacked_barchart_output_path(&self) -> String {
        format!(
            "{}/{}_stacked_barchart_comparison.png",
            self.output_dir, self.workload
        )
    }

    pub fn key_frequency_output_path(&self) -> String {
        format!("{}/{}_key_frequency.png", self.output_dir, self.workload)
    }

    pub fn frequency_descend_output_path(&self) -> String {
        format!("{}/{}_frequency_descend.png", self.output_dir, self.workload)
    }

    pub fn summary_csv_path(&self) -> String {
        format!("{}/{}_metrics_summary.csv", self.output_dir, self.workload)
    }

    pub fn summary_json_path(&self) -> String {
        format!("{}/{}_metrics_summary.json", self.output_dir, self.workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_follows_the_prefix() {
        let config = WorkloadConfig::for_workload("workloada");
        assert_eq!(config.groundtruth_path, "./workloada_key_stats_hotkeys.csv");
        assert_eq!(
            config.ordered_frequency_path,
            "./workloada_key_stats_dict_ordered.csv"
        );
        assert_eq!(
            config.descending_frequency_path,
            "./workloada_key_stats_descend.csv"
        );
        assert_eq!(config.result_paths.len(), ALGORITHMS.len());
        assert_eq!(config.result_paths[0].0, "lru");
        assert_eq!(config.result_paths[0].1, "./workloada_hotkeys_lru.csv");
        assert_eq!(
            config.venn_output_path("lirs"),
            "./workloada_venn_lirs.png"
        );
        assert_eq!(
            config.stacked_barchart_output_path(),
            "./workloada_stacked_barchart_comparison.png"
        );
    }

    #[test]
    fn directories_are_honoured() {
        let config = WorkloadConfig::with_dirs("zipf", "/data/in", "/data/out");
        assert_eq!(config.groundtruth_path, "/data/in/zipf_key_stats_hotkeys.csv");
        assert_eq!(config.summary_csv_path(), "/data/out/zipf_metrics_summary.csv");
        assert_eq!(config.summary_json_path(), "/data/out/zipf_metrics_summary.json");
    }

    #[test]
    fn evaluation_order_is_stable() {
        assert_eq!(
            ALGORITHMS,
            &["lru", "lfu", "lruk", "window", "sketch_window", "w_tinylfu", "lirs"]
        );
    }
}

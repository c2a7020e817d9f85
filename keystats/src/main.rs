use clap::Parser;
use polars::error::PolarsResult;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keystats::analysis::frequency_line::plot_frequency_line;
use keystats::analysis::metrics::{
    classification_counts, recall_and_precision, write_evaluation_summary, EvaluationSummary,
    SummaryRow,
};
use keystats::analysis::stacked_bar::plot_stacked_barchart;
use keystats::analysis::venn::plot_venn_diagram;
use keystats::config::WorkloadConfig;
use keystats::data_handling::frequency::FrequencyDataset;
use keystats::data_handling::hot_keys::HotKeyDataset;
use keystats::models::Dataset;

/// Evaluate hot-key detection results against the groundtruth distribution
/// of one workload and render the comparison charts.
#[derive(Debug, Parser)]
#[command(name = "keystats")]
struct Cli {
    /// Workload prefix shared by every input file, e.g. `workloada` for
    /// `workloada_key_stats_hotkeys.csv`.
    workload: String,
}

fn main() -> PolarsResult<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    println!("Workload prefix: {}", cli.workload);

    let config = WorkloadConfig::for_workload(&cli.workload);
    let groundtruth = HotKeyDataset {
        path: config.groundtruth_path.clone(),
    }
    .load()?;

    let mut results = Vec::with_capacity(config.result_paths.len());
    let mut summary_rows = Vec::with_capacity(config.result_paths.len());

    for (algorithm, result_path) in &config.result_paths {
        info!("Evaluating {}", algorithm);
        let result = HotKeyDataset {
            path: result_path.clone(),
        }
        .load()?;

        let (recall, precision) = recall_and_precision(&groundtruth, &result)?;
        println!("{algorithm}: \n - Recall: {recall:.2}%\n - Precision: {precision:.2}%");

        let counts = classification_counts(&groundtruth, &result, algorithm)?;
        summary_rows.push(SummaryRow::new(&counts, recall, precision));

        plot_venn_diagram(
            &groundtruth,
            &result,
            algorithm,
            &config.venn_output_path(algorithm),
        )?;
        results.push(counts);
    }

    plot_stacked_barchart(&results, &config.stacked_barchart_output_path())?;

    let ordered = FrequencyDataset {
        path: config.ordered_frequency_path.clone(),
    }
    .load()?;
    plot_frequency_line(&ordered, &config.key_frequency_output_path(), false)?;

    let descending = FrequencyDataset {
        path: config.descending_frequency_path.clone(),
    }
    .load()?;
    plot_frequency_line(&descending, &config.frequency_descend_output_path(), false)?;

    let summary = EvaluationSummary {
        workload: config.workload.clone(),
        groundtruth_total: results
            .first()
            .map(|r| r.groundtruth_total)
            .unwrap_or(0),
        algorithms: summary_rows,
    };
    write_evaluation_summary(
        &summary,
        &config.summary_csv_path(),
        &config.summary_json_path(),
    )?;

    info!("Evaluation finished for workload {}", config.workload);
    Ok(())
}

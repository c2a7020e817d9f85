//! Line chart of a key-frequency distribution with the global peak marked.

use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use polars::error::PolarsError;
use polars::error::PolarsResult;
use polars::frame::DataFrame;
use tracing::info;

use crate::data_handling::FREQUENCIES_COLUMN;
use crate::helper_functions::column_as_f64;
use crate::models::polars_err;

const PLOT_WIDTH: u32 = 1200;
const PLOT_HEIGHT: u32 = 600;

/// Fraction of leading rows kept when plotting only the head of a
/// distribution sorted by descending frequency.
const PARTIAL_FRACTION: f64 = 0.0001;

/// Index and value of the first global maximum.
pub fn peak_frequency(frequencies: &[f64]) -> Option<(usize, f64)> {
    let mut peak: Option<(usize, f64)> = None;
    for (idx, &value) in frequencies.iter().enumerate() {
        if peak.map_or(true, |(_, best)| value > best) {
            peak = Some((idx, value));
        }
    }
    peak
}

fn partial_row_count(total_rows: usize) -> usize {
    ((total_rows as f64 * PARTIAL_FRACTION) as usize).max(1)
}

/// Plot the frequency column against row position and annotate the peak
/// with a marker, a dashed guide line and its exact value.
///
/// With `partial` set only the first 0.01% of rows (at least one) are
/// drawn, which zooms into the hot head of a Zipfian distribution.
pub fn plot_frequency_line(df: &DataFrame, output_path: &str, partial: bool) -> PolarsResult<()> {
    let mut frequencies = column_as_f64(df, FREQUENCIES_COLUMN)?;
    if partial {
        frequencies.truncate(partial_row_count(frequencies.len()));
    }
    let Some((peak_idx, peak_value)) = peak_frequency(&frequencies) else {
        return Err(PolarsError::ComputeError(
            "frequency table is empty, nothing to plot".into(),
        ));
    };

    let title = if partial {
        "Frequency Distribution of Keys (Top-0.01%), Zipfian"
    } else {
        "Frequency Distribution of Keys"
    };
    let caption_font = ("sans-serif", 19);
    let axis_font = ("sans-serif", 17);
    let annotation_font = ("sans-serif", 14);

    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| polars_err(Box::new(e)))?;

    let x_max = frequencies.len() as f64;
    let y_max = (peak_value * 1.05).max(1.0);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, caption_font)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(|e| polars_err(Box::new(e)))?;

    // Key identifiers make no sense as tick labels, the x axis stays bare.
    chart
        .configure_mesh()
        .x_labels(0)
        .x_desc("Key Space")
        .y_desc("Frequency")
        .axis_desc_style(axis_font)
        .label_style(annotation_font)
        .light_line_style(BLACK.mix(0.1))
        .draw()
        .map_err(|e| polars_err(Box::new(e)))?;

    chart
        .draw_series(LineSeries::new(
            frequencies
                .iter()
                .enumerate()
                .map(|(idx, &value)| (idx as f64, value)),
            BLUE.stroke_width(2),
        ))
        .map_err(|e| polars_err(Box::new(e)))?;

    chart
        .draw_series(std::iter::once(Circle::new(
            (peak_idx as f64, peak_value),
            6,
            RED.filled(),
        )))
        .map_err(|e| polars_err(Box::new(e)))?;

    // Horizontal guide at the peak height, dashed by short segments.
    let dash_step = x_max / 60.0;
    let mut dash_x = 0.0;
    while dash_x < x_max {
        let dash_end = (dash_x + dash_step * 0.6).min(x_max);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(dash_x, peak_value), (dash_end, peak_value)],
                RGBColor(128, 128, 128).mix(0.7).stroke_width(1),
            )))
            .map_err(|e| polars_err(Box::new(e)))?;
        dash_x += dash_step;
    }

    // Exact peak value sits right-aligned against the left margin, at the
    // height of the guide line.
    let (peak_px, peak_py) = chart.backend_coord(&(0.0, peak_value));
    root.draw(&Text::new(
        format!("{peak_value:.0}"),
        (peak_px - 6, peak_py),
        annotation_font
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center)),
    ))
    .map_err(|e| polars_err(Box::new(e)))?;

    root.present().map_err(|e| polars_err(Box::new(e)))?;
    info!("Frequency line chart saved to: {}", output_path);
    Ok(())
}

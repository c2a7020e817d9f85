//! Stacked hit / miss / false-positive comparison across all algorithms.

use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use polars::error::PolarsError;
use polars::error::PolarsResult;
use tracing::{info, warn};

use super::{COLOR_GREEN, COLOR_RED, COLOR_YELLOW, FILL_ALPHA};
use crate::models::{polars_err, AlgorithmResult};

const PLOT_WIDTH: u32 = 3600;
const PLOT_HEIGHT: u32 = 2400;
const BAR_WIDTH: f64 = 0.7;

/// One bar per algorithm, segments stacked bottom-up as hit, miss, false
/// positive. A dashed guide marks the groundtruth size, which every bar's
/// hit plus miss segments add up to.
pub fn plot_stacked_barchart(
    results: &[AlgorithmResult],
    output_path: &str,
) -> PolarsResult<()> {
    if results.is_empty() {
        return Err(PolarsError::ComputeError(
            "no algorithm results to plot".into(),
        ));
    }
    if results
        .iter()
        .any(|r| r.groundtruth_total != results[0].groundtruth_total)
    {
        warn!("algorithm results disagree on the groundtruth size, the guide line follows the first");
    }
    let gt_total = results[0].groundtruth_total as f64;
    let tallest = results
        .iter()
        .map(AlgorithmResult::stacked_total)
        .max()
        .unwrap_or(0) as f64;
    let bar_count = results.len();
    let x_lo = -0.5;
    let x_hi = bar_count as f64 - 0.5;
    let y_max = tallest * 1.2;

    let caption_font = ("sans-serif", 67);
    let axis_font = ("sans-serif", 50);
    let legend_font = ("sans-serif", 58);
    let annotation_font = ("sans-serif", 42);

    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| polars_err(Box::new(e)))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Stacked Comparison of Different Algorithms", caption_font)
        .margin(40)
        .x_label_area_size(100)
        .y_label_area_size(160)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_max)
        .map_err(|e| polars_err(Box::new(e)))?;

    let names: Vec<String> = results.iter().map(|r| r.algorithm.clone()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(BLACK.mix(0.15))
        .x_labels(bar_count)
        .x_label_formatter(&|value: &f64| {
            let idx = value.round();
            if idx < 0.0 || (value - idx).abs() > 0.3 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_desc("Key Count")
        .axis_desc_style(axis_font)
        .label_style(axis_font)
        .draw()
        .map_err(|e| polars_err(Box::new(e)))?;

    let bar = |idx: usize, y0: f64, y1: f64, color: RGBColor| {
        let x = idx as f64;
        Rectangle::new(
            [(x - BAR_WIDTH / 2.0, y0), (x + BAR_WIDTH / 2.0, y1)],
            color.mix(FILL_ALPHA).filled(),
        )
    };

    chart
        .draw_series(
            results
                .iter()
                .enumerate()
                .map(|(i, r)| bar(i, 0.0, r.hit as f64, COLOR_GREEN)),
        )
        .map_err(|e| polars_err(Box::new(e)))?
        .label("Hit: Correctly Identified (TP)")
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 14), (x + 36, y + 14)], COLOR_GREEN.mix(FILL_ALPHA).filled())
        });
    chart
        .draw_series(results.iter().enumerate().map(|(i, r)| {
            bar(i, r.hit as f64, (r.hit + r.miss) as f64, COLOR_YELLOW)
        }))
        .map_err(|e| polars_err(Box::new(e)))?
        .label("Miss: Not Identified (FN)")
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 14), (x + 36, y + 14)], COLOR_YELLOW.mix(FILL_ALPHA).filled())
        });
    chart
        .draw_series(results.iter().enumerate().map(|(i, r)| {
            bar(i, (r.hit + r.miss) as f64, r.stacked_total() as f64, COLOR_RED)
        }))
        .map_err(|e| polars_err(Box::new(e)))?
        .label("False: Wrongly Identified (FP)")
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 14), (x + 36, y + 14)], COLOR_RED.mix(FILL_ALPHA).filled())
        });

    // Groundtruth guide line across the full width, dashed by short segments.
    let dash_step = (x_hi - x_lo) / 60.0;
    let mut dash_x = x_lo;
    while dash_x < x_hi {
        let dash_end = (dash_x + dash_step * 0.6).min(x_hi);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(dash_x, gt_total), (dash_end, gt_total)],
                RGBColor(128, 128, 128).mix(0.7).stroke_width(2),
            )))
            .map_err(|e| polars_err(Box::new(e)))?;
        dash_x += dash_step;
    }

    // Per-segment tags: count on the upper line, share of the groundtruth
    // set on the lower one.
    let tag_upper = ("sans-serif", 50)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let tag_lower = ("sans-serif", 50)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let total_font = FontDesc::new(FontFamily::SansSerif, 50.0, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let line_gap = y_max * 0.004;

    for (i, r) in results.iter().enumerate() {
        let x = i as f64;
        let segments = [
            ("TP", r.hit, r.hit as f64 / 2.0),
            ("FN", r.miss, r.hit as f64 + r.miss as f64 / 2.0),
            (
                "FP",
                r.false_positive,
                (r.hit + r.miss) as f64 + r.false_positive as f64 / 2.0,
            ),
        ];
        for (tag, count, y_centre) in segments {
            let share = count as f64 / gt_total * 100.0;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{tag}: {count}"),
                    (x, y_centre + line_gap),
                    tag_upper.clone(),
                )))
                .map_err(|e| polars_err(Box::new(e)))?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("({share:.1}%)"),
                    (x, y_centre - line_gap),
                    tag_lower.clone(),
                )))
                .map_err(|e| polars_err(Box::new(e)))?;
        }
        chart
            .draw_series(std::iter::once(Text::new(
                format!("Total: {}", r.stacked_total()),
                (x, r.stacked_total() as f64 + 0.1 * gt_total),
                total_font.clone(),
            )))
            .map_err(|e| polars_err(Box::new(e)))?;
    }

    // Groundtruth size, right-aligned against the left margin at the guide
    // line's height.
    let (gt_px, gt_py) = chart.backend_coord(&(x_lo, gt_total));
    root.draw(&Text::new(
        format!("{}", gt_total as usize),
        (gt_px - 10, gt_py),
        annotation_font
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center)),
    ))
    .map_err(|e| polars_err(Box::new(e)))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(legend_font)
        .legend_area_size(50)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(|e| polars_err(Box::new(e)))?;

    root.present().map_err(|e| polars_err(Box::new(e)))?;
    info!("Stacked bar chart saved to: {}", output_path);
    Ok(())
}

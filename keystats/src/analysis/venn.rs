//! Two-set Venn diagram of groundtruth keys against one algorithm's result.
//!
//! Circle areas are proportional to the set cardinalities and the centre
//! distance is solved so the lens area matches the overlap cardinality.
//! Regions are rendered as sampled polygons because the backend has no
//! circle-intersection primitive.

use std::collections::HashSet;
use std::f64::consts::PI;

use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use polars::error::PolarsResult;
use polars::frame::DataFrame;
use tracing::info;

use super::{COLOR_GREEN, COLOR_RED, COLOR_YELLOW, FILL_ALPHA};
use crate::data_handling::KEYS_COLUMN;
use crate::helper_functions::key_set;
use crate::models::polars_err;

const PLOT_SIZE: u32 = 2400;
const MARGIN: f64 = 100.0;
const TITLE_BAND: f64 = 140.0;
const ARC_STEPS: usize = 128;

/// `(groundtruth-only, result-only, intersection)` cardinalities.
pub fn subset_counts(
    df_gt: &DataFrame,
    df_result: &DataFrame,
) -> PolarsResult<(usize, usize, usize)> {
    let gt: HashSet<String> = key_set(df_gt, KEYS_COLUMN)?;
    let result: HashSet<String> = key_set(df_result, KEYS_COLUMN)?;
    let intersection = gt.intersection(&result).count();
    Ok((
        gt.len() - intersection,
        result.len() - intersection,
        intersection,
    ))
}

/// Circle placement in diagram coordinates: the left circle sits at the
/// origin, the right circle at `(distance, 0)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VennLayout {
    pub left_radius: f64,
    pub right_radius: f64,
    pub distance: f64,
}

/// Area of the lens shared by two circles whose centres are `distance`
/// apart.
pub(crate) fn lens_area(r1: f64, r2: f64, distance: f64) -> f64 {
    if distance >= r1 + r2 {
        return 0.0;
    }
    let smaller = r1.min(r2);
    if distance <= (r1 - r2).abs() {
        return PI * smaller * smaller;
    }
    let d = distance;
    let alpha1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1))
        .clamp(-1.0, 1.0)
        .acos();
    let alpha2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2))
        .clamp(-1.0, 1.0)
        .acos();
    let triangle = 0.5
        * ((-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2))
            .max(0.0)
            .sqrt();
    r1 * r1 * alpha1 + r2 * r2 * alpha2 - triangle
}

/// Solve circle radii and centre distance so both circle areas and the
/// lens area match the given set areas.
pub(crate) fn solve_layout(
    left_area: f64,
    right_area: f64,
    intersection_area: f64,
) -> VennLayout {
    let r1 = (left_area / PI).sqrt();
    let r2 = (right_area / PI).sqrt();
    if r1 == 0.0 || r2 == 0.0 {
        return VennLayout {
            left_radius: r1,
            right_radius: r2,
            distance: (r1 + r2).max(1e-3),
        };
    }
    let max_lens = PI * r1.min(r2) * r1.min(r2);
    if intersection_area <= 0.0 {
        // Disjoint sets get a small visual gap.
        return VennLayout {
            left_radius: r1,
            right_radius: r2,
            distance: (r1 + r2) * 1.05,
        };
    }
    // Integer cardinalities keep a proper overlap at least 1.0 below
    // max_lens, the tolerance only absorbs rounding.
    if intersection_area >= max_lens * (1.0 - 1e-12) {
        // One set contains the other, nest the smaller circle.
        return VennLayout {
            left_radius: r1,
            right_radius: r2,
            distance: (r1 - r2).abs() * 0.6,
        };
    }
    // The lens area shrinks monotonically as the centres move apart.
    let mut lo = (r1 - r2).abs();
    let mut hi = r1 + r2;
    for _ in 0..64 {
        let mid = 0.5 * (lo + hi);
        if lens_area(r1, r2, mid) > intersection_area {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    VennLayout {
        left_radius: r1,
        right_radius: r2,
        distance: 0.5 * (lo + hi),
    }
}

fn arc_points(
    cx: f64,
    cy: f64,
    r: f64,
    start: f64,
    end: f64,
) -> impl Iterator<Item = (f64, f64)> {
    (0..=ARC_STEPS).map(move |i| {
        let t = start + (end - start) * (i as f64 / ARC_STEPS as f64);
        (cx + r * t.cos(), cy + r * t.sin())
    })
}

fn circle_polygon(cx: f64, cy: f64, r: f64) -> Vec<(f64, f64)> {
    arc_points(cx, cy, r, 0.0, 2.0 * PI).collect()
}

/// Angles from each centre to the circle intersection points.
fn intersection_angles(r1: f64, r2: f64, d: f64) -> (f64, f64) {
    let alpha1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1))
        .clamp(-1.0, 1.0)
        .acos();
    let alpha2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2))
        .clamp(-1.0, 1.0)
        .acos();
    (alpha1, alpha2)
}

fn lens_polygon(r1: f64, r2: f64, d: f64) -> Vec<(f64, f64)> {
    let (alpha1, alpha2) = intersection_angles(r1, r2, d);
    let mut points: Vec<(f64, f64)> = arc_points(0.0, 0.0, r1, -alpha1, alpha1).collect();
    points.extend(arc_points(d, 0.0, r2, PI - alpha2, PI + alpha2));
    points
}

fn left_crescent_polygon(r1: f64, r2: f64, d: f64) -> Vec<(f64, f64)> {
    let (alpha1, alpha2) = intersection_angles(r1, r2, d);
    let mut points: Vec<(f64, f64)> =
        arc_points(0.0, 0.0, r1, alpha1, 2.0 * PI - alpha1).collect();
    points.extend(arc_points(d, 0.0, r2, PI + alpha2, PI - alpha2));
    points
}

fn right_crescent_polygon(r1: f64, r2: f64, d: f64) -> Vec<(f64, f64)> {
    let (alpha1, alpha2) = intersection_angles(r1, r2, d);
    let mut points: Vec<(f64, f64)> =
        arc_points(d, 0.0, r2, alpha2 - PI, PI - alpha2).collect();
    points.extend(arc_points(0.0, 0.0, r1, alpha1, -alpha1));
    points
}

/// Render the diagram for one algorithm and save it as a PNG.
pub fn plot_venn_diagram(
    df_gt: &DataFrame,
    df_result: &DataFrame,
    algorithm: &str,
    output_path: &str,
) -> PolarsResult<()> {
    let (left_only, right_only, intersection) = subset_counts(df_gt, df_result)?;
    let left_total = left_only + intersection;
    let right_total = right_only + intersection;
    let layout = solve_layout(
        left_total as f64,
        right_total as f64,
        intersection as f64,
    );

    let root = BitMapBackend::new(output_path, (PLOT_SIZE, PLOT_SIZE)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| polars_err(Box::new(e)))?;

    let title_font = ("sans-serif", 58)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        format!("Key Coverage: {algorithm} vs Groundtruth"),
        ((PLOT_SIZE / 2) as i32, (TITLE_BAND / 2.0) as i32),
        title_font,
    ))
    .map_err(|e| polars_err(Box::new(e)))?;

    if left_total == 0 && right_total == 0 {
        root.present().map_err(|e| polars_err(Box::new(e)))?;
        info!("Venn diagram saved to: {}", output_path);
        return Ok(());
    }

    let (r1, r2, d) = (layout.left_radius, layout.right_radius, layout.distance);
    let r_max = r1.max(r2);

    // Diagram bounds with room for the set labels below the circles.
    let x_min = (-r1).min(d - r2);
    let x_max = r1.max(d + r2);
    let y_min = -(r_max * 1.3);
    let y_max = r_max * 1.05;
    let x_span = x_max - x_min;
    let y_span = y_max - y_min;

    let avail_w = PLOT_SIZE as f64 - 2.0 * MARGIN;
    let avail_h = PLOT_SIZE as f64 - TITLE_BAND - 2.0 * MARGIN;
    let scale = (avail_w / x_span).min(avail_h / y_span);
    let x_mid = 0.5 * (x_min + x_max);
    let y_mid = 0.5 * (y_min + y_max);
    let centre_x = PLOT_SIZE as f64 / 2.0;
    let centre_y = TITLE_BAND + MARGIN + avail_h / 2.0;
    let map = |x: f64, y: f64| -> (i32, i32) {
        (
            (centre_x + (x - x_mid) * scale).round() as i32,
            (centre_y - (y - y_mid) * scale).round() as i32,
        )
    };
    let map_polygon =
        |points: Vec<(f64, f64)>| -> Vec<(i32, i32)> { points.iter().map(|&(x, y)| map(x, y)).collect() };

    let yellow = COLOR_YELLOW.mix(FILL_ALPHA).filled();
    let red = COLOR_RED.mix(FILL_ALPHA).filled();
    let green = COLOR_GREEN.mix(FILL_ALPHA).filled();

    // Region label anchors on the horizontal axis, None when the region is
    // empty or absent.
    let mut left_label_x = None;
    let mut right_label_x = None;
    let mut lens_label_x = None;

    if r1 == 0.0 || r2 == 0.0 {
        // One side is empty, only the other circle exists.
        if r1 > 0.0 {
            root.draw(&Polygon::new(map_polygon(circle_polygon(0.0, 0.0, r1)), yellow))
                .map_err(|e| polars_err(Box::new(e)))?;
            left_label_x = Some(0.0);
        }
        if r2 > 0.0 {
            root.draw(&Polygon::new(map_polygon(circle_polygon(d, 0.0, r2)), red))
                .map_err(|e| polars_err(Box::new(e)))?;
            right_label_x = Some(d);
        }
    } else if d >= r1 + r2 - 1e-12 {
        root.draw(&Polygon::new(map_polygon(circle_polygon(0.0, 0.0, r1)), yellow))
            .map_err(|e| polars_err(Box::new(e)))?;
        root.draw(&Polygon::new(map_polygon(circle_polygon(d, 0.0, r2)), red))
            .map_err(|e| polars_err(Box::new(e)))?;
        left_label_x = Some(0.0);
        right_label_x = Some(d);
    } else if d <= (r1 - r2).abs() + 1e-12 {
        // Nested circles: the inner circle is exactly the intersection.
        if r1 >= r2 {
            root.draw(&Polygon::new(map_polygon(circle_polygon(0.0, 0.0, r1)), yellow))
                .map_err(|e| polars_err(Box::new(e)))?;
            root.draw(&Polygon::new(map_polygon(circle_polygon(d, 0.0, r2)), green))
                .map_err(|e| polars_err(Box::new(e)))?;
            left_label_x = Some(0.5 * (-r1 + d - r2));
            lens_label_x = Some(d);
        } else {
            root.draw(&Polygon::new(map_polygon(circle_polygon(d, 0.0, r2)), red))
                .map_err(|e| polars_err(Box::new(e)))?;
            root.draw(&Polygon::new(map_polygon(circle_polygon(0.0, 0.0, r1)), green))
                .map_err(|e| polars_err(Box::new(e)))?;
            right_label_x = Some(0.5 * (r1 + d + r2));
            lens_label_x = Some(0.0);
        }
    } else {
        root.draw(&Polygon::new(map_polygon(left_crescent_polygon(r1, r2, d)), yellow))
            .map_err(|e| polars_err(Box::new(e)))?;
        root.draw(&Polygon::new(map_polygon(right_crescent_polygon(r1, r2, d)), red))
            .map_err(|e| polars_err(Box::new(e)))?;
        root.draw(&Polygon::new(map_polygon(lens_polygon(r1, r2, d)), green))
            .map_err(|e| polars_err(Box::new(e)))?;
        left_label_x = Some(0.5 * (-r1 + d - r2));
        right_label_x = Some(0.5 * (r1 + d + r2));
        lens_label_x = Some(0.5 * (d - r2 + r1));
    }

    let count_font = ("sans-serif", 50)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let draw_count = |x: Option<f64>, count: usize| -> PolarsResult<()> {
        // Zero counts stay unlabelled.
        let Some(x) = x else { return Ok(()) };
        if count == 0 {
            return Ok(());
        }
        root.draw(&Text::new(format!("{count}"), map(x, 0.0), count_font.clone()))
            .map_err(|e| polars_err(Box::new(e)))
    };
    draw_count(left_label_x, left_only)?;
    draw_count(right_label_x, right_only)?;
    draw_count(lens_label_x, intersection)?;

    let set_font = ("sans-serif", 50)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    if left_total > 0 {
        root.draw(&Text::new(
            "Groundtruth Keys",
            map(0.0, -(r1 + 0.12 * r_max)),
            set_font.clone(),
        ))
        .map_err(|e| polars_err(Box::new(e)))?;
    }
    if right_total > 0 {
        root.draw(&Text::new(
            format!("{algorithm} Results"),
            map(d, -(r2 + 0.12 * r_max)),
            set_font,
        ))
        .map_err(|e| polars_err(Box::new(e)))?;
    }

    root.present().map_err(|e| polars_err(Box::new(e)))?;
    info!("Venn diagram saved to: {}", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics::classification_counts;
    use polars::df;

    #[test]
    fn lens_area_covers_the_limit_cases() {
        assert_eq!(lens_area(1.0, 1.0, 2.0), 0.0);
        assert!((lens_area(1.0, 1.0, 0.0) - PI).abs() < 1e-9);
        assert!((lens_area(2.0, 1.0, 0.5) - PI).abs() < 1e-9);
    }

    #[test]
    fn solved_distance_reproduces_the_intersection_area() {
        let layout = solve_layout(50.0, 40.0, 10.0);
        let lens = lens_area(layout.left_radius, layout.right_radius, layout.distance);
        assert!((lens - 10.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_sets_get_separated_circles() {
        let layout = solve_layout(30.0, 20.0, 0.0);
        assert!(layout.distance > layout.left_radius + layout.right_radius);
    }

    #[test]
    fn subsets_nest_the_smaller_circle() {
        let layout = solve_layout(50.0, 10.0, 10.0);
        assert!(layout.distance <= layout.left_radius - layout.right_radius);
        let lens = lens_area(layout.left_radius, layout.right_radius, layout.distance);
        assert!((lens - 10.0).abs() < 1e-9);
    }

    #[test]
    fn subset_counts_agree_with_the_classification() {
        let gt = df!["Keys" => &[1i64, 2, 3, 4, 5]].unwrap();
        let result = df!["Keys" => &[3i64, 4, 5, 6]].unwrap();

        let (left_only, right_only, intersection) = subset_counts(&gt, &result).unwrap();
        let counts = classification_counts(&gt, &result, "lru").unwrap();
        assert_eq!(intersection, counts.hit);
        assert_eq!(left_only, counts.miss);
        assert_eq!(right_only, counts.false_positive);
    }

    #[test]
    fn region_polygons_meet_at_the_circle_intersection_points() {
        let layout = solve_layout(50.0, 40.0, 10.0);
        let (r1, r2, d) = (layout.left_radius, layout.right_radius, layout.distance);

        // Lower intersection point from the circle equations.
        let px = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
        let py = -(r1 * r1 - px * px).sqrt();

        let lens_start = *lens_polygon(r1, r2, d).first().unwrap();
        let right_start = *right_crescent_polygon(r1, r2, d).first().unwrap();
        assert!((lens_start.0 - px).abs() < 1e-6);
        assert!((lens_start.1 - py).abs() < 1e-6);
        assert!((right_start.0 - px).abs() < 1e-6);
        assert!((right_start.1 - py).abs() < 1e-6);
    }
}

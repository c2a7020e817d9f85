pub mod frequency_line;
pub mod metrics;
pub mod stacked_bar;
pub mod venn;

use plotters::style::RGBColor;

/// Shared chart palette: yellow for missed keys, red for wrongly identified
/// keys, green for correctly identified keys.
pub(crate) const COLOR_YELLOW: RGBColor = RGBColor(0xFF, 0xC1, 0x07);
pub(crate) const COLOR_RED: RGBColor = RGBColor(0xF4, 0x43, 0x36);
pub(crate) const COLOR_GREEN: RGBColor = RGBColor(0x4C, 0xAF, 0x50);

/// Opacity applied to every filled chart region.
pub(crate) const FILL_ALPHA: f64 = 0.7;

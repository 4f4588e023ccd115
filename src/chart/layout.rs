//! Inner drawing area derived from the configured size and margins.

use crate::config::ChartConfig;

/// Computed layout, recreated on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub chart_width: f64,
    pub chart_height: f64,
    pub chart_left_margin: f64,
    pub chart_top_margin: f64,
}

/// Derive the layout from the configuration.
///
/// Margins larger than the SVG produce negative sizes; they are passed on
/// unchanged.
#[must_use]
pub fn compute_layout(config: &ChartConfig) -> Layout {
    let chart_left_margin = config.margin_left;
    let chart_top_margin = config.margin_top;
    Layout {
        chart_width: config.svg_width - config.margin_right - chart_left_margin,
        chart_height: config.svg_height - config.margin_bottom - chart_top_margin,
        chart_left_margin,
        chart_top_margin,
    }
}

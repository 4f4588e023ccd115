//! Keyed horizontal bars with labels and share-of-total annotations.
//!
//! Rows are `g.row` groups stacked top to bottom in data order. New rows
//! slide in from the right, removed rows slide out to the left, and bar
//! widths grow once the rows are in place, one row after another.

use indexmap::IndexMap;
use log::warn;

use crate::config::Record;
use crate::dom::{Document, JoinKey, NodeId, TextAnchor, join, translate};
use crate::transition::{EndAction, Timeline, Tween};

use super::root::reconcile_single;
use super::scale::LinearScale;

pub const ROW_CLASS: &str = "row";
pub const ROW_TOP: f64 = 50.0;
pub const ROW_HEIGHT: f64 = 25.0;
pub const ROW_X: f64 = 10.0;
pub const ENTER_X: f64 = 1000.0;
pub const EXIT_X: f64 = -1000.0;
pub const EXIT_DURATION_MS: f64 = 500.0;
pub const ROW_DURATION_MS: f64 = 1000.0;
pub const BAR_DURATION_MS: f64 = 1000.0;
pub const BAR_STAGGER_MS: f64 = 100.0;
pub const BAR_X: f64 = 150.0;
pub const BAR_HEIGHT: f64 = 20.0;
pub const BAR_FILL: &str = "darkblue";
pub const LABEL_X: f64 = 140.0;
pub const TEXT_Y: f64 = 16.0;
pub const PERCENT_GAP: f64 = 5.0;
pub const PERCENT_FONT_SIZE: f64 = 11.0;

/// Vertical slot of the `index`-th row.
#[must_use]
pub fn row_y(index: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)] // row counts are far below 2^52
    let index = index as f64;
    ROW_HEIGHT.mul_add(index, ROW_TOP)
}

/// Share of `value` in `sum` as a percentage rounded to one decimal.
///
/// A zero or non-finite sum yields `0%`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn percent_label(value: f64, sum: f64) -> String {
    if sum == 0.0 || !sum.is_finite() {
        return "0%".to_string();
    }
    let percent = (value / sum * 100.0 * 10.0).round() / 10.0;
    format!("{percent}%")
}

/// Collapse records sharing a key: the row keeps the position of the first
/// occurrence and takes the value of the last one.
#[must_use]
pub fn dedupe_by_key(data: &[Record]) -> Vec<Record> {
    let mut rows: IndexMap<&str, f64> = IndexMap::with_capacity(data.len());
    for record in data {
        if rows.insert(record.key.as_str(), record.value).is_some() {
            warn!("duplicate key {:?} in chart data, keeping the last value", record.key);
        }
    }
    rows.into_iter()
        .map(|(key, value)| Record::new(key, value))
        .collect()
}

/// Inputs of one bar-chart pass.
#[derive(Debug, Clone, Copy)]
pub struct BarChartInput<'a> {
    pub group: NodeId,
    pub data: &'a [Record],
    pub chart_width: f64,
    pub text_fill: &'a str,
}

/// Draw or update the bars inside `input.group`, scheduling their
/// transitions on `timeline`. Returns the row elements in data order.
pub fn draw_bar_chart(
    document: &mut Document,
    timeline: &mut Timeline,
    input: &BarChartInput<'_>,
) -> Vec<NodeId> {
    let rows = dedupe_by_key(input.data);
    let keys: Vec<JoinKey> = rows.iter().map(|r| JoinKey::Id(r.key.clone())).collect();

    let value_sum: f64 = rows.iter().map(|r| r.value).sum();
    let max_value = rows.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    let x_scale = LinearScale::new((0.0, max_value), (0.0, input.chart_width));

    let join = join(document, input.group, ROW_CLASS, &keys);

    for &(position, row) in &join.exit {
        timeline.schedule(
            Tween::attr(row, "transform", translate(EXIT_X, row_y(position)))
                .duration(EXIT_DURATION_MS)
                .on_end(EndAction::Remove),
        );
    }

    let merged = join.append_enter(document, input.group, "g", &keys);
    for &(index, row) in &merged.entered {
        document.set_attr(row, "transform", translate(ENTER_X, row_y(index)));
    }

    for (index, (&row, record)) in merged.nodes.iter().zip(&rows).enumerate() {
        document.set_attr(row, "class", ROW_CLASS);
        timeline.schedule(
            Tween::attr(row, "transform", translate(ROW_X, row_y(index)))
                .duration(ROW_DURATION_MS),
        );
        draw_row(document, timeline, row, index, record, value_sum, &x_scale, input.text_fill);
    }

    merged.nodes
}

#[allow(clippy::too_many_arguments)]
fn draw_row(
    document: &mut Document,
    timeline: &mut Timeline,
    row: NodeId,
    index: usize,
    record: &Record,
    value_sum: f64,
    x_scale: &LinearScale,
    text_fill: &str,
) {
    #[allow(clippy::cast_precision_loss)]
    let delay = BAR_STAGGER_MS.mul_add(index as f64, ROW_DURATION_MS);
    let bar_width = x_scale.scale(record.value);

    let label = reconcile_single(document, row, "text", "keys");
    document.set_text(label, record.key.clone());
    document.set_attr(label, "y", TEXT_Y);
    document.set_attr(label, "text-anchor", TextAnchor::End);
    document.set_attr(label, "x", LABEL_X);
    document.set_attr(label, "fill", text_fill);

    let bar = reconcile_single(document, row, "rect", "bars");
    document.set_attr(bar, "height", BAR_HEIGHT);
    document.set_attr(bar, "fill", BAR_FILL);
    document.set_attr(bar, "x", BAR_X);
    timeline.schedule(
        Tween::attr(bar, "width", bar_width)
            .delay(delay)
            .duration(BAR_DURATION_MS),
    );

    let percent = reconcile_single(document, row, "text", "percents");
    document.set_text(percent, percent_label(record.value, value_sum));
    document.set_attr(percent, "font-size", PERCENT_FONT_SIZE);
    document.set_attr(percent, "y", TEXT_Y);
    document.set_attr(percent, "fill", text_fill);
    if document.attr(percent, "x").is_none() {
        document.set_attr(percent, "x", BAR_X + PERCENT_GAP);
    }
    timeline.schedule(
        Tween::attr(percent, "x", BAR_X + bar_width + PERCENT_GAP)
            .delay(delay)
            .duration(BAR_DURATION_MS),
    );
}

#[cfg(test)]
#[path = "bars_tests.rs"]
mod tests;

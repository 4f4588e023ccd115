//! The outer `svg` element and the translated group the bars are drawn in.

use crate::dom::{Document, NodeId, ReconcileOptions, reconcile, translate};

use super::layout::Layout;

pub const SVG_CLASS: &str = "svg-chart-container";
pub const GROUP_CLASS: &str = "chart";

/// Ensure exactly one `tag.class_name` child of `parent` exists and return it.
pub(super) fn reconcile_single(
    document: &mut Document,
    parent: NodeId,
    tag: &str,
    class_name: &str,
) -> NodeId {
    let nodes = reconcile(document, parent, ReconcileOptions::new(tag, class_name));
    // the placeholder join always yields exactly one element
    nodes[0]
}

/// Draw or update the root `svg` and its `g.chart` wrapper under `container`.
///
/// Returns `(svg, group)`.
pub fn draw_svg_and_wrappers(
    document: &mut Document,
    container: NodeId,
    svg_width: f64,
    svg_height: f64,
    font: &str,
    layout: &Layout,
) -> (NodeId, NodeId) {
    let svg = reconcile_single(document, container, "svg", SVG_CLASS);
    document.set_attr(svg, "width", svg_width);
    document.set_attr(svg, "height", svg_height);
    document.set_attr(svg, "font-family", font);

    let group = reconcile_single(document, svg, "g", GROUP_CLASS);
    document.set_attr(
        group,
        "transform",
        translate(layout.chart_left_margin, layout.chart_top_margin),
    );

    (svg, group)
}

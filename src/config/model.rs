use serde::{Deserialize, Serialize};

/// One bar: a unique key and a non-negative value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identity of the row; also its label.
    pub key: String,
    pub value: f64,
}

impl Record {
    #[must_use]
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Mutable configuration record of a chart.
///
/// Values are not validated; out-of-range numbers show up as degenerate
/// geometry when the chart is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Namespaces the chart's resize listener.
    pub id: String,
    pub svg_width: f64,
    pub svg_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_right: f64,
    pub margin_left: f64,
    /// Selector of the element the chart is drawn into.
    pub container: String,
    pub default_text_fill: String,
    pub default_font: String,
    pub data: Vec<Record>,
    /// Written by every render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_width: Option<f64>,
    /// Written by every render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_height: Option<f64>,
    pub first_render: bool,
    pub gui_enabled: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            id: generate_id(),
            svg_width: 500.0,
            svg_height: 500.0,
            margin_top: 40.0,
            margin_bottom: 5.0,
            margin_right: 300.0,
            margin_left: 5.0,
            container: "body".to_string(),
            default_text_fill: "#2C3E50".to_string(),
            default_font: "Helvetica".to_string(),
            data: Vec::new(),
            chart_width: None,
            chart_height: None,
            first_render: true,
            gui_enabled: false,
        }
    }
}

/// Random chart identifier of the form `ID<n>`.
#[must_use]
pub fn generate_id() -> String {
    format!("ID{}", rand::random_range(0..1_000_000))
}

/// Partial configuration: every field optional.
///
/// Used for bulk updates, configuration files and debug GUI edits. Only the
/// fields that are present overwrite the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_text_fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_render: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gui_enabled: Option<bool>,
}

impl StatePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `other` on top of `self`; fields present in `other` win.
    #[must_use]
    pub fn merged_with(self, other: Self) -> Self {
        Self {
            id: other.id.or(self.id),
            svg_width: other.svg_width.or(self.svg_width),
            svg_height: other.svg_height.or(self.svg_height),
            margin_top: other.margin_top.or(self.margin_top),
            margin_bottom: other.margin_bottom.or(self.margin_bottom),
            margin_right: other.margin_right.or(self.margin_right),
            margin_left: other.margin_left.or(self.margin_left),
            container: other.container.or(self.container),
            default_text_fill: other.default_text_fill.or(self.default_text_fill),
            default_font: other.default_font.or(self.default_font),
            data: other.data.or(self.data),
            chart_width: other.chart_width.or(self.chart_width),
            chart_height: other.chart_height.or(self.chart_height),
            first_render: other.first_render.or(self.first_render),
            gui_enabled: other.gui_enabled.or(self.gui_enabled),
        }
    }
}

impl ChartConfig {
    /// Shallow merge: overwrite exactly the fields present in `patch`.
    pub fn apply(&mut self, patch: StatePatch) {
        let StatePatch {
            id,
            svg_width,
            svg_height,
            margin_top,
            margin_bottom,
            margin_right,
            margin_left,
            container,
            default_text_fill,
            default_font,
            data,
            chart_width,
            chart_height,
            first_render,
            gui_enabled,
        } = patch;

        if let Some(v) = id {
            self.id = v;
        }
        if let Some(v) = svg_width {
            self.svg_width = v;
        }
        if let Some(v) = svg_height {
            self.svg_height = v;
        }
        if let Some(v) = margin_top {
            self.margin_top = v;
        }
        if let Some(v) = margin_bottom {
            self.margin_bottom = v;
        }
        if let Some(v) = margin_right {
            self.margin_right = v;
        }
        if let Some(v) = margin_left {
            self.margin_left = v;
        }
        if let Some(v) = container {
            self.container = v;
        }
        if let Some(v) = default_text_fill {
            self.default_text_fill = v;
        }
        if let Some(v) = default_font {
            self.default_font = v;
        }
        if let Some(v) = data {
            self.data = v;
        }
        if chart_width.is_some() {
            self.chart_width = chart_width;
        }
        if chart_height.is_some() {
            self.chart_height = chart_height;
        }
        if let Some(v) = first_render {
            self.first_render = v;
        }
        if let Some(v) = gui_enabled {
            self.gui_enabled = v;
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

//! Optional debug panel for live-editing chart configuration.
//!
//! The chart does not draw any panel itself: a [`DebugGui`] implementation is
//! injected at construction and receives a snapshot of the editable fields
//! plus a callback to push edits back.

use serde_json::{Map, Number, Value};

use crate::config::{ChartConfig, StatePatch};
use crate::error::Result;
use crate::host::Window;

/// Fields that control the panel itself and are never exposed for editing.
const CONTROL_FIELDS: &[&str] = &["gui_enabled", "first_render"];

/// Value of an editable field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

/// One editable configuration field.
#[derive(Debug, Clone, PartialEq)]
pub struct GuiField {
    pub name: String,
    pub value: FieldValue,
}

impl GuiField {
    #[must_use]
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Called by the panel after an edit with the full set of fields.
pub type GuiCallback = Box<dyn FnMut(&mut Window, &[GuiField]) -> Result<()>>;

/// A live-editing panel attached once, on the chart's first render.
pub trait DebugGui {
    /// Build controls for `fields`; invoke `on_change` whenever one is edited.
    fn attach(&mut self, fields: Vec<GuiField>, on_change: GuiCallback);
}

/// Snapshot every numeric, string or boolean field of `config`.
///
/// # Errors
/// Returns an error if the configuration cannot be serialized.
pub fn editable_fields(config: &ChartConfig) -> Result<Vec<GuiField>> {
    let Value::Object(map) = serde_json::to_value(config)? else {
        return Ok(Vec::new());
    };

    let fields = map
        .into_iter()
        .filter(|(name, _)| !CONTROL_FIELDS.contains(&name.as_str()))
        .filter_map(|(name, value)| {
            let value = match value {
                Value::Number(n) => FieldValue::Number(n.as_f64()?),
                Value::String(s) => FieldValue::Text(s),
                Value::Bool(b) => FieldValue::Flag(b),
                _ => return None,
            };
            Some(GuiField { name, value })
        })
        .collect();
    Ok(fields)
}

/// Turn panel fields back into a configuration patch.
///
/// # Errors
/// Returns an error if a field name is unknown or its value has the wrong type.
pub fn fields_to_patch(fields: &[GuiField]) -> Result<StatePatch> {
    let map: Map<String, Value> = fields
        .iter()
        .map(|field| {
            let value = match &field.value {
                FieldValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
                FieldValue::Text(s) => Value::String(s.clone()),
                FieldValue::Flag(b) => Value::Bool(*b),
            };
            (field.name.clone(), value)
        })
        .collect();
    Ok(serde_json::from_value(Value::Object(map))?)
}

#[cfg(test)]
#[path = "gui_tests.rs"]
mod tests;

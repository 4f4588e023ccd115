//! Retained SVG document model: element tree, keyed joins and serialization.

mod document;
mod format;
mod join;
mod style;

pub use document::{Document, Node, NodeId};
pub use format::html_escape;
pub use join::{
    Join, JoinKey, Keyed, Merged, ReconcileOptions, SelectionHook, join, key_of, reconcile,
};
pub use style::{TextAnchor, translate};

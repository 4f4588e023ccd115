//! Keyed data joins and the enter/update/exit reconciliation helper.
//!
//! A join matches a list of keys against the existing children of a parent
//! that carry a class, partitioning them into:
//! - **enter**: keys with no element yet
//! - **update**: keys whose element already exists
//! - **exit**: elements whose key is gone
//!
//! [`reconcile`] builds on [`join`] to keep a keyed collection of elements in
//! sync with data in a single call.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::document::{Document, NodeId};

/// Identity used to match a datum with its rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinKey {
    Id(String),
    Index(usize),
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Index(i) => write!(f, "#{i}"),
        }
    }
}

/// Data that may carry a stable identity for joins.
///
/// Data without an identity are joined by position.
pub trait Keyed {
    fn id(&self) -> Option<String> {
        None
    }
}

impl Keyed for &str {}

impl Keyed for String {}

impl Keyed for serde_json::Value {
    fn id(&self) -> Option<String> {
        match self.get("id")? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => {
                Some(n.to_string())
            }
            _ => None,
        }
    }
}

/// Key of the `index`-th datum: its identity when present, else its position.
#[must_use]
pub fn key_of<D: Keyed>(datum: &D, index: usize) -> JoinKey {
    datum.id().map_or(JoinKey::Index(index), JoinKey::Id)
}

/// Partition produced by [`join`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Join {
    /// Data indices that need a new element.
    pub enter: Vec<usize>,
    /// `(data index, element)` pairs for persisting elements, in data order.
    pub update: Vec<(usize, NodeId)>,
    /// `(previous position, element)` pairs for elements whose key is gone.
    pub exit: Vec<(usize, NodeId)>,
}

/// Elements after the enter set has been materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merged {
    /// Persisting and new elements, indexed like the data.
    pub nodes: Vec<NodeId>,
    /// `(data index, element)` pairs for the newly created elements.
    pub entered: Vec<(usize, NodeId)>,
}

impl Merged {
    /// Newly created elements only.
    #[must_use]
    pub fn entered_nodes(&self) -> Vec<NodeId> {
        self.entered.iter().map(|&(_, node)| node).collect()
    }
}

/// Match `keys` against the children of `parent` that carry `class_name`.
///
/// Elements are keyed by the key stored when they were created, falling back
/// to their position among the matched children. When several data share a
/// key only the first one binds the existing element; the rest enter. When
/// several elements share a key only the first one can persist.
#[must_use]
pub fn join(document: &Document, parent: NodeId, class_name: &str, keys: &[JoinKey]) -> Join {
    let mut existing: IndexMap<JoinKey, (usize, NodeId)> = IndexMap::new();
    let mut result = Join::default();

    for (position, node) in document
        .children_with_class(parent, class_name)
        .into_iter()
        .enumerate()
    {
        let key = document
            .key(node)
            .cloned()
            .unwrap_or(JoinKey::Index(position));
        match existing.entry(key) {
            Entry::Occupied(_) => result.exit.push((position, node)),
            Entry::Vacant(slot) => {
                slot.insert((position, node));
            }
        }
    }

    for (index, key) in keys.iter().enumerate() {
        match existing.shift_remove(key) {
            Some((_, node)) => result.update.push((index, node)),
            None => result.enter.push(index),
        }
    }

    result.exit.extend(existing.into_values());
    result.exit.sort_by_key(|&(position, _)| position);
    result
}

impl Join {
    /// Create one `tag` element per entering key and merge it with the
    /// persisting elements.
    ///
    /// New elements are inserted before the next persisting element in data
    /// order, so the document order follows the data wherever possible.
    pub fn append_enter(
        &self,
        document: &mut Document,
        parent: NodeId,
        tag: &str,
        keys: &[JoinKey],
    ) -> Merged {
        let mut slots: Vec<Option<NodeId>> = vec![None; keys.len()];
        for &(index, node) in &self.update {
            slots[index] = Some(node);
            document.set_key(node, keys[index].clone());
        }

        let mut entered = Vec::with_capacity(self.enter.len());
        for &index in &self.enter {
            let next_sibling = self
                .update
                .iter()
                .find(|&&(i, _)| i > index)
                .map(|&(_, node)| node);
            let node = document.insert_before(parent, tag, next_sibling);
            document.set_key(node, keys[index].clone());
            slots[index] = Some(node);
            entered.push((index, node));
        }

        Merged {
            nodes: slots.into_iter().flatten().collect(),
            entered,
        }
    }

    #[must_use]
    pub fn exit_nodes(&self) -> Vec<NodeId> {
        self.exit.iter().map(|&(_, node)| node).collect()
    }
}

/// Callback applied to the entering or exiting elements of a reconcile.
pub type SelectionHook<'a> = &'a mut dyn FnMut(&mut Document, &[NodeId]);

/// Parameters for [`reconcile`].
pub struct ReconcileOptions<'a, D> {
    pub tag: &'a str,
    pub class_name: &'a str,
    /// Data to bind. `None` binds a single placeholder datum so exactly one
    /// element is maintained.
    pub data: Option<&'a [D]>,
    pub exit_transition: Option<SelectionHook<'a>>,
    pub enter_transition: Option<SelectionHook<'a>>,
}

impl<'a> ReconcileOptions<'a, &'a str> {
    #[must_use]
    pub const fn new(tag: &'a str, class_name: &'a str) -> Self {
        Self {
            tag,
            class_name,
            data: None,
            exit_transition: None,
            enter_transition: None,
        }
    }
}

impl<'a, D: Keyed> ReconcileOptions<'a, D> {
    #[must_use]
    pub fn with_data<E: Keyed>(self, data: &'a [E]) -> ReconcileOptions<'a, E> {
        ReconcileOptions {
            tag: self.tag,
            class_name: self.class_name,
            data: Some(data),
            exit_transition: self.exit_transition,
            enter_transition: self.enter_transition,
        }
    }

    #[must_use]
    pub fn with_exit_transition(mut self, hook: SelectionHook<'a>) -> Self {
        self.exit_transition = Some(hook);
        self
    }

    #[must_use]
    pub fn with_enter_transition(mut self, hook: SelectionHook<'a>) -> Self {
        self.enter_transition = Some(hook);
        self
    }
}

impl<D> fmt::Debug for ReconcileOptions<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconcileOptions")
            .field("tag", &self.tag)
            .field("class_name", &self.class_name)
            .field("data_len", &self.data.map(<[D]>::len))
            .field("exit_transition", &self.exit_transition.is_some())
            .field("enter_transition", &self.enter_transition.is_some())
            .finish()
    }
}

/// Bring the `class_name` children of `parent` in line with the data and
/// return the merged elements in data order, each tagged with `class_name`.
pub fn reconcile<D: Keyed>(
    document: &mut Document,
    parent: NodeId,
    options: ReconcileOptions<'_, D>,
) -> Vec<NodeId> {
    let ReconcileOptions {
        tag,
        class_name,
        data,
        exit_transition,
        enter_transition,
    } = options;

    let keys: Vec<JoinKey> = data.map_or_else(
        || vec![JoinKey::Index(0)],
        |data| data.iter().enumerate().map(|(i, d)| key_of(d, i)).collect(),
    );

    let join = join(document, parent, class_name, &keys);

    let exiting = join.exit_nodes();
    match exit_transition {
        Some(hook) => hook(document, &exiting),
        None => {
            for node in exiting {
                document.remove(node);
            }
        }
    }

    let merged = join.append_enter(document, parent, tag, &keys);
    if let Some(hook) = enter_transition {
        hook(document, &merged.entered_nodes());
    }

    for &node in &merged.nodes {
        document.set_attr(node, "class", class_name);
    }
    merged.nodes
}

#[cfg(test)]
#[path = "join_tests.rs"]
mod tests;

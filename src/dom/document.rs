//! Retained document tree backing the rendered chart.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
//! detaches its subtree from the tree; the arena slot is kept so stale ids
//! held by in-flight transitions stay valid (they simply stop being attached).

use std::fmt::{self, Write};

use indexmap::IndexMap;

use super::format::html_escape;
use super::join::JoinKey;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single element in the document.
#[derive(Debug, Clone)]
pub struct Node {
    tag: String,
    attrs: IndexMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    key: Option<JoinKey>,
    client_width: f64,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: IndexMap::new(),
            text: None,
            parent,
            children: Vec::new(),
            key: None,
            client_width: 0.0,
        }
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }
}

/// Arena-backed element tree rooted at a `body` element.
///
/// Slots are never reused: a removed node keeps its slot so that a stale
/// [`NodeId`] still answers `is_attached` with `false` instead of aliasing a
/// newer element. The arena therefore grows with every element ever created,
/// which for a long-lived chart means every distinct key it has displayed.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body", None)],
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element as the last child of `parent`.
    pub fn create_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.insert_before(parent, tag, None)
    }

    /// Insert a new element under `parent`, before `before` when it is one of
    /// `parent`'s children, otherwise at the end.
    pub fn insert_before(&mut self, parent: NodeId, tag: &str, before: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag, Some(parent)));

        let siblings = &mut self.nodes[parent.0].children;
        let position = before
            .and_then(|b| siblings.iter().position(|&c| c == b))
            .unwrap_or(siblings.len());
        siblings.insert(position, id);
        id
    }

    /// Detach `id` (and its subtree) from its parent. Removing the root or an
    /// already detached node is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
    }

    /// Whether `id` is still reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Direct children of `parent` carrying `class_name`, in document order.
    #[must_use]
    pub fn children_with_class(&self, parent: NodeId, class_name: &str) -> Vec<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .filter(|&c| self.nodes[c.0].has_class(class_name))
            .collect()
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl fmt::Display) {
        self.nodes[id.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.nodes[id.0].attrs.shift_remove(name);
    }

    #[must_use]
    pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
        self.nodes[id.0].has_class(class_name)
    }

    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].text = Some(text.into());
    }

    #[must_use]
    pub fn key(&self, id: NodeId) -> Option<&JoinKey> {
        self.nodes[id.0].key.as_ref()
    }

    pub fn set_key(&mut self, id: NodeId, key: JoinKey) {
        self.nodes[id.0].key = Some(key);
    }

    /// Measured layout width of an element (0 until the host sets one).
    #[must_use]
    pub fn client_width(&self, id: NodeId) -> f64 {
        self.nodes[id.0].client_width
    }

    pub fn set_client_width(&mut self, id: NodeId, width: f64) {
        self.nodes[id.0].client_width = width;
    }

    /// Find the first attached element matching a simple selector.
    ///
    /// Supported forms: `#id`, `.class` and a bare tag name.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        self.descendants(self.root())
            .into_iter()
            .find(|&id| self.matches(id, selector))
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        let node = &self.nodes[id.0];
        if let Some(element_id) = selector.strip_prefix('#') {
            node.attrs.get("id").is_some_and(|v| v == element_id)
        } else if let Some(class_name) = selector.strip_prefix('.') {
            node.has_class(class_name)
        } else {
            node.tag == selector
        }
    }

    /// `id` followed by its subtree in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        out
    }

    /// Number of attached elements below the root.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.descendants(self.root()).len() - 1
    }

    /// Serialize the subtree rooted at `id`.
    #[must_use]
    pub fn to_svg(&self, id: NodeId) -> String {
        let mut output = String::new();
        self.write_node(&mut output, id, 0);
        output
    }

    fn write_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let node = &self.nodes[id.0];
        let indent = "    ".repeat(depth);

        let _ = write!(output, "{indent}<{}", node.tag);
        for (name, value) in &node.attrs {
            let _ = write!(output, r#" {name}="{}""#, html_escape(value));
        }

        match (&node.text, node.children.is_empty()) {
            (None, true) => {
                let _ = writeln!(output, "/>");
            }
            (Some(text), true) => {
                let _ = writeln!(output, ">{}</{}>", html_escape(text), node.tag);
            }
            (text, false) => {
                let _ = writeln!(output, ">");
                if let Some(text) = text {
                    let _ = writeln!(output, "{indent}    {}", html_escape(text));
                }
                for &child in &node.children {
                    self.write_node(output, child, depth + 1);
                }
                let _ = writeln!(output, "{indent}</{}>", node.tag);
            }
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

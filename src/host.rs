//! Host environment for charts: the document, the animation clock and the
//! window-level resize listeners.

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::dom::{Document, NodeId};
use crate::error::{ChartError, Result};
use crate::transition::Timeline;

/// Callback invoked when the window is resized.
pub type ResizeListener = Box<dyn FnMut(&mut Window) -> Result<()>>;

/// Disposer for a registered resize listener.
///
/// Listener names are namespaced (`resize.<id>`); registering a listener
/// under a name that is already taken replaces the previous one.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a subscription leaves the listener registered"]
pub struct Subscription {
    name: String,
}

impl Subscription {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Listeners taken out of the registry while they are being invoked.
#[derive(Default)]
struct Dispatch {
    in_flight: Vec<String>,
    retired: Vec<String>,
}

#[derive(Default)]
pub struct Window {
    document: Document,
    timeline: Timeline,
    listeners: IndexMap<String, ResizeListener>,
    dispatch: Option<Dispatch>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("document", &self.document)
            .field("timeline", &self.timeline)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Window {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Window whose `body` measures `width` pixels.
    #[must_use]
    pub fn with_viewport_width(width: f64) -> Self {
        let mut window = Self::new();
        let root = window.document.root();
        window.document.set_client_width(root, width);
        window
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub const fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Split borrow for code that edits the tree while scheduling tweens.
    pub const fn parts_mut(&mut self) -> (&mut Document, &mut Timeline) {
        (&mut self.document, &mut self.timeline)
    }

    /// Add a `div#<id>` container under `body` with a measured width.
    pub fn add_container(&mut self, id: &str, width: f64) -> NodeId {
        let root = self.document.root();
        let node = self.document.create_element(root, "div");
        self.document.set_attr(node, "id", id);
        self.document.set_client_width(node, width);
        node
    }

    /// Register `listener` under `name`, replacing any listener with that name.
    pub fn on_resize(&mut self, name: &str, listener: ResizeListener) -> Subscription {
        debug!("registering resize listener {name}");
        self.listeners.insert(name.to_string(), listener);
        Subscription {
            name: name.to_string(),
        }
    }

    /// Unregister the listener behind `subscription`. Returns whether it was
    /// still registered.
    pub fn dispose(&mut self, subscription: Subscription) -> bool {
        let removed = self.listeners.shift_remove(&subscription.name).is_some();
        match &mut self.dispatch {
            Some(dispatch) => {
                let in_flight = dispatch.in_flight.contains(&subscription.name)
                    && !dispatch.retired.contains(&subscription.name);
                dispatch.retired.push(subscription.name);
                removed || in_flight
            }
            None => removed,
        }
    }

    #[must_use]
    pub fn has_listener(&self, name: &str) -> bool {
        self.listeners.contains_key(name)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Set the measured width of the element matching `selector`, then
    /// dispatch a resize event.
    ///
    /// # Errors
    /// Returns an error if no element matches or a listener fails.
    pub fn resize_container(&mut self, selector: &str, width: f64) -> Result<()> {
        let node = self
            .document
            .query(selector)
            .ok_or_else(|| ChartError::ContainerNotFound(selector.to_string()))?;
        self.document.set_client_width(node, width);
        self.dispatch_resize()
    }

    /// Invoke every resize listener once.
    ///
    /// Listeners may replace or dispose their own registration while running.
    ///
    /// # Errors
    /// Returns the first listener error; the remaining listeners still run.
    pub fn dispatch_resize(&mut self) -> Result<()> {
        let mut taken = std::mem::take(&mut self.listeners);
        self.dispatch = Some(Dispatch {
            in_flight: taken.keys().cloned().collect(),
            retired: Vec::new(),
        });

        let mut first_error = None;
        for (name, listener) in &mut taken {
            debug!("dispatching resize to {name}");
            if let Err(e) = listener(self)
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }

        let retired = self.dispatch.take().map(|d| d.retired).unwrap_or_default();
        for (name, listener) in taken {
            if !self.listeners.contains_key(&name) && !retired.contains(&name) {
                self.listeners.insert(name, listener);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Advance animation time by `ms` milliseconds.
    pub fn advance(&mut self, ms: f64) {
        self.timeline.advance(&mut self.document, ms);
    }

    /// Run all in-flight transitions to completion.
    pub fn settle(&mut self) {
        self.timeline.finish(&mut self.document);
    }

    /// Serialized markup of the whole document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.document.to_svg(self.document.root())
    }

    /// Serialized markup of the first element matching `selector`.
    #[must_use]
    pub fn markup(&self, selector: &str) -> Option<String> {
        self.document.query(selector).map(|n| self.document.to_svg(n))
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;

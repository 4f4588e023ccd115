//! The bar-chart component.
//!
//! A [`Chart`] is a cheap, cloneable handle around shared state. Configure it
//! through the chained accessors, then call [`Chart::render`] against a
//! [`Window`]. Every render re-registers a resize listener, so the chart
//! redraws itself whenever the window reports a new container width, until
//! [`Chart::teardown`] is called.

mod bars;
mod gui;
mod layout;
mod root;
mod scale;

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::debug;

pub use bars::{BarChartInput, dedupe_by_key, draw_bar_chart, percent_label, row_y};
pub use gui::{DebugGui, FieldValue, GuiCallback, GuiField, editable_fields, fields_to_patch};
pub use layout::{Layout, compute_layout};
pub use root::{GROUP_CLASS, SVG_CLASS, draw_svg_and_wrappers};
pub use scale::LinearScale;

use crate::config::{ChartConfig, Record, StatePatch};
use crate::dom::NodeId;
use crate::error::{ChartError, Result};
use crate::host::{ResizeListener, Subscription, Window};

struct ChartInner {
    config: ChartConfig,
    layout: Option<Layout>,
    container: Option<NodeId>,
    svg: Option<NodeId>,
    group: Option<NodeId>,
    subscription: Option<Subscription>,
    gui: Option<Box<dyn DebugGui>>,
    gui_attached: bool,
}

/// Handle to a bar chart. Clones share the same chart.
#[derive(Clone)]
pub struct Chart {
    inner: Rc<RefCell<ChartInner>>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Chart")
            .field("config", &inner.config)
            .field("layout", &inner.layout)
            .field("svg", &inner.svg)
            .field("subscription", &inner.subscription)
            .field("gui", &inner.gui.is_some())
            .field("gui_attached", &inner.gui_attached)
            .finish_non_exhaustive()
    }
}

/// Getter plus chainable setter for one configuration field.
macro_rules! accessor {
    (copy $field:ident, $setter:ident: $ty:ty) => {
        #[must_use]
        pub fn $field(&self) -> $ty {
            self.inner.borrow().config.$field
        }

        pub fn $setter(&self, value: impl Into<$ty>) -> &Self {
            self.inner.borrow_mut().config.$field = value.into();
            self
        }
    };
    (clone $field:ident, $setter:ident: $ty:ty) => {
        #[must_use]
        pub fn $field(&self) -> $ty {
            self.inner.borrow().config.$field.clone()
        }

        pub fn $setter(&self, value: impl Into<$ty>) -> &Self {
            self.inner.borrow_mut().config.$field = value.into();
            self
        }
    };
}

impl Chart {
    accessor!(clone id, set_id: String);
    accessor!(copy svg_width, set_svg_width: f64);
    accessor!(copy svg_height, set_svg_height: f64);
    accessor!(copy margin_top, set_margin_top: f64);
    accessor!(copy margin_bottom, set_margin_bottom: f64);
    accessor!(copy margin_left, set_margin_left: f64);
    accessor!(copy margin_right, set_margin_right: f64);
    accessor!(clone container, set_container: String);
    accessor!(clone default_text_fill, set_default_text_fill: String);
    accessor!(clone default_font, set_default_font: String);
    accessor!(clone data, set_data: Vec<Record>);
    accessor!(copy chart_width, set_chart_width: Option<f64>);
    accessor!(copy chart_height, set_chart_height: Option<f64>);
    accessor!(copy first_render, set_first_render: bool);
    accessor!(copy gui_enabled, set_gui_enabled: bool);
}

impl Chart {
    /// Chart with default configuration and no debug GUI.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(ChartConfig::default(), None)
    }

    /// Chart that hands its fields to `gui` on the first render when
    /// `gui_enabled` is set.
    #[must_use]
    pub fn with_gui(gui: Box<dyn DebugGui>) -> Self {
        Self::from_parts(ChartConfig::default(), Some(gui))
    }

    /// Chart starting from an existing configuration.
    #[must_use]
    pub fn with_config(config: ChartConfig) -> Self {
        Self::from_parts(config, None)
    }

    fn from_parts(config: ChartConfig, gui: Option<Box<dyn DebugGui>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChartInner {
                config,
                layout: None,
                container: None,
                svg: None,
                group: None,
                subscription: None,
                gui,
                gui_attached: false,
            })),
        }
    }

    /// Live view of the configuration record.
    ///
    /// # Panics
    /// Panics if held across a call that mutates the chart.
    #[must_use]
    pub fn state(&self) -> Ref<'_, ChartConfig> {
        Ref::map(self.inner.borrow(), |inner| &inner.config)
    }

    /// Overwrite the fields present in `patch`.
    pub fn set_state(&self, patch: StatePatch) -> &Self {
        self.inner.borrow_mut().config.apply(patch);
        self
    }

    /// Layout computed by the last render.
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.inner.borrow().layout
    }

    #[must_use]
    pub fn svg_node(&self) -> Option<NodeId> {
        self.inner.borrow().svg
    }

    #[must_use]
    pub fn group_node(&self) -> Option<NodeId> {
        self.inner.borrow().group
    }

    /// Draw or update the chart in `window`.
    ///
    /// # Errors
    /// Returns [`ChartError::ContainerNotFound`] if the configured container
    /// does not exist, or any error raised by the debug GUI snapshot.
    pub fn render(&self, window: &mut Window) -> Result<&Self> {
        {
            let inner = self.inner.borrow();
            debug!(
                "rendering chart {} into {} with {} rows",
                inner.config.id,
                inner.config.container,
                inner.config.data.len()
            );
            debug!("chart data: {:?}", inner.config.data);
        }

        self.attach_gui()?;
        self.set_dynamic_container(window)?;
        self.calculate_properties();
        self.draw_svg_and_wrappers(window);
        self.draw_bar_chart(window);

        self.inner.borrow_mut().config.first_render = false;
        Ok(self)
    }

    /// Unregister the resize listener. Returns whether one was registered.
    pub fn teardown(&self, window: &mut Window) -> bool {
        let subscription = self.inner.borrow_mut().subscription.take();
        subscription.is_some_and(|s| window.dispose(s))
    }

    fn attach_gui(&self) -> Result<()> {
        let (fields, mut gui) = {
            let mut inner = self.inner.borrow_mut();
            if inner.gui_attached || !inner.config.first_render || !inner.config.gui_enabled {
                return Ok(());
            }
            let Some(gui) = inner.gui.take() else {
                return Ok(());
            };
            (editable_fields(&inner.config), gui)
        };

        let fields = match fields {
            Ok(fields) => fields,
            Err(e) => {
                self.inner.borrow_mut().gui = Some(gui);
                return Err(e);
            }
        };

        let weak = Rc::downgrade(&self.inner);
        gui.attach(
            fields,
            Box::new(move |window: &mut Window, edited: &[GuiField]| {
                let Some(chart) = Self::upgrade(&weak) else {
                    return Ok(());
                };
                chart.set_state(fields_to_patch(edited)?);
                chart.render(window).map(|_| ())
            }),
        );
        // The panel stays attached even if the rest of this render fails.
        let mut inner = self.inner.borrow_mut();
        inner.gui = Some(gui);
        inner.gui_attached = true;
        Ok(())
    }

    fn set_dynamic_container(&self, window: &mut Window) -> Result<()> {
        let (selector, name) = {
            let inner = self.inner.borrow();
            (
                inner.config.container.clone(),
                format!("resize.{}", inner.config.id),
            )
        };

        let container = window
            .document()
            .query(&selector)
            .ok_or(ChartError::ContainerNotFound(selector))?;

        let previous = self.inner.borrow_mut().subscription.take();
        if let Some(previous) = previous {
            window.dispose(previous);
        }

        let weak = Rc::downgrade(&self.inner);
        let listener: ResizeListener = Box::new(move |window: &mut Window| {
            let Some(chart) = Self::upgrade(&weak) else {
                return Ok(());
            };
            let width = window.document().client_width(container);
            if width > 0.0 {
                chart.set_svg_width(width);
            }
            chart.render(window).map(|_| ())
        });
        let subscription = window.on_resize(&name, listener);

        let mut inner = self.inner.borrow_mut();
        inner.container = Some(container);
        inner.subscription = Some(subscription);
        Ok(())
    }

    fn calculate_properties(&self) {
        let mut inner = self.inner.borrow_mut();
        let layout = compute_layout(&inner.config);
        inner.config.chart_width = Some(layout.chart_width);
        inner.config.chart_height = Some(layout.chart_height);
        inner.layout = Some(layout);
    }

    fn draw_svg_and_wrappers(&self, window: &mut Window) {
        let mut inner = self.inner.borrow_mut();
        let (Some(container), Some(layout)) = (inner.container, inner.layout) else {
            return;
        };
        let (svg, group) = draw_svg_and_wrappers(
            window.document_mut(),
            container,
            inner.config.svg_width,
            inner.config.svg_height,
            &inner.config.default_font,
            &layout,
        );
        inner.svg = Some(svg);
        inner.group = Some(group);
    }

    fn draw_bar_chart(&self, window: &mut Window) {
        let inner = self.inner.borrow();
        let (Some(group), Some(layout)) = (inner.group, inner.layout) else {
            return;
        };
        let (document, timeline) = window.parts_mut();
        draw_bar_chart(
            document,
            timeline,
            &BarChartInput {
                group,
                data: &inner.config.data,
                chart_width: layout.chart_width,
                text_fill: &inner.config.default_text_fill,
            },
        );
    }

    fn upgrade(weak: &Weak<RefCell<ChartInner>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;

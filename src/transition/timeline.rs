//! Time-driven attribute tweens.
//!
//! The host advances the timeline; every tween whose start time has passed
//! writes its interpolated value into the document. A tween captures the
//! attribute's current value when it starts, not when it is scheduled.

use log::trace;

use super::ease::Ease;
use super::interpolate::StringInterpolator;
use crate::dom::{Document, NodeId};

/// What happens to the node when a tween completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndAction {
    #[default]
    Keep,
    /// Detach the node from the document.
    Remove,
}

/// A scheduled change of one attribute of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub node: NodeId,
    pub attr: String,
    pub target: String,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
    pub on_end: EndAction,
}

impl Tween {
    /// Tween `attr` of `node` to `target` with the default 250 ms duration.
    #[must_use]
    pub fn attr(node: NodeId, attr: &str, target: impl ToString) -> Self {
        Self {
            node,
            attr: attr.to_string(),
            target: target.to_string(),
            delay_ms: 0.0,
            duration_ms: 250.0,
            ease: Ease::default(),
            on_end: EndAction::Keep,
        }
    }

    #[must_use]
    pub const fn delay(mut self, ms: f64) -> Self {
        self.delay_ms = ms;
        self
    }

    #[must_use]
    pub const fn duration(mut self, ms: f64) -> Self {
        self.duration_ms = ms;
        self
    }

    #[must_use]
    pub const fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    #[must_use]
    pub const fn on_end(mut self, action: EndAction) -> Self {
        self.on_end = action;
        self
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    tween: Tween,
    scheduled_at: f64,
    from: Option<String>,
}

impl Scheduled {
    fn starts_at(&self) -> f64 {
        self.scheduled_at + self.tween.delay_ms
    }
}

/// Clock plus the set of in-flight tweens.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    now_ms: f64,
    tweens: Vec<Scheduled>,
    interpolator: StringInterpolator,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of tweens that have not completed yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tweens.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Pending tweens for `node`.
    pub fn tweens_for(&self, node: NodeId) -> impl Iterator<Item = &Tween> {
        self.tweens
            .iter()
            .filter(move |s| s.tween.node == node)
            .map(|s| &s.tween)
    }

    /// Schedule a tween starting now (plus its delay). An earlier tween on the
    /// same node and attribute is interrupted, end action included.
    pub fn schedule(&mut self, tween: Tween) {
        self.tweens
            .retain(|s| !(s.tween.node == tween.node && s.tween.attr == tween.attr));
        self.tweens.push(Scheduled {
            tween,
            scheduled_at: self.now_ms,
            from: None,
        });
    }

    /// Drop every pending tween of `node` without running end actions.
    pub fn interrupt(&mut self, node: NodeId) {
        self.tweens.retain(|s| s.tween.node != node);
    }

    /// Move the clock forward by `dt_ms` and apply every running tween.
    pub fn advance(&mut self, document: &mut Document, dt_ms: f64) {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;
        let mut finished = Vec::new();

        for (i, scheduled) in self.tweens.iter_mut().enumerate() {
            let start = scheduled.starts_at();
            if now < start {
                continue;
            }

            let tween = &scheduled.tween;
            let from = scheduled.from.get_or_insert_with(|| {
                document.attr(tween.node, &tween.attr).map_or_else(
                    || self.interpolator.zeroed(&tween.target),
                    str::to_string,
                )
            });

            let progress = if tween.duration_ms <= 0.0 {
                1.0
            } else {
                ((now - start) / tween.duration_ms).min(1.0)
            };
            let value = self
                .interpolator
                .interpolate(from, &tween.target, tween.ease.apply(progress));
            document.set_attr(tween.node, &tween.attr, value);

            if progress >= 1.0 {
                finished.push(i);
            }
        }

        for i in finished.into_iter().rev() {
            let done = self.tweens.remove(i);
            trace!(
                "tween done: node {} {}={}",
                done.tween.node.index(),
                done.tween.attr,
                done.tween.target
            );
            if done.tween.on_end == EndAction::Remove {
                document.remove(done.tween.node);
            }
        }
    }

    /// Time until the last pending tween completes.
    #[must_use]
    pub fn remaining_ms(&self) -> f64 {
        self.tweens
            .iter()
            .map(|s| s.starts_at() + s.tween.duration_ms.max(0.0) - self.now_ms)
            .fold(0.0, f64::max)
    }

    /// Run every pending tween to completion.
    pub fn finish(&mut self, document: &mut Document) {
        while !self.is_idle() {
            // at least one millisecond per step so rounding cannot stall the clock
            let step = self.remaining_ms().max(1.0);
            self.advance(document, step);
        }
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;

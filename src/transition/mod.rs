//! Animated attribute changes driven by an explicit clock.

mod ease;
mod interpolate;
mod timeline;

pub use ease::Ease;
pub use interpolate::StringInterpolator;
pub use timeline::{EndAction, Timeline, Tween};

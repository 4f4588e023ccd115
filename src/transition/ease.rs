//! Easing curves for transitions.

/// Maps linear progress to eased progress, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Symmetric cubic easing; the default for transitions.
    #[default]
    CubicInOut,
}

impl Ease {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = (-2.0_f64).mul_add(t, 2.0);
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

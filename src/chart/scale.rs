//! Linear mapping from data values to pixels.

/// Maps `domain` proportionally onto `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Pixel position of `value`. A collapsed domain maps everything to the
    /// start of the range.
    #[must_use]
    #[allow(clippy::float_cmp)] // only an exactly collapsed domain is degenerate
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return r0;
        }
        ((value - d0) / (d1 - d0)).mul_add(r1 - r0, r0)
    }
}

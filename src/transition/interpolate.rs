//! Interpolation between attribute strings with embedded numbers.

use std::fmt::Write;

use regex::Regex;

/// Interpolates the numbers embedded in two strings, keeping the text of the
/// target string around them.
///
/// `translate(1000,75)` → `translate(10,75)` at `t = 0.5` yields
/// `translate(505,75)`. Numbers of the target with no counterpart in the
/// start string are held at their target value.
#[derive(Debug, Clone)]
pub struct StringInterpolator {
    number: Regex,
}

impl Default for StringInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterpolator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            number: Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?")
                .expect("Invalid regex"),
        }
    }

    fn numbers(&self, s: &str) -> Vec<f64> {
        self.number
            .find_iter(s)
            .filter_map(|m| m.as_str().parse().ok())
            .collect()
    }

    /// The start value used when an attribute has no current value: the
    /// target with every number replaced by zero.
    #[must_use]
    pub fn zeroed(&self, target: &str) -> String {
        self.number.replace_all(target, "0").into_owned()
    }

    /// Value at progress `t` in `[0, 1]`.
    #[must_use]
    pub fn interpolate(&self, from: &str, to: &str, t: f64) -> String {
        if t >= 1.0 {
            return to.to_string();
        }

        let starts = self.numbers(from);
        let mut output = String::with_capacity(to.len());
        let mut last = 0;

        for (i, m) in self.number.find_iter(to).enumerate() {
            output.push_str(&to[last..m.start()]);
            last = m.end();

            let Ok(end) = m.as_str().parse::<f64>() else {
                output.push_str(m.as_str());
                continue;
            };
            let value = starts
                .get(i)
                .map_or(end, |&start| (end - start).mul_add(t, start));
            let _ = write!(output, "{value}");
        }

        output.push_str(&to[last..]);
        output
    }
}

#[cfg(test)]
#[path = "interpolate_tests.rs"]
mod tests;

pub mod chart;
pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod dom;
pub mod error;
pub mod host;
pub mod transition;

pub use chart::Chart;
pub use error::{ChartError, Result};
pub use host::Window;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

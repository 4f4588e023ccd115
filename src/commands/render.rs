use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::chart::Chart;
use crate::cli::{Cli, RenderArgs};
use crate::config::{ChartConfig, Record};
use crate::data::load_records;
use crate::host::Window;
use crate::{ChartError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::config::load_config;

#[must_use]
pub fn run_render(args: &RenderArgs, cli: &Cli) -> i32 {
    match run_render_impl(args, cli.no_config) {
        Ok(svg) => match write_output(args.output.as_deref(), &svg) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                EXIT_CONFIG_ERROR
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Renders every data file in turn and returns the chart's SVG markup.
///
/// # Errors
/// Returns an error if configuration or data cannot be loaded, or the
/// configured container does not exist.
pub fn run_render_impl(args: &RenderArgs, no_config: bool) -> Result<String> {
    let mut config = load_config(args.config.as_deref(), no_config)?;
    if let Some(width) = args.width {
        config.svg_width = width;
    }
    if let Some(height) = args.height {
        config.svg_height = height;
    }

    let datasets = args
        .data
        .iter()
        .map(|path| load_records(path))
        .collect::<Result<Vec<_>>>()?;

    let mut window = prepare_window(&config);
    let chart = Chart::with_config(config);
    render_datasets(&chart, &mut window, &datasets, args.at)?;

    let svg = chart
        .svg_node()
        .map(|node| window.document().to_svg(node))
        .ok_or_else(|| ChartError::ContainerNotFound(chart.container()))?;
    Ok(svg)
}

/// Render `datasets` one after another on `chart`.
///
/// Transitions of every render but the last run to completion. The last
/// render is advanced by `at` milliseconds, or settled when `at` is `None`.
///
/// # Errors
/// Returns the first render error.
pub fn render_datasets(
    chart: &Chart,
    window: &mut Window,
    datasets: &[Vec<Record>],
    at: Option<f64>,
) -> Result<()> {
    let Some((last, earlier)) = datasets.split_last() else {
        chart.render(window)?;
        settle_or_advance(window, at);
        return Ok(());
    };

    for (i, data) in earlier.iter().enumerate() {
        debug!("rendering data set {}", i + 1);
        chart.set_data(data.clone()).render(window)?;
        window.settle();
    }

    info!("rendering final data set with {} rows", last.len());
    chart.set_data(last.clone()).render(window)?;
    settle_or_advance(window, at);
    Ok(())
}

fn settle_or_advance(window: &mut Window, at: Option<f64>) {
    match at {
        Some(ms) => window.advance(ms),
        None => window.settle(),
    }
}

/// A window sized to the chart, holding the `#id` container the
/// configuration names, if any.
fn prepare_window(config: &ChartConfig) -> Window {
    let mut window = Window::with_viewport_width(config.svg_width);
    if let Some(id) = config.container.strip_prefix('#') {
        window.add_container(id, config.svg_width);
    }
    window
}

fn write_output(output_path: Option<&Path>, content: &str) -> Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

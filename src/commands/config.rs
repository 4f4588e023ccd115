use std::fs;
use std::path::Path;

use crate::cli::{Cli, ConfigAction, ConfigOutputFormat};
use crate::config::{ChartConfig, ConfigLoader, FileConfigLoader, StatePatch};
use crate::{ChartError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_config(args: &crate::cli::ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), *format, cli),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.error_type());
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates a configuration file.
///
/// # Errors
/// Returns an error if the file doesn't exist, is not valid TOML, or names
/// an unknown field.
pub fn run_config_validate_impl(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(ChartError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(config_path)?;
    let _: StatePatch = toml::from_str(&content)?;
    Ok(())
}

fn run_config_show(config_path: Option<&Path>, format: ConfigOutputFormat, cli: &Cli) -> i32 {
    match run_config_show_impl(config_path, format, cli.no_config) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.error_type());
            EXIT_CONFIG_ERROR
        }
    }
}

/// Shows the effective configuration.
///
/// # Errors
/// Returns an error if the configuration file cannot be loaded or serialization fails.
pub fn run_config_show_impl(
    config_path: Option<&Path>,
    format: ConfigOutputFormat,
    no_config: bool,
) -> Result<String> {
    let config = load_config(config_path, no_config)?;

    match format {
        ConfigOutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            Ok(format!("{json}\n"))
        }
        ConfigOutputFormat::Text => format_config_text(&config),
    }
}

/// Defaults overlaid with the configuration file: `config_path` when given,
/// else the discovered one. `no_config` skips discovery but not an explicit path.
///
/// # Errors
/// Returns an error if the configuration file cannot be read or parsed.
pub fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<ChartConfig> {
    let loader = FileConfigLoader::new();
    let patch = match config_path {
        Some(path) => loader.load_from_path(path)?,
        None if no_config => StatePatch::default(),
        None => loader.load()?,
    };

    let mut config = ChartConfig::default();
    config.apply(patch);
    Ok(config)
}

/// Render the configuration as TOML under a heading.
///
/// # Errors
/// Returns an error if the configuration cannot be serialized.
pub fn format_config_text(config: &ChartConfig) -> Result<String> {
    let mut output = String::from("=== Effective Configuration ===\n\n");
    output.push_str(&toml::to_string(config)?);
    Ok(output)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Loading chart rows from JSON or CSV files.

use std::fs;
use std::path::Path;

use log::debug;

use crate::config::Record;
use crate::error::{ChartError, Result};

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// An array of `{ "key": .., "value": .. }` objects.
    Json,
    /// One `key,value` pair per line, with an optional header line.
    Csv,
}

impl DataFormat {
    /// Pick the format from the file extension, falling back to the content.
    #[must_use]
    pub fn detect(path: &Path, content: &str) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ if content.trim_start().starts_with('[') => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Read and parse the rows in `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid JSON/CSV data.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|source| ChartError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DataFormat::detect(path, &content);
    debug!("reading {} as {format:?}", path.display());
    parse_records(&content, format, path)
}

/// Parse rows from `content`. `path` is only used for error messages.
///
/// # Errors
/// Returns [`ChartError::DataParse`] describing the first malformed entry.
pub fn parse_records(content: &str, format: DataFormat, path: &Path) -> Result<Vec<Record>> {
    match format {
        DataFormat::Json => serde_json::from_str(content).map_err(|e| ChartError::DataParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        DataFormat::Csv => parse_csv(content, path),
    }
}

fn parse_csv(content: &str, path: &Path) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    for (position, (line_no, line)) in lines.enumerate() {
        let parse_error = |reason: String| ChartError::DataParse {
            path: path.to_path_buf(),
            reason: format!("line {line_no}: {reason}"),
        };

        let (key, value) = line
            .rsplit_once(',')
            .ok_or_else(|| parse_error(format!("expected `key,value`, got {line:?}")))?;
        let key = key.trim().trim_matches('"');
        let value = value.trim();

        match value.parse::<f64>() {
            Ok(value) => records.push(Record::new(key, value)),
            // a leading non-numeric row is a header
            Err(_) if position == 0 => {}
            Err(_) => return Err(parse_error(format!("invalid number {value:?}"))),
        }
    }
    Ok(records)
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse data file {path}: {reason}")]
    DataParse { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl ChartError {
    /// Short category name used in error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::ContainerNotFound(_) => "Container",
            Self::Config(_) => "Config",
            Self::DataParse { .. } => "Data",
            Self::FileRead { .. } | Self::Io(_) => "IO",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

#![allow(dead_code)]

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the svg-barchart binary.
#[macro_export]
macro_rules! svg_barchart {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("svg-barchart"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content and returns its path.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates the discovered `.svg-barchart.toml` config file.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".svg-barchart.toml", content)
    }

    /// Creates a JSON data file from `(key, value)` pairs.
    pub fn create_json_data(&self, relative_path: &str, rows: &[(&str, f64)]) -> PathBuf {
        let rows: Vec<_> = rows
            .iter()
            .map(|(key, value)| serde_json::json!({ "key": key, "value": value }))
            .collect();
        let content = serde_json::to_string(&rows).expect("Failed to serialize rows");
        self.create_file(relative_path, &content)
    }

    /// Creates a CSV data file with a header line from `(key, value)` pairs.
    pub fn create_csv_data(&self, relative_path: &str, rows: &[(&str, f64)]) -> PathBuf {
        let mut content = String::from("key,value\n");
        for (key, value) in rows {
            let _ = writeln!(content, "{key},{value}");
        }
        self.create_file(relative_path, &content)
    }
}

// Catalog configuration
// Where the row error log goes and how the CSV is delimited

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_PATH: &str = "resale2024_log.txt";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogConfig {
    /// Row error log, truncated at the start of every load
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Field delimiter (must be ASCII)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

fn default_delimiter() -> char {
    ','
}

impl CatalogConfig {
    /// Load configuration from a JSON file; missing keys take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    pub fn with_log_path<P: Into<PathBuf>>(mut self, log_path: P) -> Self {
        self.log_path = log_path.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("Delimiter must be an ASCII character, got {:?}", self.delimiter))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            log_path: default_log_path(),
            delimiter: default_delimiter(),
        }
    }
}

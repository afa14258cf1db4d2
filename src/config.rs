//! Exporter configuration
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! output_dir = "exports"
//! tool_name = "table-export"
//! default_format = "sql"
//! ```

use crate::export::DEFAULT_TOOL_NAME;
use crate::models::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Exporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory artifacts are written to
    pub output_dir: PathBuf,
    /// Name written into SQL dump headers
    pub tool_name: String,
    /// Format used when none is requested
    pub default_format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            default_format: ExportFormat::Csv,
        }
    }
}

impl ExportConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

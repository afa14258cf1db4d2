//! Error types for the CLI

use crate::config::ConfigError;
use crate::export::ExportError;
use thiserror::Error;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            CliError::Export(err) => err.user_message(),
            CliError::Config(err) => {
                format!("{err}\n\nHint: Check the file passed with --config.")
            }
        }
    }
}

//! Export functionality
//!
//! Provides encoders for the supported document formats:
//! - CSV
//! - JSON
//! - SQL dump (DDL + DML for SQLite-compatible engines)
//!
//! All encoders interpret cells through [`value`], the single place where
//! per-format literal and escaping rules live.

pub mod csv;
pub mod json;
pub mod sql;
pub mod value;

use crate::models::{DatabaseInfo, ExportFormat, RowSet, Table};
use crate::storage::StorageError;
use chrono::{DateTime, SecondsFormat, Utc};

/// Tool name written into document headers unless configured otherwise
pub const DEFAULT_TOOL_NAME: &str = "table-export";

/// Result of an export operation
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// Encoded document bytes
    pub content: Vec<u8>,
    /// Format of `content`
    pub format: ExportFormat,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No tables selected for export")]
    NoTables,
    #[error("Query failed for table '{table}': {message}")]
    QueryFailed { table: String, message: String },
    #[error("Unexpected non-tabular result for table '{table}'")]
    UnexpectedResult { table: String },
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ExportError {
    /// Table the failure is attached to, if any
    pub fn table_name(&self) -> Option<&str> {
        match self {
            ExportError::QueryFailed { table, .. } | ExportError::UnexpectedResult { table } => {
                Some(table)
            }
            ExportError::UnknownTable(table) => Some(table),
            _ => None,
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ExportError::NoTables => {
                "No tables to export.\n\nHint: Select at least one table, or check that the database contains tables."
                    .to_string()
            }
            ExportError::QueryFailed { table, message } => {
                format!(
                    "Could not read table '{table}': {message}\n\nHint: Check that the table still exists and is readable."
                )
            }
            ExportError::UnexpectedResult { table } => {
                format!(
                    "Reading table '{table}' did not return rows.\n\nHint: The backend answered with a write acknowledgement instead of data."
                )
            }
            ExportError::UnknownTable(table) => {
                format!("Table not found: {table}\n\nHint: Use the 'tables' command to list available tables.")
            }
            _ => self.to_string(),
        }
    }
}

/// One table's schema paired with its fetched rows
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    pub table: Table,
    pub rows: RowSet,
}

impl TableSnapshot {
    pub fn new(table: Table, rows: RowSet) -> Self {
        Self { table, rows }
    }
}

/// Metadata shared by every encoder for one export
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeContext {
    pub database: DatabaseInfo,
    pub exported_at: DateTime<Utc>,
    pub tool_name: String,
}

impl EncodeContext {
    pub fn new(database: DatabaseInfo, exported_at: DateTime<Utc>) -> Self {
        Self {
            database,
            exported_at,
            tool_name: DEFAULT_TOOL_NAME.to_string(),
        }
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = tool_name.into();
        self
    }

    /// Export time as RFC 3339 with whole seconds, e.g. `2024-05-01T08:30:00Z`
    pub fn timestamp(&self) -> String {
        self.exported_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Encode `tables` with the encoder matching `format`
pub fn encode_tables(
    format: ExportFormat,
    context: &EncodeContext,
    tables: &[TableSnapshot],
) -> Result<ExportResult, ExportError> {
    match format {
        ExportFormat::Csv => CSVExporter.export(tables),
        ExportFormat::Json => JSONExporter.export(context, tables),
        ExportFormat::Sql => SQLDumpExporter.export(context, tables),
    }
}

/// Replace line breaks so a name cannot escape a single-line comment
pub(crate) fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

// Re-export for convenience
pub use csv::CSVExporter;
pub use json::JSONExporter;
pub use sql::SQLDumpExporter;

//! Export request types

use super::table::Table;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Sql,
}

impl ExportFormat {
    /// File extension of the produced artifact
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Sql => "sql",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "sql" => Ok(ExportFormat::Sql),
            _ => Err(format!(
                "Invalid export format: {}. Valid options: csv, json, sql",
                s
            )),
        }
    }
}

/// Storage engine family behind a database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseKind {
    /// Relational engine queried with SQL
    Sql,
    /// Document/object store queried per collection
    ObjectStore,
}

const OBJECT_STORE_LABELS: &[&str] = &[
    "realm",
    "mongodb",
    "document",
    "object",
    "json",
    "objectbox",
    "couchbase",
    "firestore",
];

impl DatabaseKind {
    /// Select the engine family from a declared database type label.
    ///
    /// Labels naming a document or object store select [`DatabaseKind::ObjectStore`];
    /// everything else is treated as SQL.
    pub fn from_type_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if OBJECT_STORE_LABELS.iter().any(|l| label.contains(l)) {
            DatabaseKind::ObjectStore
        } else {
            DatabaseKind::Sql
        }
    }
}

/// Database metadata carried into every document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub name: String,
    pub type_label: String,
}

impl DatabaseInfo {
    pub fn new(name: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        DatabaseKind::from_type_label(&self.type_label)
    }
}

/// Which tables a caller wants exported
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableSelection {
    #[default]
    All,
    Named(Vec<String>),
}

/// A single export request; not mutated while the export runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub database: DatabaseInfo,
    pub format: ExportFormat,
    pub tables: Vec<Table>,
}

impl ExportRequest {
    pub fn new(database: DatabaseInfo, format: ExportFormat, tables: Vec<Table>) -> Self {
        Self {
            database,
            format,
            tables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("sql".parse::<ExportFormat>().unwrap(), ExportFormat::Sql);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_kind_from_label() {
        assert_eq!(DatabaseKind::from_type_label("SQLite"), DatabaseKind::Sql);
        assert_eq!(DatabaseKind::from_type_label("DuckDB"), DatabaseKind::Sql);
        assert_eq!(
            DatabaseKind::from_type_label("Realm"),
            DatabaseKind::ObjectStore
        );
        assert_eq!(
            DatabaseKind::from_type_label("JSON documents"),
            DatabaseKind::ObjectStore
        );
    }
}

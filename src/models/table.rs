//! Table and column schema models for the SDK

use serde::{Deserialize, Serialize};

/// Declared type used when a column carries none
pub const DEFAULT_COLUMN_TYPE: &str = "TEXT";

/// Column schema as known to the export system
///
/// # Example
///
/// ```rust
/// use table_export_sdk::models::ColumnSchema;
///
/// let column = ColumnSchema::new("id", "INTEGER").primary_key();
/// assert!(column.is_primary_key);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,
    /// Declared type (may be empty when the backend reports none)
    #[serde(default)]
    pub declared_type: String,
    /// Whether this column is part of the primary key (default: false)
    #[serde(default)]
    pub is_primary_key: bool,
    /// Whether the column allows NULL values (default: true)
    #[serde(default = "default_true")]
    pub is_nullable: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnSchema {
    /// Create a nullable, non-key column
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_primary_key: false,
            is_nullable: true,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    /// Declared type, or [`DEFAULT_COLUMN_TYPE`] when none was declared
    pub fn effective_type(&self) -> &str {
        let trimmed = self.declared_type.trim();
        if trimmed.is_empty() {
            DEFAULT_COLUMN_TYPE
        } else {
            trimmed
        }
    }
}

/// A named relation with an ordered column schema
///
/// `columns` is empty when the backend cannot introspect the schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnSchema>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// A table whose schema is not known
    pub fn unknown_schema(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn has_schema(&self) -> bool {
        !self.columns.is_empty()
    }
}

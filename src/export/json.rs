//! JSON exporter
//!
//! Produces one pretty-printed root object:
//!
//! ```text
//! { "database", "databaseType", "exportedAt", "tables": [ { "columns", "name", "rowCount", "rows" } ] }
//! ```
//!
//! `serde_json::Map` keeps insertion order, so every object (embedded JSON
//! blobs included) is re-keyed in sorted order before serialization and the
//! output is deterministic for identical input. Duplicate column names
//! collapse into one key per row object with the later column's value winning.

use super::value::to_json_value;
use super::{EncodeContext, ExportError, ExportResult, TableSnapshot};
use crate::models::ExportFormat;
use serde_json::{Map, Value};

/// Exporter for JSON format.
pub struct JSONExporter;

impl JSONExporter {
    /// Build the JSON object for one table
    pub fn table_value(snapshot: &TableSnapshot) -> Value {
        let rows = &snapshot.rows;

        let row_values: Vec<Value> = (0..rows.row_count())
            .map(|index| {
                let mut object = Map::new();
                for (name, cell) in rows.columns.iter().zip(rows.padded_row(index)) {
                    object.insert(name.clone(), to_json_value(cell));
                }
                Value::Object(object)
            })
            .collect();

        let mut table = Map::new();
        table.insert("name".to_string(), Value::String(snapshot.table.name.clone()));
        table.insert(
            "columns".to_string(),
            Value::Array(rows.columns.iter().cloned().map(Value::String).collect()),
        );
        table.insert("rowCount".to_string(), Value::Number(rows.row_count().into()));
        table.insert("rows".to_string(), Value::Array(row_values));
        Value::Object(table)
    }

    /// Build the root document object
    pub fn document_value(context: &EncodeContext, tables: &[TableSnapshot]) -> Value {
        let mut root = Map::new();
        root.insert(
            "database".to_string(),
            Value::String(context.database.name.clone()),
        );
        root.insert(
            "databaseType".to_string(),
            Value::String(context.database.type_label.clone()),
        );
        root.insert("exportedAt".to_string(), Value::String(context.timestamp()));
        root.insert(
            "tables".to_string(),
            Value::Array(tables.iter().map(Self::table_value).collect()),
        );
        Value::Object(root)
    }

    /// Export tables to a JSON document.
    pub fn export(
        &self,
        context: &EncodeContext,
        tables: &[TableSnapshot],
    ) -> Result<ExportResult, ExportError> {
        if tables.is_empty() {
            return Err(ExportError::NoTables);
        }

        let document = sort_keys(Self::document_value(context, tables));
        let content = serde_json::to_vec_pretty(&document)
            .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

        Ok(ExportResult {
            content,
            format: ExportFormat::Json,
        })
    }
}

/// Recursively order object keys
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<(String, Value)> = object.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

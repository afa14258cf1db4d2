//! JSON document store
//!
//! A file-backed [`ObjectStore`]. The file holds one object mapping collection
//! names to arrays of documents:
//!
//! ```json
//! {
//!   "users": [ { "id": 1, "name": "Ann" }, { "id": 2, "avatar": { "$binary": "iVBORw0=" } } ]
//! }
//! ```
//!
//! Binary values are written as `{"$binary": "<base64>"}`. Other nested
//! arrays and objects cannot be classified as a scalar and are kept as their
//! compact JSON text.

use super::object::{Document, ObjectResponse, ObjectStore};
use crate::export::ExportError;
use crate::models::{Cell, Table};
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Key marking a base64-encoded binary value
pub const BINARY_KEY: &str = "$binary";

/// In-memory snapshot of a JSON document file
#[derive(Debug, Clone, Default)]
pub struct JsonDocumentStore {
    collections: Map<String, Value>,
}

impl JsonDocumentStore {
    /// Load a store from a JSON file
    pub fn open(path: &Path) -> Result<Self, ExportError> {
        let content = std::fs::read(path).map_err(|e| {
            ExportError::SourceUnavailable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let store = Self::from_slice(&content).map_err(|e| {
            ExportError::SourceUnavailable(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        info!(
            "Loaded {} collections from {}",
            store.collections.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse a store from JSON bytes
    pub fn from_slice(content: &[u8]) -> Result<Self, String> {
        match serde_json::from_slice::<Value>(content) {
            Ok(Value::Object(collections)) => Ok(Self { collections }),
            Ok(_) => Err("root must be an object of collections".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Classify a JSON value as a cell
    pub fn value_to_cell(value: Value) -> Cell {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Integer(i),
                None => n.as_f64().map(Cell::Real).unwrap_or_else(|| Cell::from_display(n)),
            },
            Value::String(s) => Cell::Text(s),
            Value::Object(object) => match Self::binary_payload(&object) {
                Some(bytes) => Cell::Binary(bytes),
                None => Cell::from_display(Value::Object(object)),
            },
            other => Cell::from_display(other),
        }
    }

    fn binary_payload(object: &Map<String, Value>) -> Option<Vec<u8>> {
        if object.len() != 1 {
            return None;
        }
        let encoded = object.get(BINARY_KEY)?.as_str()?;
        general_purpose::STANDARD.decode(encoded).ok()
    }
}

impl ObjectStore for JsonDocumentStore {
    fn collections(&self) -> Result<Vec<Table>, String> {
        self.collections
            .iter()
            .map(|(name, value)| match value {
                Value::Array(_) => Ok(Table::unknown_schema(name.clone())),
                _ => Err(format!("collection '{}' is not an array", name)),
            })
            .collect()
    }

    fn fetch_objects(&self, collection: &str, limit: Option<usize>) -> ObjectResponse {
        let Some(value) = self.collections.get(collection) else {
            return ObjectResponse::Error(format!("no such collection: {}", collection));
        };
        let Value::Array(items) = value else {
            return ObjectResponse::Error(format!("collection '{}' is not an array", collection));
        };

        let mut documents: Vec<Document> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().take(limit.unwrap_or(usize::MAX)).enumerate() {
            let Value::Object(fields) = item else {
                return ObjectResponse::Error(format!(
                    "item {} of '{}' is not an object",
                    index, collection
                ));
            };
            documents.push(
                fields
                    .iter()
                    .map(|(field, value)| (field.clone(), Self::value_to_cell(value.clone())))
                    .collect(),
            );
        }

        ObjectResponse::Objects(documents)
    }
}

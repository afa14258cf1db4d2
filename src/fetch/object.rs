//! Object-store adapter
//!
//! Object stores return documents rather than rows. Columns are the union of
//! field names in the order they are first seen across the documents; a field a
//! document does not carry reads as NULL.

use super::TableSource;
use crate::export::ExportError;
use crate::models::{Cell, DatabaseKind, Row, RowSet, Table};
use std::collections::HashMap;
use tracing::debug;

/// One stored object as ordered `(field, value)` pairs
pub type Document = Vec<(String, Cell)>;

/// Backend answer to a collection read
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectResponse {
    /// Documents of the collection
    Objects(Vec<Document>),
    /// Write acknowledgement
    Acknowledged { affected: u64 },
    /// Backend-reported failure
    Error(String),
}

/// Document/object backend
pub trait ObjectStore {
    /// Collections exposed as tables
    fn collections(&self) -> Result<Vec<Table>, String>;

    /// Read objects of `collection`, at most `limit` when given
    fn fetch_objects(&self, collection: &str, limit: Option<usize>) -> ObjectResponse;
}

impl<O: ObjectStore + ?Sized> ObjectStore for Box<O> {
    fn collections(&self) -> Result<Vec<Table>, String> {
        (**self).collections()
    }

    fn fetch_objects(&self, collection: &str, limit: Option<usize>) -> ObjectResponse {
        (**self).fetch_objects(collection, limit)
    }
}

/// Table source reading whole collections from an object store
pub struct ObjectTableSource<O: ObjectStore> {
    store: O,
}

impl<O: ObjectStore> ObjectTableSource<O> {
    pub fn new(store: O) -> Self {
        Self { store }
    }

    /// Align documents into a row set with first-seen column order
    pub fn documents_to_rows(documents: Vec<Document>) -> RowSet {
        let mut columns: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for document in &documents {
            for (field, _) in document {
                if !positions.contains_key(field) {
                    positions.insert(field.clone(), columns.len());
                    columns.push(field.clone());
                }
            }
        }

        let rows: Vec<Row> = documents
            .into_iter()
            .map(|document| {
                let mut row = vec![Cell::Null; columns.len()];
                for (field, value) in document {
                    if let Some(&index) = positions.get(&field) {
                        row[index] = value;
                    }
                }
                row
            })
            .collect();

        RowSet::new(columns, rows)
    }
}

impl<O: ObjectStore> TableSource for ObjectTableSource<O> {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::ObjectStore
    }

    fn list_tables(&self) -> Result<Vec<Table>, ExportError> {
        self.store
            .collections()
            .map_err(ExportError::SourceUnavailable)
    }

    fn fetch(&self, table: &Table) -> Result<RowSet, ExportError> {
        match self.store.fetch_objects(&table.name, None) {
            ObjectResponse::Objects(documents) => {
                debug!(
                    "Fetched {} objects from collection '{}'",
                    documents.len(),
                    table.name
                );
                Ok(Self::documents_to_rows(documents))
            }
            ObjectResponse::Acknowledged { .. } => Err(ExportError::UnexpectedResult {
                table: table.name.clone(),
            }),
            ObjectResponse::Error(message) => Err(ExportError::QueryFailed {
                table: table.name.clone(),
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_in_first_seen_order() {
        let documents = vec![
            vec![("b".to_string(), Cell::Integer(1))],
            vec![
                ("a".to_string(), Cell::from("x")),
                ("b".to_string(), Cell::Integer(2)),
            ],
        ];
        let rows = ObjectTableSource::<Box<dyn ObjectStore>>::documents_to_rows(documents);
        assert_eq!(rows.columns, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(rows.rows[0], vec![Cell::Integer(1), Cell::Null]);
        assert_eq!(rows.rows[1], vec![Cell::Integer(2), Cell::from("x")]);
    }
}

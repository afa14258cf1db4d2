//! Table data fetching
//!
//! Abstracts over the two backend families so the exporter sees one shape per
//! table, a [`RowSet`]:
//! - [`SqlTableSource`]: full-table scans through a [`SqlConnection`]
//! - [`ObjectTableSource`]: unpaginated collection reads through an [`ObjectStore`]
//!
//! A fetch either returns every row of the table or fails; no partial row sets
//! are produced.

pub mod json_store;
pub mod object;
pub mod sql;

#[cfg(feature = "duckdb-backend")]
pub mod duckdb_backend;

use crate::export::ExportError;
use crate::models::{DatabaseKind, RowSet, Table};
use std::path::Path;

/// Uniform access to a database's tables and their rows
pub trait TableSource {
    /// Engine family this source reads from
    fn kind(&self) -> DatabaseKind;

    /// List the tables known to the backend
    fn list_tables(&self) -> Result<Vec<Table>, ExportError>;

    /// Fetch every row of `table`
    fn fetch(&self, table: &Table) -> Result<RowSet, ExportError>;
}

impl<S: TableSource + ?Sized> TableSource for Box<S> {
    fn kind(&self) -> DatabaseKind {
        (**self).kind()
    }

    fn list_tables(&self) -> Result<Vec<Table>, ExportError> {
        (**self).list_tables()
    }

    fn fetch(&self, table: &Table) -> Result<RowSet, ExportError> {
        (**self).fetch(table)
    }
}

/// Backend answer to a read query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    /// Tabular result
    Rows(RowSet),
    /// Mutation acknowledgement
    Affected { rows: u64 },
    /// Backend-reported failure
    Error(String),
}

/// Open the table source for `kind` backed by the database at `path`.
///
/// Object stores are read from JSON document files. SQL databases require the
/// `duckdb-backend` feature.
pub fn open_source(kind: DatabaseKind, path: &Path) -> Result<Box<dyn TableSource>, ExportError> {
    match kind {
        DatabaseKind::ObjectStore => {
            let store = json_store::JsonDocumentStore::open(path)?;
            Ok(Box::new(ObjectTableSource::new(store)))
        }
        DatabaseKind::Sql => {
            #[cfg(feature = "duckdb-backend")]
            {
                let connection = duckdb_backend::DuckDbConnection::open(path)?;
                Ok(Box::new(SqlTableSource::new(connection)))
            }
            #[cfg(not(feature = "duckdb-backend"))]
            {
                Err(ExportError::SourceUnavailable(format!(
                    "SQL support not enabled for {}. Build with --features duckdb-backend",
                    path.display()
                )))
            }
        }
    }
}

pub use json_store::JsonDocumentStore;
pub use object::{Document, ObjectResponse, ObjectStore, ObjectTableSource};
pub use sql::{SqlConnection, SqlTableSource};

#[cfg(feature = "duckdb-backend")]
pub use duckdb_backend::DuckDbConnection;

//! Table Export SDK - multi-format export of database tables
//!
//! Provides unified interfaces for:
//! - Reading tables from SQL and object-store backends (`fetch`)
//! - Rendering cells per target format (`export::value`)
//! - Encoding CSV, JSON and SQL dump documents (`export`)
//! - Orchestrating an export and naming its artifact (`exporter`)
//! - Persisting artifacts atomically (`storage`)

pub mod config;
pub mod export;
pub mod exporter;
pub mod fetch;
pub mod models;
pub mod storage;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ConfigError, ExportConfig};
pub use export::{
    CSVExporter, EncodeContext, ExportError, ExportResult, JSONExporter, SQLDumpExporter,
    TableSnapshot, encode_tables,
};
pub use exporter::{ExportArtifact, Exporter, artifact_file_name, sanitize_name};
pub use fetch::{
    JsonDocumentStore, ObjectStore, ObjectTableSource, QueryResponse, SqlConnection,
    SqlTableSource, TableSource, open_source,
};
#[cfg(feature = "duckdb-backend")]
pub use fetch::DuckDbConnection;
pub use storage::{FileSystemStorageBackend, MemoryStorageBackend, StorageBackend, StorageError};

// Re-export models
pub use models::{
    Cell, CellKind, ColumnSchema, DatabaseInfo, DatabaseKind, ExportFormat, ExportRequest, Row,
    RowSet, Table, TableSelection,
};

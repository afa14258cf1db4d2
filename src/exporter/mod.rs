//! Export orchestration
//!
//! Drives one export request end to end: fetch every selected table, encode
//! the snapshots with the requested format, name the artifact and persist it.
//! Tables are processed sequentially in request order; the first failure
//! aborts the export and nothing is written.

pub mod naming;

pub use naming::{
    ALL_TABLES_MARKER, NAME_PLACEHOLDER, artifact_file_name, numbered_file_name, sanitize_name,
};

use crate::config::ExportConfig;
use crate::export::{EncodeContext, ExportError, TableSnapshot, encode_tables};
use crate::fetch::TableSource;
use crate::models::{ExportFormat, ExportRequest, Table, TableSelection};
use crate::storage::StorageBackend;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Description of a persisted export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// File name relative to the storage backend root
    pub file_name: String,
    pub format: ExportFormat,
    pub table_count: usize,
    pub row_count: usize,
    pub byte_len: usize,
}

/// Exporter that reads from a table source and writes through a storage backend
pub struct Exporter<S: TableSource, B: StorageBackend> {
    source: S,
    storage: B,
    config: ExportConfig,
}

impl<S: TableSource, B: StorageBackend> Exporter<S, B> {
    /// Create a new exporter with default configuration
    pub fn new(source: S, storage: B) -> Self {
        Self {
            source,
            storage,
            config: ExportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn storage(&self) -> &B {
        &self.storage
    }

    /// Resolve a selection against the tables the source knows.
    ///
    /// Named selections keep the caller's order.
    pub fn resolve_tables(&self, selection: &TableSelection) -> Result<Vec<Table>, ExportError> {
        let available = self.source.list_tables()?;

        let tables = match selection {
            TableSelection::All => available,
            TableSelection::Named(names) => names
                .iter()
                .map(|name| {
                    available
                        .iter()
                        .find(|table| &table.name == name)
                        .cloned()
                        .ok_or_else(|| ExportError::UnknownTable(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        if tables.is_empty() {
            return Err(ExportError::NoTables);
        }
        Ok(tables)
    }

    /// Fetch every table of the request, in order
    fn snapshot(&self, request: &ExportRequest) -> Result<Vec<TableSnapshot>, ExportError> {
        if request.tables.is_empty() {
            return Err(ExportError::NoTables);
        }

        request
            .tables
            .iter()
            .map(|table| {
                let rows = self.source.fetch(table)?;
                debug!("Fetched {} rows from '{}'", rows.row_count(), table.name);
                Ok(TableSnapshot::new(table.clone(), rows))
            })
            .collect()
    }

    fn encode(
        &self,
        request: &ExportRequest,
        snapshots: &[TableSnapshot],
        exported_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        let context = EncodeContext::new(request.database.clone(), exported_at)
            .with_tool_name(self.config.tool_name.clone());
        Ok(encode_tables(request.format, &context, snapshots)?.content)
    }

    /// Fetch and encode without persisting
    pub fn render(
        &self,
        request: &ExportRequest,
        exported_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        let snapshots = self.snapshot(request)?;
        self.encode(request, &snapshots, exported_at)
    }

    /// Export the request, stamped with the current time
    pub fn export(&self, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
        self.export_at(request, Utc::now())
    }

    /// First of `file_name`, `file_name` numbered `_1`, `_2`, ... not yet in storage
    fn unused_file_name(&self, file_name: &str) -> Result<String, ExportError> {
        let mut candidate = file_name.to_string();
        let mut sequence = 1;
        while self.storage.file_exists(&candidate)? {
            candidate = numbered_file_name(file_name, sequence);
            sequence += 1;
        }
        Ok(candidate)
    }

    /// Export the request, stamped with `exported_at`.
    ///
    /// An existing artifact with the same name (same selection exported within
    /// the same second) is kept; the new one gets a numbered name.
    pub fn export_at(
        &self,
        request: &ExportRequest,
        exported_at: DateTime<Utc>,
    ) -> Result<ExportArtifact, ExportError> {
        let snapshots = self.snapshot(request)?;
        let content = self.encode(request, &snapshots, exported_at)?;

        let table_names: Vec<&str> = request.tables.iter().map(|t| t.name.as_str()).collect();
        let file_name = self.unused_file_name(&artifact_file_name(
            &request.database.name,
            &table_names,
            request.format,
            exported_at,
        ))?;

        self.storage.write_file(&file_name, &content)?;

        let artifact = ExportArtifact {
            file_name,
            format: request.format,
            table_count: snapshots.len(),
            row_count: snapshots.iter().map(|s| s.rows.row_count()).sum(),
            byte_len: content.len(),
        };
        info!(
            "Exported {} tables ({} rows) to {}",
            artifact.table_count, artifact.row_count, artifact.file_name
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, DatabaseInfo, DatabaseKind, RowSet};
    use crate::storage::MemoryStorageBackend;

    struct StaticSource;

    impl TableSource for StaticSource {
        fn kind(&self) -> DatabaseKind {
            DatabaseKind::Sql
        }

        fn list_tables(&self) -> Result<Vec<Table>, ExportError> {
            Ok(vec![Table::unknown_schema("a"), Table::unknown_schema("b")])
        }

        fn fetch(&self, table: &Table) -> Result<RowSet, ExportError> {
            Ok(RowSet::new(
                vec!["name".to_string()],
                vec![vec![Cell::from(table.name.as_str())]],
            ))
        }
    }

    #[test]
    fn test_named_selection_keeps_order() {
        let exporter = Exporter::new(StaticSource, MemoryStorageBackend::new());
        let tables = exporter
            .resolve_tables(&TableSelection::Named(vec!["b".into(), "a".into()]))
            .unwrap();
        assert_eq!(tables[0].name, "b");
        assert_eq!(tables[1].name, "a");
    }

    #[test]
    fn test_unknown_table() {
        let exporter = Exporter::new(StaticSource, MemoryStorageBackend::new());
        let result = exporter.resolve_tables(&TableSelection::Named(vec!["zzz".into()]));
        assert!(matches!(result, Err(ExportError::UnknownTable(name)) if name == "zzz"));
    }

    #[test]
    fn test_empty_request_writes_nothing() {
        let exporter = Exporter::new(StaticSource, MemoryStorageBackend::new());
        let request = ExportRequest::new(DatabaseInfo::new("db", "SQLite"), ExportFormat::Csv, vec![]);
        assert!(matches!(exporter.export(&request), Err(ExportError::NoTables)));
        assert!(exporter.storage().list_files("").unwrap().is_empty());
    }

    #[test]
    fn test_same_second_exports_do_not_overwrite() {
        let exporter = Exporter::new(StaticSource, MemoryStorageBackend::new());
        let request = ExportRequest::new(
            DatabaseInfo::new("db", "SQLite"),
            ExportFormat::Csv,
            vec![Table::unknown_schema("a")],
        );
        let at = Utc::now();

        let first = exporter.export_at(&request, at).unwrap();
        let second = exporter.export_at(&request, at).unwrap();
        let third = exporter.export_at(&request, at).unwrap();

        assert!(second.file_name.ends_with("_1.csv"));
        assert!(third.file_name.ends_with("_2.csv"));
        assert_eq!(exporter.storage().list_files("").unwrap().len(), 3);
        assert!(exporter.storage().file_exists(&first.file_name).unwrap());
    }
}

//! SQL query adapter

use super::{QueryResponse, TableSource};
use crate::export::{ExportError, SQLDumpExporter};
use crate::models::{DatabaseKind, RowSet, Table};
use tracing::debug;

/// Connection to a relational backend
pub trait SqlConnection {
    /// Tables with their column schemas
    fn tables(&self) -> Result<Vec<Table>, String>;

    /// Run `sql` and report rows, an acknowledgement, or an error
    fn execute(&self, sql: &str) -> QueryResponse;
}

impl<C: SqlConnection + ?Sized> SqlConnection for Box<C> {
    fn tables(&self) -> Result<Vec<Table>, String> {
        (**self).tables()
    }

    fn execute(&self, sql: &str) -> QueryResponse {
        (**self).execute(sql)
    }
}

/// Table source issuing a full scan per table
pub struct SqlTableSource<C: SqlConnection> {
    connection: C,
}

impl<C: SqlConnection> SqlTableSource<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Full-table scan keyed by the quoted table identifier
    pub fn select_all(table_name: &str) -> String {
        format!(
            "SELECT * FROM {}",
            SQLDumpExporter::quote_identifier(table_name)
        )
    }
}

impl<C: SqlConnection> TableSource for SqlTableSource<C> {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sql
    }

    fn list_tables(&self) -> Result<Vec<Table>, ExportError> {
        self.connection
            .tables()
            .map_err(ExportError::SourceUnavailable)
    }

    fn fetch(&self, table: &Table) -> Result<RowSet, ExportError> {
        let query = Self::select_all(&table.name);
        debug!("Fetching table '{}' with: {}", table.name, query);

        match self.connection.execute(&query) {
            QueryResponse::Rows(rows) => Ok(RowSet::new(rows.columns, rows.rows)),
            QueryResponse::Affected { .. } => Err(ExportError::UnexpectedResult {
                table: table.name.clone(),
            }),
            QueryResponse::Error(message) => Err(ExportError::QueryFailed {
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
    fn test_select_all_quotes_identifier() {
        assert_eq!(
            SqlTableSource::<Box<dyn SqlConnection>>::select_all("my \"t\""),
            "SELECT * FROM \"my \"\"t\"\"\""
        );
    }
}

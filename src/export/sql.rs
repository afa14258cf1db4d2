//! SQL dump exporter for recreating tables and their rows.
//!
//! Statement order is fixed: header comments, `PRAGMA foreign_keys=OFF;`,
//! `BEGIN TRANSACTION;`, then per table `DROP TABLE IF EXISTS`, `CREATE TABLE`
//! and one `INSERT` per row, and finally `COMMIT;`.
//!
//! # Security
//!
//! All identifiers (table names, column names) are quoted with double quotes
//! and internal quote characters are escaped by doubling them.

use super::value::to_sql_literal;
use super::{EncodeContext, ExportError, ExportResult, TableSnapshot, single_line};
use crate::models::{ColumnSchema, DEFAULT_COLUMN_TYPE, ExportFormat};

/// Exporter for SQL dump format.
pub struct SQLDumpExporter;

impl SQLDumpExporter {
    /// Quote and escape an identifier.
    ///
    /// # Example
    ///
    /// ```rust
    /// use table_export_sdk::export::SQLDumpExporter;
    ///
    /// assert_eq!(SQLDumpExporter::quote_identifier("user"), "\"user\"");
    /// assert_eq!(SQLDumpExporter::quote_identifier("a\"b"), "\"a\"\"b\"");
    /// ```
    pub fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Column schema used for `CREATE TABLE`.
    ///
    /// Falls back to the fetched column names, typed as TEXT, nullable and
    /// without a key, when the table carries no schema.
    pub fn effective_columns(snapshot: &TableSnapshot) -> Vec<ColumnSchema> {
        if snapshot.table.has_schema() {
            snapshot.table.columns.clone()
        } else {
            snapshot
                .rows
                .columns
                .iter()
                .map(|name| ColumnSchema::new(name.clone(), DEFAULT_COLUMN_TYPE))
                .collect()
        }
    }

    /// Build the `CREATE TABLE` statement for `columns`
    pub fn create_table(name: &str, columns: &[ColumnSchema]) -> String {
        let key_columns: Vec<&ColumnSchema> =
            columns.iter().filter(|c| c.is_primary_key).collect();
        let inline_key = key_columns.len() == 1;

        let mut definitions: Vec<String> = columns
            .iter()
            .map(|column| {
                let mut definition = format!(
                    "  {} {}",
                    Self::quote_identifier(&column.name),
                    column.effective_type()
                );

                if column.is_primary_key && inline_key {
                    definition.push_str(" PRIMARY KEY");
                } else if !column.is_nullable {
                    definition.push_str(" NOT NULL");
                }

                definition
            })
            .collect();

        if key_columns.len() > 1 {
            let names: Vec<String> = key_columns
                .iter()
                .map(|c| Self::quote_identifier(&c.name))
                .collect();
            definitions.push(format!("  PRIMARY KEY ({})", names.join(", ")));
        }

        format!(
            "CREATE TABLE {} (\n{}\n);",
            Self::quote_identifier(name),
            definitions.join(",\n")
        )
    }

    /// Render the statements for one table
    pub fn export_table(snapshot: &TableSnapshot) -> String {
        let name = &snapshot.table.name;
        let quoted_name = Self::quote_identifier(name);
        let mut sql = String::new();

        sql.push_str(&format!("-- Table: {}\n", single_line(name)));
        sql.push_str(&format!("DROP TABLE IF EXISTS {};\n", quoted_name));

        let columns = Self::effective_columns(snapshot);
        if columns.is_empty() {
            sql.push_str("-- Table has no columns; no definition emitted\n");
            return sql;
        }

        sql.push_str(&Self::create_table(name, &columns));
        sql.push('\n');

        let rows = &snapshot.rows;
        if rows.columns.is_empty() {
            return sql;
        }

        let column_list = rows
            .columns
            .iter()
            .map(|c| Self::quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");

        for index in 0..rows.row_count() {
            let values = rows
                .padded_row(index)
                .map(to_sql_literal)
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(
                "INSERT INTO {} ({}) VALUES ({});\n",
                quoted_name, column_list, values
            ));
        }

        sql
    }

    /// Export tables to a SQL dump.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use table_export_sdk::export::{EncodeContext, SQLDumpExporter, TableSnapshot};
    /// use table_export_sdk::models::{Cell, ColumnSchema, DatabaseInfo, RowSet, Table};
    ///
    /// let table = Table::new("users", vec![ColumnSchema::new("id", "INTEGER").primary_key()]);
    /// let rows = RowSet::new(vec!["id".into()], vec![vec![Cell::Integer(1)]]);
    /// let context = EncodeContext::new(DatabaseInfo::new("app", "SQLite"), Utc::now());
    ///
    /// let result = SQLDumpExporter.export(&context, &[TableSnapshot::new(table, rows)]).unwrap();
    /// let sql = String::from_utf8(result.content).unwrap();
    /// assert!(sql.contains("INSERT INTO \"users\" (\"id\") VALUES (1);"));
    /// ```
    pub fn export(
        &self,
        context: &EncodeContext,
        tables: &[TableSnapshot],
    ) -> Result<ExportResult, ExportError> {
        if tables.is_empty() {
            return Err(ExportError::NoTables);
        }

        let mut sql = String::new();
        sql.push_str(&format!("-- {} SQL dump\n", single_line(&context.tool_name)));
        sql.push_str(&format!(
            "-- Database: {}\n",
            single_line(&context.database.name)
        ));
        sql.push_str(&format!("-- Generated: {}\n\n", context.timestamp()));
        sql.push_str("PRAGMA foreign_keys=OFF;\n");
        sql.push_str("BEGIN TRANSACTION;\n");

        for snapshot in tables {
            sql.push('\n');
            sql.push_str(&Self::export_table(snapshot));
        }

        sql.push_str("\nCOMMIT;\n");

        Ok(ExportResult {
            content: sql.into_bytes(),
            format: ExportFormat::Sql,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, DatabaseInfo, RowSet, Table};
    use chrono::{TimeZone, Utc};

    fn context() -> EncodeContext {
        EncodeContext::new(
            DatabaseInfo::new("shop", "SQLite"),
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_full_dump_layout() {
        let table = Table::new(
            "users",
            vec![
                ColumnSchema::new("id", "INTEGER").primary_key(),
                ColumnSchema::new("name", "").not_null(),
            ],
        );
        let rows = RowSet::new(
            vec!["id".to_string(), "name".to_string()],
            vec![vec![Cell::Integer(1), Cell::from("O'Neil")]],
        );

        let result = SQLDumpExporter
            .export(&context(), &[TableSnapshot::new(table, rows)])
            .unwrap();
        let sql = String::from_utf8(result.content).unwrap();

        let expected = "\
-- table-export SQL dump
-- Database: shop
-- Generated: 2024-05-01T08:30:00Z

PRAGMA foreign_keys=OFF;
BEGIN TRANSACTION;

-- Table: users
DROP TABLE IF EXISTS \"users\";
CREATE TABLE \"users\" (
  \"id\" INTEGER PRIMARY KEY,
  \"name\" TEXT NOT NULL
);
INSERT INTO \"users\" (\"id\", \"name\") VALUES (1, 'O''Neil');

COMMIT;
";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_synthesized_schema() {
        let rows = RowSet::new(vec!["a".to_string(), "b".to_string()], vec![]);
        let snapshot = TableSnapshot::new(Table::unknown_schema("t"), rows);
        let sql = SQLDumpExporter::export_table(&snapshot);
        assert!(sql.contains("CREATE TABLE \"t\" (\n  \"a\" TEXT,\n  \"b\" TEXT\n);"));
        assert!(!sql.contains("INSERT"));
    }

    #[test]
    fn test_composite_primary_key() {
        let columns = vec![
            ColumnSchema::new("a", "INTEGER").primary_key(),
            ColumnSchema::new("b", "INTEGER").primary_key(),
        ];
        let sql = SQLDumpExporter::create_table("pairs", &columns);
        assert_eq!(
            sql,
            "CREATE TABLE \"pairs\" (\n  \"a\" INTEGER,\n  \"b\" INTEGER,\n  PRIMARY KEY (\"a\", \"b\")\n);"
        );
    }

    #[test]
    fn test_identifier_quotes_doubled() {
        let rows = RowSet::new(vec!["c\"1".to_string()], vec![vec![Cell::Null]]);
        let snapshot = TableSnapshot::new(Table::unknown_schema("we\"ird"), rows);
        let sql = SQLDumpExporter::export_table(&snapshot);
        assert!(sql.contains("DROP TABLE IF EXISTS \"we\"\"ird\";"));
        assert!(sql.contains("INSERT INTO \"we\"\"ird\" (\"c\"\"1\") VALUES (NULL);"));
    }

    #[test]
    fn test_table_without_columns() {
        let snapshot = TableSnapshot::new(Table::unknown_schema("empty"), RowSet::default());
        let sql = SQLDumpExporter::export_table(&snapshot);
        assert!(sql.contains("DROP TABLE IF EXISTS \"empty\";"));
        assert!(!sql.contains("CREATE TABLE"));
        assert!(sql.contains("-- Table has no columns"));
    }
}

//! CSV exporter
//!
//! One section per table, sections separated by a blank line. When more than
//! one table is exported each section starts with a `# Table: <name>` comment.

use super::value::{escape_csv, to_csv_field};
use super::{ExportError, ExportResult, TableSnapshot, single_line};
use crate::models::ExportFormat;

/// Exporter for CSV format.
pub struct CSVExporter;

impl CSVExporter {
    /// Render one table section: header row followed by one line per row
    pub fn export_section(snapshot: &TableSnapshot) -> String {
        let rows = &snapshot.rows;
        let mut lines = Vec::with_capacity(rows.row_count() + 1);

        lines.push(
            rows.columns
                .iter()
                .map(|name| escape_csv(name))
                .collect::<Vec<_>>()
                .join(","),
        );

        for index in 0..rows.row_count() {
            lines.push(
                rows.padded_row(index)
                    .map(to_csv_field)
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }

        lines.join("\n")
    }

    /// Export tables to a CSV document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use table_export_sdk::export::{CSVExporter, TableSnapshot};
    /// use table_export_sdk::models::{Cell, RowSet, Table};
    ///
    /// let rows = RowSet::new(vec!["id".into()], vec![vec![Cell::Integer(1)]]);
    /// let snapshot = TableSnapshot::new(Table::unknown_schema("users"), rows);
    ///
    /// let result = CSVExporter.export(&[snapshot]).unwrap();
    /// assert_eq!(result.content, b"id\n1");
    /// ```
    pub fn export(&self, tables: &[TableSnapshot]) -> Result<ExportResult, ExportError> {
        if tables.is_empty() {
            return Err(ExportError::NoTables);
        }

        let with_comments = tables.len() > 1;
        let sections: Vec<String> = tables
            .iter()
            .map(|snapshot| {
                let section = Self::export_section(snapshot);
                if with_comments {
                    format!("# Table: {}\n{}", single_line(&snapshot.table.name), section)
                } else {
                    section
                }
            })
            .collect();

        Ok(ExportResult {
            content: sections.join("\n\n").into_bytes(),
            format: ExportFormat::Csv,
        })
    }
}

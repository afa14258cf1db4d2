//! Output formatting for CLI

use crate::exporter::ExportArtifact;
use crate::models::{DatabaseInfo, Table};
use std::path::Path;

/// Format the table listing of a database
pub fn format_table_list(database: &DatabaseInfo, tables: &[Table]) -> String {
    let mut output = format!(
        "{} ({}): {} table(s)\n",
        database.name,
        database.type_label,
        tables.len()
    );

    for table in tables {
        if table.has_schema() {
            output.push_str(&format!("  - {} ({} columns)\n", table.name, table.columns.len()));
        } else {
            output.push_str(&format!("  - {} (schema unknown)\n", table.name));
        }
    }

    output
}

/// Format an export summary line
pub fn format_artifact(artifact: &ExportArtifact, output_dir: &Path) -> String {
    format!(
        "Exported {} table(s), {} row(s) as {} to {} ({} bytes)",
        artifact.table_count,
        artifact.row_count,
        artifact.format,
        output_dir.join(&artifact.file_name).display(),
        artifact.byte_len
    )
}

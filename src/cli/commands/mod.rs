//! CLI command handlers

pub mod export;
pub mod tables;

use crate::cli::error::CliError;
use crate::fetch::{TableSource, open_source};
use crate::models::{DatabaseInfo, DatabaseKind};
use std::path::Path;

/// Database metadata for a source path and optional type label.
///
/// Without a label, `.json` files are treated as document stores and anything
/// else as a DuckDB database.
pub fn database_info(source: &Path, type_label: Option<&str>, name: Option<&str>) -> DatabaseInfo {
    let label = match type_label {
        Some(label) => label.to_string(),
        None => match source.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => "JSON documents".to_string(),
            _ => "DuckDB".to_string(),
        },
    };
    let name = name.map(str::to_string).unwrap_or_else(|| {
        source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    });
    DatabaseInfo::new(name, label)
}

/// Open the table source matching `database`
pub fn open(database: &DatabaseInfo, source: &Path) -> Result<Box<dyn TableSource>, CliError> {
    let kind = DatabaseKind::from_type_label(&database.type_label);
    Ok(open_source(kind, source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_database_info_defaults() {
        let info = database_info(&PathBuf::from("/data/shop.json"), None, None);
        assert_eq!(info.name, "shop");
        assert_eq!(info.kind(), DatabaseKind::ObjectStore);

        let info = database_info(&PathBuf::from("/data/shop.duckdb"), None, Some("Shop"));
        assert_eq!(info.name, "Shop");
        assert_eq!(info.kind(), DatabaseKind::Sql);
    }
}

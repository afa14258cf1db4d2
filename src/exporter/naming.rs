//! Artifact file naming

use crate::models::ExportFormat;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Substitute for a name that sanitizes to nothing
pub const NAME_PLACEHOLDER: &str = "export";

/// Table component used when more than one table is exported
pub const ALL_TABLES_MARKER: &str = "all_tables";

static UNSAFE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

/// Replace every run of characters outside `[A-Za-z0-9_-]` with one underscore.
///
/// # Example
///
/// ```rust
/// use table_export_sdk::exporter::sanitize_name;
///
/// assert_eq!(sanitize_name("user data!"), "user_data_");
/// assert_eq!(sanitize_name(""), "export");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let sanitized = UNSAFE_RUN.replace_all(name, "_");
    if sanitized.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        sanitized.into_owned()
    }
}

/// `<db>_<table|all_tables>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn artifact_file_name(
    database_name: &str,
    table_names: &[&str],
    format: ExportFormat,
    exported_at: DateTime<Utc>,
) -> String {
    let table_part = match table_names {
        [single] => sanitize_name(single),
        _ => ALL_TABLES_MARKER.to_string(),
    };

    format!(
        "{}_{}_{}.{}",
        sanitize_name(database_name),
        table_part,
        exported_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Insert `_<sequence>` before the extension of `file_name`
pub fn numbered_file_name(file_name: &str, sequence: u32) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, extension)) => format!("{}_{}.{}", stem, sequence, extension),
        None => format!("{}_{}", file_name, sequence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_name("a  b"), "a_b");
        assert_eq!(sanitize_name("ok-name_1"), "ok-name_1");
        assert_eq!(sanitize_name("../etc/passwd"), "_etc_passwd");
        assert_eq!(sanitize_name("日本"), "_");
    }

    #[test]
    fn test_file_names() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            artifact_file_name("my.db", &["user data!"], ExportFormat::Csv, at),
            "my_db_user_data__20240102_030405.csv"
        );
        assert_eq!(
            artifact_file_name("shop", &["a", "b"], ExportFormat::Sql, at),
            "shop_all_tables_20240102_030405.sql"
        );
        assert_eq!(
            artifact_file_name("", &["t"], ExportFormat::Json, at),
            "export_t_20240102_030405.json"
        );
    }

    #[test]
    fn test_numbered_file_name() {
        assert_eq!(
            numbered_file_name("db_t_20240102_030405.csv", 2),
            "db_t_20240102_030405_2.csv"
        );
        assert_eq!(numbered_file_name("plain", 1), "plain_1");
    }
}

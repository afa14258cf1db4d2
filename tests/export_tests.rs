//! Encoder tests

use chrono::{TimeZone, Utc};
use table_export_sdk::export::{
    CSVExporter, EncodeContext, ExportError, JSONExporter, SQLDumpExporter, TableSnapshot,
    encode_tables,
};
use table_export_sdk::models::{Cell, ColumnSchema, DatabaseInfo, ExportFormat, RowSet, Table};

fn context() -> EncodeContext {
    EncodeContext::new(
        DatabaseInfo::new("inventory", "SQLite"),
        Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 58).unwrap(),
    )
}

fn table_a() -> TableSnapshot {
    TableSnapshot::new(
        Table::new(
            "A",
            vec![
                ColumnSchema::new("id", "INTEGER").primary_key(),
                ColumnSchema::new("label", "TEXT"),
            ],
        ),
        RowSet::new(
            vec!["id".to_string(), "label".to_string()],
            vec![
                vec![Cell::Integer(1), Cell::from("first")],
                vec![Cell::Integer(2), Cell::Null],
            ],
        ),
    )
}

fn table_b() -> TableSnapshot {
    TableSnapshot::new(
        Table::unknown_schema("B"),
        RowSet::empty(vec!["x".to_string()]),
    )
}

mod empty_input_tests {
    use super::*;

    #[test]
    fn test_every_format_rejects_empty_input() {
        for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Sql] {
            assert!(matches!(
                encode_tables(format, &context(), &[]),
                Err(ExportError::NoTables)
            ));
        }
    }
}

mod csv_tests {
    use super::*;

    #[test]
    fn test_single_table_never_commented() {
        let result = CSVExporter.export(&[table_a()]).unwrap();
        let text = String::from_utf8(result.content).unwrap();
        assert!(!text.contains("# Table:"));
        assert_eq!(text, "id,label\n1,first\n2,NULL");
    }

    #[test]
    fn test_each_table_commented_once() {
        let result = CSVExporter.export(&[table_a(), table_b()]).unwrap();
        let text = String::from_utf8(result.content).unwrap();
        assert_eq!(text.matches("# Table: A\n").count(), 1);
        assert_eq!(text.matches("# Table: B\n").count(), 1);
        assert!(text.contains("2,NULL\n\n# Table: B"));
    }

    #[test]
    fn test_format_tag() {
        let result = encode_tables(ExportFormat::Csv, &context(), &[table_b()]).unwrap();
        assert_eq!(result.format, ExportFormat::Csv);
    }
}

mod json_tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_document_is_valid_json_with_blobs() {
        let rows = RowSet::new(
            vec!["meta".to_string(), "raw".to_string()],
            vec![vec![
                Cell::Binary(br#"{"k": [1, 2]}"#.to_vec()),
                Cell::Binary(vec![0xff, 0xfe]),
            ]],
        );
        let snapshot = TableSnapshot::new(Table::unknown_schema("blobs"), rows);

        let result = JSONExporter.export(&context(), &[snapshot]).unwrap();
        let value: Value = serde_json::from_slice(&result.content).unwrap();

        let row = &value["tables"][0]["rows"][0];
        assert_eq!(row["meta"], json!({"k": [1, 2]}));
        assert_eq!(row["raw"], json!({"type": "blob", "size": 2, "base64": "//4="}));
    }

    #[test]
    fn test_exact_key_sets() {
        let result = JSONExporter.export(&context(), &[table_a(), table_b()]).unwrap();
        let value: Value = serde_json::from_slice(&result.content).unwrap();

        let root_keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(root_keys, ["database", "databaseType", "exportedAt", "tables"]);
        assert_eq!(value["exportedAt"], "2024-02-29T23:59:58Z");

        for table in value["tables"].as_array().unwrap() {
            let keys: Vec<&String> = table.as_object().unwrap().keys().collect();
            assert_eq!(keys, ["columns", "name", "rowCount", "rows"]);
        }
        assert_eq!(value["tables"][0]["rowCount"], 2);
        assert_eq!(value["tables"][1]["rows"], json!([]));
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = JSONExporter.export(&context(), &[table_a()]).unwrap();
        let second = JSONExporter.export(&context(), &[table_a()]).unwrap();
        assert_eq!(first.content, second.content);
    }
}

mod sql_tests {
    use super::*;

    #[test]
    fn test_two_tables_statement_counts() {
        let result = SQLDumpExporter.export(&context(), &[table_a(), table_b()]).unwrap();
        let sql = String::from_utf8(result.content).unwrap();

        assert_eq!(sql.matches("DROP TABLE IF EXISTS").count(), 2);
        assert_eq!(sql.matches("CREATE TABLE").count(), 2);
        assert_eq!(sql.matches("INSERT INTO").count(), 2);
        assert_eq!(sql.matches("BEGIN TRANSACTION;").count(), 1);
        assert_eq!(sql.matches("COMMIT;").count(), 1);
        assert!(sql.trim_end().ends_with("COMMIT;"));
    }

    #[test]
    fn test_statement_order() {
        let result = SQLDumpExporter.export(&context(), &[table_a(), table_b()]).unwrap();
        let sql = String::from_utf8(result.content).unwrap();

        let positions: Vec<usize> = [
            "-- Database: inventory",
            "PRAGMA foreign_keys=OFF;",
            "BEGIN TRANSACTION;",
            "DROP TABLE IF EXISTS \"A\";",
            "CREATE TABLE \"A\"",
            "INSERT INTO \"A\" (\"id\", \"label\") VALUES (1, 'first');",
            "INSERT INTO \"A\" (\"id\", \"label\") VALUES (2, NULL);",
            "DROP TABLE IF EXISTS \"B\";",
            "CREATE TABLE \"B\" (\n  \"x\" TEXT\n);",
            "COMMIT;",
        ]
        .iter()
        .map(|needle| sql.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_custom_tool_name_in_header() {
        let context = context().with_tool_name("dumper");
        let result = SQLDumpExporter.export(&context, &[table_b()]).unwrap();
        let sql = String::from_utf8(result.content).unwrap();
        assert!(sql.starts_with("-- dumper SQL dump\n-- Database: inventory\n-- Generated: 2024-02-29T23:59:58Z\n"));
    }
}

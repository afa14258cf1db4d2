//! Export a JSON document store in every format
//!
//! Usage:
//!   cargo run --example export_documents -- --source store.json --output exports
//!
//! Without `--source` a small built-in store is exported.

use std::path::PathBuf;
use table_export_sdk::fetch::{JsonDocumentStore, ObjectTableSource};
use table_export_sdk::models::{DatabaseInfo, ExportFormat, ExportRequest, TableSelection};
use table_export_sdk::{Exporter, FileSystemStorageBackend};

const SAMPLE_STORE: &str = r#"{
  "contacts": [
    { "name": "Ann", "email": "ann@example.com", "tags": ["work"] },
    { "name": "Bob, Jr.", "note": "says \"hi\"", "avatar": { "$binary": "iVBORw0KGgo=" } }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let mut source: Option<PathBuf> = None;
    let mut output = PathBuf::from(".");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--source" | "-s" if i + 1 < args.len() => {
                source = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--output" | "-o" if i + 1 < args.len() => {
                output = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Error: unexpected argument '{}'", other);
                print_usage();
                std::process::exit(1);
            }
        }
    }

    let (store, name) = match &source {
        Some(path) => (
            JsonDocumentStore::open(path)?,
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("documents")
                .to_string(),
        ),
        None => (JsonDocumentStore::from_slice(SAMPLE_STORE.as_bytes())?, "sample".to_string()),
    };

    let exporter = Exporter::new(
        ObjectTableSource::new(store),
        FileSystemStorageBackend::new(&output),
    );
    let tables = exporter.resolve_tables(&TableSelection::All)?;
    let database = DatabaseInfo::new(name, "JSON documents");

    for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Sql] {
        let request = ExportRequest::new(database.clone(), format, tables.clone());
        let artifact = exporter.export(&request)?;
        println!(
            "{}: {} rows -> {}",
            format,
            artifact.row_count,
            output.join(&artifact.file_name).display()
        );
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: export_documents [--source <store.json>] [--output <dir>]");
}

//! `export` command

use super::{database_info, open};
use crate::cli::error::CliError;
use crate::cli::output::format_artifact;
use crate::config::ExportConfig;
use crate::exporter::Exporter;
use crate::models::{ExportFormat, ExportRequest, TableSelection};
use crate::storage::FileSystemStorageBackend;
use std::path::PathBuf;

/// Arguments for the `export` command
pub struct ExportArgs {
    /// Database file to read
    pub source: PathBuf,
    /// Declared database type label
    pub type_label: Option<String>,
    /// Output format (falls back to the configured default)
    pub format: Option<ExportFormat>,
    /// Tables to export; empty means all
    pub tables: Vec<String>,
    /// Output directory (falls back to the configured one)
    pub output: Option<PathBuf>,
    /// Database name used in the document and file name
    pub name: Option<String>,
}

/// Handle the `export` command
pub fn handle_export(args: &ExportArgs, config: &ExportConfig) -> Result<(), CliError> {
    let database = database_info(&args.source, args.type_label.as_deref(), args.name.as_deref());
    let source = open(&database, &args.source)?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let exporter = Exporter::new(source, FileSystemStorageBackend::new(&output_dir))
        .with_config(config.clone());

    let selection = if args.tables.is_empty() {
        TableSelection::All
    } else {
        TableSelection::Named(args.tables.clone())
    };
    let tables = exporter.resolve_tables(&selection)?;

    let format = args.format.unwrap_or(config.default_format);
    let request = ExportRequest::new(database, format, tables);
    let artifact = exporter.export(&request)?;

    println!("{}", format_artifact(&artifact, &output_dir));
    Ok(())
}

//! table-export command line interface

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use table_export_sdk::cli::CliError;
use table_export_sdk::cli::commands::export::{ExportArgs, handle_export};
use table_export_sdk::cli::commands::tables::{TablesArgs, handle_tables};
use table_export_sdk::config::ExportConfig;
use table_export_sdk::models::ExportFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "table-export", version, about = "Export database tables to CSV, JSON or SQL")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the tables of a database
    Tables {
        /// Database file (DuckDB, or a JSON document store)
        #[arg(long)]
        source: PathBuf,
        /// Declared database type (e.g. "DuckDB", "Realm", "JSON documents")
        #[arg(long = "type")]
        type_label: Option<String>,
    },
    /// Export tables to a file
    Export {
        /// Database file (DuckDB, or a JSON document store)
        #[arg(long)]
        source: PathBuf,
        /// Declared database type (e.g. "DuckDB", "Realm", "JSON documents")
        #[arg(long = "type")]
        type_label: Option<String>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Table to export (repeatable; defaults to all tables)
        #[arg(long = "table")]
        tables: Vec<String>,
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
        /// Database name used in the document and file name
        #[arg(long)]
        name: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ExportConfig::load(path)?,
        None => ExportConfig::default(),
    };

    match cli.command {
        Command::Tables { source, type_label } => {
            handle_tables(&TablesArgs { source, type_label })
        }
        Command::Export {
            source,
            type_label,
            format,
            tables,
            output,
            name,
        } => handle_export(
            &ExportArgs {
                source,
                type_label,
                format,
                tables,
                output,
                name,
            },
            &config,
        ),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(cli).map_err(|err| anyhow!(err.user_message()))
}

//! `tables` command: list what a source can export

use super::{database_info, open};
use crate::cli::error::CliError;
use crate::cli::output::format_table_list;
use std::path::PathBuf;

/// Arguments for the `tables` command
pub struct TablesArgs {
    /// Database file to read
    pub source: PathBuf,
    /// Declared database type label
    pub type_label: Option<String>,
}

/// Handle the `tables` command
pub fn handle_tables(args: &TablesArgs) -> Result<(), CliError> {
    let database = database_info(&args.source, args.type_label.as_deref(), None);
    let source = open(&database, &args.source)?;
    let tables = source.list_tables()?;

    print!("{}", format_table_list(&database, &tables));
    Ok(())
}

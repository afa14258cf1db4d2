//! CLI module for the table-export binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;

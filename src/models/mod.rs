//! Models module for the SDK
//!
//! Defines the table, row and value structures consumed by the fetchers and
//! encoders.

pub mod cell;
pub mod request;
pub mod row_set;
pub mod table;

pub use cell::{Cell, CellKind, classify};
pub use request::{DatabaseInfo, DatabaseKind, ExportFormat, ExportRequest, TableSelection};
pub use row_set::{Row, RowSet};
pub use table::{ColumnSchema, DEFAULT_COLUMN_TYPE, Table};

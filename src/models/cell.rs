//! Cell model for the SDK
//!
//! A cell is one scalar value inside a row. The set of kinds is closed: every
//! backend adapter maps its native values onto these variants, and anything it
//! cannot classify becomes `Text` through [`Cell::from_display`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tagged value within a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Binary(Vec<u8>),
}

/// Kind of a cell, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Null,
    Text,
    Integer,
    Real,
    Boolean,
    Binary,
}

impl Cell {
    /// Stringify a value no adapter could classify and keep it as text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use table_export_sdk::models::Cell;
    ///
    /// let cell = Cell::from_display(std::net::Ipv4Addr::LOCALHOST);
    /// assert_eq!(cell, Cell::Text("127.0.0.1".to_string()));
    /// ```
    pub fn from_display(value: impl fmt::Display) -> Self {
        Cell::Text(value.to_string())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Null => CellKind::Null,
            Cell::Text(_) => CellKind::Text,
            Cell::Integer(_) => CellKind::Integer,
            Cell::Real(_) => CellKind::Real,
            Cell::Boolean(_) => CellKind::Boolean,
            Cell::Binary(_) => CellKind::Binary,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

/// Classify a cell by kind
pub fn classify(cell: &Cell) -> CellKind {
    cell.kind()
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Real(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

impl From<Vec<u8>> for Cell {
    fn from(value: Vec<u8>) -> Self {
        Cell::Binary(value)
    }
}

impl From<&[u8]> for Cell {
    fn from(value: &[u8]) -> Self {
        Cell::Binary(value.to_vec())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

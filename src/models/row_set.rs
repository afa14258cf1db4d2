//! Fetched row data for one table

use super::cell::Cell;
use serde::{Deserialize, Serialize};

/// One row, positionally aligned to [`RowSet::columns`]
pub type Row = Vec<Cell>;

static NULL_CELL: Cell = Cell::Null;

/// Column names and rows realized for one table at export time
///
/// `columns` is authoritative over the table schema for the shape of the data.
/// Rows may be shorter than `columns`; missing positions read as NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Build a row set, dropping any cells beyond the column count
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, column)`, NULL for ragged rows
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Cells of `row` padded with NULL to the column count
    pub fn padded_row(&self, row: usize) -> impl Iterator<Item = &Cell> + '_ {
        (0..self.columns.len()).map(move |column| self.cell(row, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_read_as_null() {
        let rows = RowSet::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Cell::Integer(1)]],
        );
        assert_eq!(rows.cell(0, 0), &Cell::Integer(1));
        assert_eq!(rows.cell(0, 1), &Cell::Null);
        assert_eq!(rows.padded_row(0).count(), 2);
    }

    #[test]
    fn test_extra_cells_truncated() {
        let rows = RowSet::new(
            vec!["a".to_string()],
            vec![vec![Cell::Integer(1), Cell::Integer(2)]],
        );
        assert_eq!(rows.rows[0].len(), 1);
    }
}

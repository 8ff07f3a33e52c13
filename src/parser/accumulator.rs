//! Pending table rows awaiting materialization.

use crate::error::TableError;
use crate::model::Table;

/// Rows gathered since the last flush.
#[derive(Debug, Clone, Default)]
pub struct TableAccumulator {
    rows: Vec<Vec<String>>,
    in_table: bool,
    max_columns: Option<usize>,
}

impl TableAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator that rejects tables wider than `limit`.
    pub fn with_max_columns(limit: Option<usize>) -> Self {
        Self {
            max_columns: limit,
            ..Self::default()
        }
    }

    /// Append a row. Rows without cells are ignored.
    pub fn push_row(&mut self, cells: Vec<String>) {
        if cells.is_empty() {
            return;
        }
        self.rows.push(cells);
        self.in_table = true;
    }

    /// Whether a table run is in progress.
    pub fn in_table(&self) -> bool {
        self.in_table
    }

    /// Number of pending rows.
    pub fn pending_rows(&self) -> usize {
        self.rows.len()
    }

    /// Turn pending rows into a table and reset.
    ///
    /// Returns `Ok(None)` when nothing is pending. The accumulator is
    /// cleared whether or not materialization succeeds.
    pub fn flush(&mut self) -> Result<Option<Table>, TableError> {
        self.in_table = false;
        if self.rows.is_empty() {
            return Ok(None);
        }

        let rows = std::mem::take(&mut self.rows);
        let table = match self.max_columns {
            Some(limit) => Table::from_rows_limited(rows, limit)?,
            None => Table::from_rows(rows)?,
        };
        Ok(Some(table))
    }
}

//! Table types.

use crate::error::TableError;
use serde::{Deserialize, Serialize};

/// A table rebuilt from pipe-delimited rows.
///
/// Rows keep their own length. A row shorter than [`Table::column_count`]
/// simply has no cells past its end; nothing is padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, each an ordered list of cell texts
    pub rows: Vec<Vec<String>>,

    /// Widest row in the table
    pub column_count: usize,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,
}

impl Table {
    /// Materialize a table from accumulated rows.
    ///
    /// The column count is the maximum cell count across `rows`. Ragged
    /// rows are accepted as-is.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::Empty);
        }

        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        if column_count == 0 {
            return Err(TableError::NoColumns);
        }

        Ok(Self {
            rows,
            column_count,
            header_rows: 1,
        })
    }

    /// Like [`Table::from_rows`], rejecting rows wider than `limit`.
    pub fn from_rows_limited(rows: Vec<Vec<String>>, limit: usize) -> Result<Self, TableError> {
        let table = Self::from_rows(rows)?;
        if table.column_count > limit {
            return Err(TableError::TooManyColumns {
                found: table.column_count,
                limit,
            });
        }
        Ok(table)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Get a cell, or `None` when the row is shorter than `col`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Get header rows.
    pub fn header(&self) -> &[Vec<String>] {
        let end = (self.header_rows as usize).min(self.rows.len());
        &self.rows[..end]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[Vec<String>] {
        let start = (self.header_rows as usize).min(self.rows.len());
        &self.rows[start..]
    }

    /// Whether any row is shorter than the table width.
    pub fn is_ragged(&self) -> bool {
        self.rows.iter().any(|r| r.len() < self.column_count)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Table types.

use serde::{Deserialize, Serialize};

/// A table detected by positional analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Page number (1-indexed)
    pub page: u32,

    /// Cell text by row, top to bottom, left to right
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table.
    pub fn new(page: u32, rows: Vec<Vec<String>>) -> Self {
        Self { page, rows }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation, cells tab-separated.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

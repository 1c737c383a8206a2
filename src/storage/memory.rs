//! In-memory tabular store.

use super::{MAX_HEADER_COLS, RowHandle, TabularStore, column_index};
use crate::error::{FormtrackError, Result};

/// Vec-of-rows store. The header row is seeded at construction and always
/// present, mirroring a sheet whose first row holds column titles.
#[derive(Debug, Clone)]
pub struct MemStore {
    rows: Vec<Vec<String>>,
}

impl MemStore {
    /// Create a store with the given header row.
    #[must_use]
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            rows: vec![headers.iter().map(|h| h.as_ref().to_string()).collect()],
        }
    }

    /// Number of rows including the header.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, row: RowHandle) -> Result<&Vec<String>> {
        self.rows
            .get(row.row() - 1)
            .ok_or_else(|| FormtrackError::Other(anyhow::anyhow!("row {} out of range", row.row())))
    }
}

impl TabularStore for MemStore {
    fn read_headers(&self) -> Result<Vec<String>> {
        Ok(self.rows[0]
            .iter()
            .take(MAX_HEADER_COLS)
            .filter(|h| !h.is_empty())
            .cloned()
            .collect())
    }

    fn append_row(&mut self, cells: &[String]) -> Result<()> {
        self.rows.push(cells.to_vec());
        Ok(())
    }

    fn find_row(&self, column_key: &str, value: &str) -> Result<Option<RowHandle>> {
        let idx = column_index(&self.read_headers()?, column_key)?;
        for (i, row) in self.rows.iter().enumerate() {
            if row.get(idx).map(String::as_str) == Some(value) {
                return Ok(Some(RowHandle::new(i + 1)));
            }
        }
        Ok(None)
    }

    fn last_row(&self) -> Result<RowHandle> {
        Ok(RowHandle::new(self.rows.len()))
    }

    fn read_cells(&self, row: RowHandle) -> Result<Vec<String>> {
        self.get(row).cloned()
    }

    fn write_cells(&mut self, row: RowHandle, cells: &[String]) -> Result<()> {
        self.get(row)?;
        self.rows[row.row() - 1] = cells.to_vec();
        Ok(())
    }
}

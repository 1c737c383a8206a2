//! `SQLite` tabular store.
//!
//! Each sheet is persisted as `(sheet, pos, cells)` rows where `cells` is
//! a JSON array of strings and `pos` is the 1-based physical row number,
//! the header sitting at `pos = 1`. One `SqliteStore` instance addresses
//! one named sheet, the way the original system bound one `Sheet` object
//! per tab.

use super::{MAX_HEADER_COLS, RowHandle, TabularStore, column_index};
use crate::error::{FormtrackError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// SQLite-backed tabular store addressing a single named sheet.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    sheet: String,
}

fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sheets (
             name TEXT PRIMARY KEY
         );
         CREATE TABLE IF NOT EXISTS rows (
             sheet TEXT NOT NULL,
             pos   INTEGER NOT NULL,
             cells TEXT NOT NULL,
             PRIMARY KEY (sheet, pos)
         );",
    )?;
    Ok(())
}

fn encode_cells(cells: &[String]) -> Result<String> {
    Ok(serde_json::to_string(cells)?)
}

fn decode_cells(raw: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

fn pos_of(row: RowHandle) -> i64 {
    i64::try_from(row.row()).unwrap_or(i64::MAX)
}

impl SqliteStore {
    /// Open an existing sheet in the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SheetNotFound` if the sheet has not been created, or a
    /// database error if the file cannot be opened.
    pub fn open(path: &Path, sheet: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        apply_schema(&conn)?;
        let store = Self {
            conn,
            sheet: sheet.to_string(),
        };
        if !store.sheet_exists()? {
            return Err(FormtrackError::SheetNotFound {
                name: sheet.to_string(),
            });
        }
        Ok(store)
    }

    /// Create a new sheet with the given header row in the database at
    /// `path`, creating the database as needed.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the sheet already exists.
    pub fn create<S: AsRef<str>>(path: &Path, sheet: &str, headers: &[S]) -> Result<Self> {
        let conn = Connection::open(path)?;
        apply_schema(&conn)?;
        let store = Self {
            conn,
            sheet: sheet.to_string(),
        };
        store.seed(headers)?;
        Ok(store)
    }

    /// Create a sheet in a fresh in-memory database (tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory<S: AsRef<str>>(sheet: &str, headers: &[S]) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        let store = Self {
            conn,
            sheet: sheet.to_string(),
        };
        store.seed(headers)?;
        Ok(store)
    }

    /// The sheet this store addresses.
    #[must_use]
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    fn sheet_exists(&self) -> Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sheets WHERE name = ?1",
                params![self.sheet],
                |r| r.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn seed<S: AsRef<str>>(&self, headers: &[S]) -> Result<()> {
        if self.sheet_exists()? {
            return Err(FormtrackError::Config(format!(
                "sheet '{}' already exists",
                self.sheet
            )));
        }
        let header_row: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        self.conn
            .execute("INSERT INTO sheets (name) VALUES (?1)", params![self.sheet])?;
        self.conn.execute(
            "INSERT INTO rows (sheet, pos, cells) VALUES (?1, 1, ?2)",
            params![self.sheet, encode_cells(&header_row)?],
        )?;
        Ok(())
    }

    fn max_pos(&self) -> Result<i64> {
        let max: Option<i64> = self.conn.query_row(
            "SELECT MAX(pos) FROM rows WHERE sheet = ?1",
            params![self.sheet],
            |r| r.get(0),
        )?;
        max.ok_or_else(|| FormtrackError::SheetNotFound {
            name: self.sheet.clone(),
        })
    }
}

impl TabularStore for SqliteStore {
    fn read_headers(&self) -> Result<Vec<String>> {
        let cells = self.read_cells(RowHandle::new(1))?;
        Ok(cells
            .into_iter()
            .take(MAX_HEADER_COLS)
            .filter(|h| !h.is_empty())
            .collect())
    }

    fn append_row(&mut self, cells: &[String]) -> Result<()> {
        let next = self.max_pos()? + 1;
        self.conn.execute(
            "INSERT INTO rows (sheet, pos, cells) VALUES (?1, ?2, ?3)",
            params![self.sheet, next, encode_cells(cells)?],
        )?;
        Ok(())
    }

    fn find_row(&self, column_key: &str, value: &str) -> Result<Option<RowHandle>> {
        let idx = column_index(&self.read_headers()?, column_key)?;
        let mut stmt = self.conn.prepare(
            "SELECT pos, cells FROM rows WHERE sheet = ?1 ORDER BY pos",
        )?;
        let rows = stmt.query_map(params![self.sheet], |r| {
            Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (pos, raw) = row?;
            let cells = decode_cells(&raw)?;
            if cells.get(idx).map(String::as_str) == Some(value) {
                return Ok(Some(RowHandle::new(usize::try_from(pos).unwrap_or(0))));
            }
        }
        Ok(None)
    }

    fn last_row(&self) -> Result<RowHandle> {
        let max = self.max_pos()?;
        Ok(RowHandle::new(usize::try_from(max).unwrap_or(0)))
    }

    fn read_cells(&self, row: RowHandle) -> Result<Vec<String>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT cells FROM rows WHERE sheet = ?1 AND pos = ?2",
                params![self.sheet, pos_of(row)],
                |r| r.get(0),
            )
            .optional()?;
        raw.map_or_else(
            || {
                Err(FormtrackError::Other(anyhow::anyhow!(
                    "row {} out of range in sheet '{}'",
                    row.row(),
                    self.sheet
                )))
            },
            |raw| decode_cells(&raw),
        )
    }

    fn write_cells(&mut self, row: RowHandle, cells: &[String]) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE rows SET cells = ?1 WHERE sheet = ?2 AND pos = ?3",
            params![encode_cells(cells)?, self.sheet, pos_of(row)],
        )?;
        if changed == 0 {
            return Err(FormtrackError::Other(anyhow::anyhow!(
                "row {} out of range in sheet '{}'",
                row.row(),
                self.sheet
            )));
        }
        Ok(())
    }
}

//! Issue row persistence.
//!
//! `IssueTable` owns the sheet layout of the issues sheet, the mapping
//! between rows and `Issue` values, and row-level persistence. It is meant
//! to be driven through the issue aggregate (`repo::IssueRepository`), not
//! used directly by callers.

mod codec;

pub use codec::{decode_row, encode_row};

use crate::error::{FormtrackError, Result};
use crate::model::{Issue, IssueId};
use crate::storage::{RowHandle, TabularStore, column_index};

/// Header of the column holding the canonical id string.
pub const HEADER_ISSUE_ID: &str = "Issue ID";
/// Header of the column holding the workflow status.
pub const HEADER_STATUS: &str = "Status";

/// Column titles of the issues sheet, in persisted order. This ordering is
/// the wire format of the system; existing stores break if it changes.
pub const ISSUE_HEADERS: [&str; 6] = [
    HEADER_ISSUE_ID,
    "Submitter",
    "Created",
    "Assignee",
    HEADER_STATUS,
    "Document URL",
];

/// The issues sheet: a `TabularStore` plus the header-to-field mapping,
/// validated once at construction.
#[derive(Debug)]
pub struct IssueTable<S: TabularStore> {
    store: S,
    status_col: usize,
}

impl<S: TabularStore> IssueTable<S> {
    /// Bind a table to its backing store, validating the header contract.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if the sheet lacks the `Issue ID` or
    /// `Status` header.
    pub fn new(store: S) -> Result<Self> {
        let headers = store.read_headers()?;
        column_index(&headers, HEADER_ISSUE_ID)?;
        let status_col = column_index(&headers, HEADER_STATUS)? + 1;
        Ok(Self { store, status_col })
    }

    /// Encode and append a new issue row.
    ///
    /// No uniqueness check happens here: the allocator is the sole writer
    /// of new ids under the single-writer assumption.
    ///
    /// # Errors
    ///
    /// Propagates store append failures.
    pub fn insert(&mut self, issue: &Issue) -> Result<()> {
        self.store.append_row(&encode_row(issue))
    }

    /// Fetch the issue whose id column equals `id`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no row matches.
    pub fn find_by_id(&self, id: &IssueId) -> Result<Issue> {
        let row = self.locate(id)?;
        decode_row(&self.store.read_cells(row)?)
    }

    /// The issue in the last physical row, or `None` if only the header
    /// exists. Under the append-only insertion discipline this is also the
    /// highest-numbered id, which the allocator relies on.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRow` if the last row fails to decode.
    pub fn find_latest(&self) -> Result<Option<Issue>> {
        let last = self.store.last_row()?;
        if last.is_header() {
            return Ok(None);
        }
        decode_row(&self.store.read_cells(last)?).map(Some)
    }

    /// Overwrite the row of an existing issue in place.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue has no row.
    pub fn update(&mut self, issue: &Issue) -> Result<()> {
        let row = self.locate(&issue.id)?;
        self.store.write_cells(row, &encode_row(issue))
    }

    /// 1-based position of the status column, for hosts validating that
    /// an incoming cell edit targets the status column.
    #[must_use]
    pub const fn status_column_index(&self) -> usize {
        self.status_col
    }

    /// The backing store (host-side access, e.g. simulating a cell edit).
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn locate(&self, id: &IssueId) -> Result<RowHandle> {
        self.store
            .find_row(HEADER_ISSUE_ID, &id.to_string())?
            .ok_or_else(|| FormtrackError::issue_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::STATUS_OPEN;
    use crate::storage::MemStore;
    use chrono::NaiveDate;

    fn t() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn table() -> IssueTable<MemStore> {
        IssueTable::new(MemStore::new(&ISSUE_HEADERS)).unwrap()
    }

    fn issue(id: &str) -> Issue {
        Issue::new(id.parse().unwrap(), "a@x.com", t())
    }

    #[test]
    fn construction_requires_contract_headers() {
        let err = IssueTable::new(MemStore::new(&["Submitter", "Created"])).unwrap_err();
        assert!(matches!(err, FormtrackError::ColumnNotFound { .. }));

        let err = IssueTable::new(MemStore::new(&[HEADER_ISSUE_ID, "Created"])).unwrap_err();
        assert!(
            matches!(err, FormtrackError::ColumnNotFound { header } if header == HEADER_STATUS)
        );
    }

    #[test]
    fn find_by_id_on_empty_table() {
        let t = table();
        let err = t.find_by_id(&"K-1".parse().unwrap()).unwrap_err();
        assert!(matches!(err, FormtrackError::IssueNotFound { .. }));
    }

    #[test]
    fn find_latest_tracks_inserts() {
        let mut t = table();
        assert!(t.find_latest().unwrap().is_none());

        t.insert(&issue("K-1")).unwrap();
        assert_eq!(t.find_latest().unwrap().unwrap().id.to_string(), "K-1");

        t.insert(&issue("K-2")).unwrap();
        assert_eq!(t.find_latest().unwrap().unwrap().id.to_string(), "K-2");
    }

    #[test]
    fn insert_then_find_by_id() {
        let mut t = table();
        t.insert(&issue("K-1")).unwrap();
        t.insert(&issue("K-2")).unwrap();

        let found = t.find_by_id(&"K-1".parse().unwrap()).unwrap();
        assert_eq!(found.id.to_string(), "K-1");
        assert_eq!(found.status, STATUS_OPEN);

        let err = t.find_by_id(&"K-3".parse().unwrap()).unwrap_err();
        assert!(matches!(err, FormtrackError::IssueNotFound { .. }));
    }

    #[test]
    fn update_overwrites_in_place() {
        let mut t = table();
        t.insert(&issue("K-1")).unwrap();
        t.insert(&issue("K-2")).unwrap();

        let mut changed = issue("K-1");
        changed.assignee = Some("bob@x.com".to_string());
        changed.status = "IN PROGRESS".to_string();
        t.update(&changed).unwrap();

        assert_eq!(t.store().row_count(), 3);
        let reread = t.find_by_id(&"K-1".parse().unwrap()).unwrap();
        assert_eq!(reread, changed);
        // Neighbour untouched
        assert_eq!(t.find_by_id(&"K-2".parse().unwrap()).unwrap(), issue("K-2"));
    }

    #[test]
    fn update_missing_issue_fails() {
        let mut t = table();
        let err = t.update(&issue("K-9")).unwrap_err();
        assert!(matches!(err, FormtrackError::IssueNotFound { .. }));
    }

    #[test]
    fn status_column_is_fifth() {
        let t = table();
        assert_eq!(t.status_column_index(), 5);
    }
}

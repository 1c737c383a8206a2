//! The issue aggregate repository.
//!
//! `IssueRepository` owns retrieval, creation and mutation of the Issue
//! aggregate and the consistency between its parts: the persisted row,
//! the in-memory `Issue`, and the companion document linked to it. Row
//! persistence itself is `IssueTable`'s job.
//!
//! Two consistency gaps of the original design are preserved on purpose
//! rather than papered over:
//!
//! - if document creation succeeds and the row insert then fails, the
//!   document is orphaned; there is no compensating cleanup.
//! - [`IssueRepository::change_status`] renames the companion document
//!   only. The row's own status cell is written by the host (it is the
//!   edit that triggered the operation), never by the core, so the row
//!   can sit stale relative to the document title.

use crate::doc::{DocumentStore, Folder, substitute_status_marker};
use crate::error::{FormtrackError, Result};
use crate::model::{Issue, IssueId};
use crate::storage::TabularStore;
use crate::table::IssueTable;
use crate::util::id::allocate_next;
use chrono::NaiveDateTime;
use tracing::{debug, info};

/// Orchestrates allocator, issue table and document lifecycle.
#[derive(Debug)]
pub struct IssueRepository<S, D, F>
where
    S: TabularStore,
    D: DocumentStore,
    F: Folder,
{
    table: IssueTable<S>,
    docs: D,
    folder: F,
    issue_key: String,
    default_editor: String,
    default_viewer: String,
}

impl<S, D, F> IssueRepository<S, D, F>
where
    S: TabularStore,
    D: DocumentStore,
    F: Folder,
{
    /// Assemble a repository over its collaborators.
    pub fn new(
        table: IssueTable<S>,
        docs: D,
        folder: F,
        issue_key: impl Into<String>,
        default_editor: impl Into<String>,
        default_viewer: impl Into<String>,
    ) -> Self {
        Self {
            table,
            docs,
            folder,
            issue_key: issue_key.into(),
            default_editor: default_editor.into(),
            default_viewer: default_viewer.into(),
        }
    }

    /// The issue table (host-side access, e.g. the status-edit guard).
    #[must_use]
    pub fn table(&self) -> &IssueTable<S> {
        &self.table
    }

    /// Mutable access to the issue table.
    pub fn table_mut(&mut self) -> &mut IssueTable<S> {
        &mut self.table
    }

    /// The document collaborator (test inspection).
    #[must_use]
    pub fn docs(&self) -> &D {
        &self.docs
    }

    /// The folder collaborator (test inspection).
    #[must_use]
    pub fn folder(&self) -> &F {
        &self.folder
    }

    /// Create a new issue from an intake submission.
    ///
    /// Allocates the next sequential id from the table's latest row,
    /// creates a companion document titled by `title_builder`, files it
    /// into the issue-doc folder, grants the configured default editor,
    /// the submitter (edit) and the configured default viewer (view),
    /// records the document URL on the issue and appends the row.
    ///
    /// # Errors
    ///
    /// Propagates table and document failures. If the row insert fails
    /// after the document was created, the document is left orphaned.
    pub fn create_from_submission(
        &mut self,
        submitter_email: &str,
        create_time: NaiveDateTime,
        title_builder: impl FnOnce(&Issue) -> String,
    ) -> Result<Issue> {
        let max_id = self.table.find_latest()?.map(|issue| issue.id);
        let new_id = allocate_next(max_id.as_ref(), &self.issue_key);
        info!(id = %new_id, submitter = submitter_email, "creating issue");

        let mut issue = Issue::new(new_id, submitter_email, create_time);

        let mut doc = self.docs.create(&title_builder(&issue))?;
        self.folder.add_file(&mut doc)?;
        self.docs.add_editor(&doc, &self.default_editor)?;
        self.docs.add_editor(&doc, &issue.submitter)?;
        self.docs.add_viewer(&doc, &self.default_viewer)?;
        issue.doc_url = Some(doc.url().to_string());

        self.table.insert(&issue)?;
        info!(id = %issue.id, doc = %doc.url(), "issue created");
        Ok(issue)
    }

    /// Change the visible status of an issue.
    ///
    /// Looks up the issue row, resolves its companion document and
    /// substitutes the leading `[<status>]` marker of the document title
    /// with `new_status`. The row itself is not rewritten: the document
    /// title is the canonical visible status marker.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no row matches `id`, and
    /// `DocumentUpdateFailed` if the document cannot be resolved or
    /// renamed. No partial row mutation occurs, since none is attempted.
    pub fn change_status(&mut self, id: &IssueId, new_status: &str) -> Result<()> {
        info!(id = %id, status = new_status, "changing issue status");
        let issue = self.table.find_by_id(id)?;

        let url = issue.doc_url.as_deref().ok_or_else(|| {
            FormtrackError::document_update(format!("issue {id} has no document url"))
        })?;
        debug!(id = %id, doc = url, "renaming companion document");

        let result = self.rename_marker(url, new_status);
        result.map_err(|e| match e {
            FormtrackError::DocumentUpdateFailed { .. } => e,
            other => FormtrackError::document_update(other.to_string()),
        })
    }

    fn rename_marker(&mut self, url: &str, new_status: &str) -> Result<()> {
        let doc = self.docs.open_by_url(url)?;
        let title = self.docs.title_of(&doc)?;
        let new_title = substitute_status_marker(&title, new_status);
        self.docs.rename(&doc, &new_title)?;
        info!(doc = url, title = %new_title, "companion document renamed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{MemDocumentStore, MemFolder, doc_title};
    use crate::model::STATUS_OPEN;
    use crate::storage::MemStore;
    use crate::table::{HEADER_ISSUE_ID, ISSUE_HEADERS};
    use chrono::NaiveDate;

    type MemRepo = IssueRepository<MemStore, MemDocumentStore, MemFolder>;

    fn t() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn repo() -> MemRepo {
        let table = IssueTable::new(MemStore::new(&ISSUE_HEADERS)).unwrap();
        IssueRepository::new(
            table,
            MemDocumentStore::new(),
            MemFolder::new(),
            "K",
            "lead@example.com",
            "watchers@example.com",
        )
    }

    #[test]
    fn first_submission_gets_k1_open() {
        let mut repo = repo();
        let issue = repo
            .create_from_submission("a@x.com", t(), doc_title)
            .unwrap();

        assert_eq!(issue.id.to_string(), "K-1");
        assert_eq!(issue.status, STATUS_OPEN);
        assert_eq!(issue.submitter, "a@x.com");

        // Exactly one data row, matching the encoded form.
        assert_eq!(repo.table().store().row_count(), 2);
        let stored = repo.table().find_by_id(&issue.id).unwrap();
        assert_eq!(stored, issue);
    }

    #[test]
    fn second_submission_increments_id() {
        let mut repo = repo();
        repo.create_from_submission("a@x.com", t(), doc_title)
            .unwrap();
        let second = repo
            .create_from_submission("b@x.com", t(), doc_title)
            .unwrap();
        assert_eq!(second.id.to_string(), "K-2");
    }

    #[test]
    fn submission_creates_titled_shared_document() {
        let mut repo = repo();
        let issue = repo
            .create_from_submission("a@x.com", t(), doc_title)
            .unwrap();

        let url = issue.doc_url.as_deref().unwrap();
        assert_eq!(
            repo.docs().title_by_url(url),
            Some("[OPEN] K-1".to_string())
        );
        assert_eq!(
            repo.docs().editors_by_url(url),
            vec!["lead@example.com", "a@x.com"]
        );
        assert_eq!(
            repo.docs().viewers_by_url(url),
            vec!["watchers@example.com"]
        );
        assert_eq!(repo.folder().files(), [url.to_string()]);
    }

    #[test]
    fn change_status_renames_doc_but_not_row() {
        let mut repo = repo();
        let issue = repo
            .create_from_submission("a@x.com", t(), doc_title)
            .unwrap();
        let url = issue.doc_url.clone().unwrap();

        repo.change_status(&issue.id, "CLOSED").unwrap();

        assert_eq!(
            repo.docs().title_by_url(&url),
            Some("[CLOSED] K-1".to_string())
        );
        // The row's status cell stays at the pre-change value.
        let row_issue = repo.table().find_by_id(&issue.id).unwrap();
        assert_eq!(row_issue.status, STATUS_OPEN);
    }

    #[test]
    fn change_status_unknown_id_fails() {
        let mut repo = repo();
        let err = repo
            .change_status(&"K-7".parse().unwrap(), "CLOSED")
            .unwrap_err();
        assert!(matches!(err, FormtrackError::IssueNotFound { .. }));
    }

    #[test]
    fn change_status_without_doc_url_fails() {
        let mut repo = repo();
        // Row persisted without a document, bypassing the aggregate path.
        let issue = Issue::new("K-1".parse().unwrap(), "a@x.com", t());
        repo.table_mut().insert(&issue).unwrap();

        let err = repo.change_status(&issue.id, "CLOSED").unwrap_err();
        assert!(matches!(err, FormtrackError::DocumentUpdateFailed { .. }));
    }

    #[test]
    fn change_status_with_dangling_doc_url_fails() {
        let mut repo = repo();
        let mut issue = Issue::new("K-1".parse().unwrap(), "a@x.com", t());
        issue.doc_url = Some("mem://docs/404".to_string());
        repo.table_mut().insert(&issue).unwrap();

        let err = repo.change_status(&issue.id, "CLOSED").unwrap_err();
        assert!(matches!(err, FormtrackError::DocumentUpdateFailed { .. }));
    }

    #[test]
    fn change_status_on_unmarked_title_keeps_title() {
        let mut repo = repo();
        let issue = repo
            .create_from_submission("a@x.com", t(), |issue| format!("notes {}", issue.id))
            .unwrap();
        let url = issue.doc_url.clone().unwrap();

        repo.change_status(&issue.id, "CLOSED").unwrap();
        assert_eq!(repo.docs().title_by_url(&url), Some("notes K-1".to_string()));
    }

    #[test]
    fn id_lookup_goes_through_id_column() {
        // Guard: the lookup key is the header contract, not row position.
        let mut repo = repo();
        let issue = repo
            .create_from_submission("a@x.com", t(), doc_title)
            .unwrap();
        let handle = repo
            .table()
            .store()
            .find_row(HEADER_ISSUE_ID, &issue.id.to_string())
            .unwrap();
        assert!(handle.is_some());
    }
}

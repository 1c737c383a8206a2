//! Pure entry points invoked by the event-driven host.
//!
//! The surrounding platform delivers two kinds of events: an intake-form
//! submission and a cell edit on the issues sheet. Both are modeled as
//! synchronous functions over the repository so the core never depends on
//! a particular trigger mechanism.

use crate::doc::{DocumentStore, Folder, doc_title};
use crate::error::Result;
use crate::model::{Issue, IssueId, Submission};
use crate::repo::IssueRepository;
use crate::storage::TabularStore;
use tracing::debug;

/// Handle one intake-form submission: allocate, create the companion
/// document and persist the new issue.
///
/// # Errors
///
/// Propagates repository failures unchanged.
pub fn handle_submission<S, D, F>(
    repo: &mut IssueRepository<S, D, F>,
    submission: &Submission,
) -> Result<Issue>
where
    S: TabularStore,
    D: DocumentStore,
    F: Folder,
{
    repo.create_from_submission(
        &submission.submitter_email,
        submission.create_time,
        doc_title,
    )
}

/// Handle one cell edit on the issues sheet.
///
/// Edits of the header row (`edited_row < 2`) and edits outside the
/// status column are not status changes and are ignored, returning
/// `Ok(None)`. A qualifying edit parses `id_string` and applies
/// [`IssueRepository::change_status`], returning the affected id.
///
/// # Errors
///
/// Returns `MalformedId` for an unparseable id and propagates repository
/// failures unchanged.
pub fn handle_status_edit<S, D, F>(
    repo: &mut IssueRepository<S, D, F>,
    id_string: &str,
    new_status: &str,
    edited_row: usize,
    edited_col: usize,
) -> Result<Option<IssueId>>
where
    S: TabularStore,
    D: DocumentStore,
    F: Folder,
{
    if edited_row < 2 {
        debug!(edited_row, "ignoring edit of header row");
        return Ok(None);
    }
    let status_col = repo.table().status_column_index();
    if edited_col != status_col {
        debug!(edited_col, status_col, "ignoring edit outside status column");
        return Ok(None);
    }

    let id: IssueId = id_string.parse()?;
    repo.change_status(&id, new_status)?;
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{MemDocumentStore, MemFolder};
    use crate::error::FormtrackError;
    use crate::model::STATUS_OPEN;
    use crate::storage::MemStore;
    use crate::table::{ISSUE_HEADERS, IssueTable};
    use chrono::NaiveDate;

    fn submission(email: &str) -> Submission {
        Submission {
            submitter_email: email.to_string(),
            create_time: NaiveDate::from_ymd_opt(2024, 5, 20)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap(),
            summary: "printer on fire".to_string(),
            details: String::new(),
            reason: String::new(),
            severity: "high".to_string(),
            desired_deadline: None,
        }
    }

    fn repo() -> IssueRepository<MemStore, MemDocumentStore, MemFolder> {
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
    fn submission_produces_sequential_issues() {
        let mut repo = repo();
        let first = handle_submission(&mut repo, &submission("a@x.com")).unwrap();
        assert_eq!(first.id.to_string(), "K-1");
        assert_eq!(first.status, STATUS_OPEN);

        let second = handle_submission(&mut repo, &submission("b@x.com")).unwrap();
        assert_eq!(second.id.to_string(), "K-2");
    }

    #[test]
    fn status_edit_applies_on_status_column() {
        let mut repo = repo();
        let issue = handle_submission(&mut repo, &submission("a@x.com")).unwrap();
        let col = repo.table().status_column_index();

        let applied = handle_status_edit(&mut repo, "K-1", "CLOSED", 2, col).unwrap();
        assert_eq!(applied, Some(issue.id.clone()));
        assert_eq!(
            repo.docs().title_by_url(issue.doc_url.as_deref().unwrap()),
            Some("[CLOSED] K-1".to_string())
        );
    }

    #[test]
    fn header_row_edit_is_ignored() {
        let mut repo = repo();
        handle_submission(&mut repo, &submission("a@x.com")).unwrap();
        let col = repo.table().status_column_index();

        let applied = handle_status_edit(&mut repo, "K-1", "CLOSED", 1, col).unwrap();
        assert!(applied.is_none());
    }

    #[test]
    fn non_status_column_edit_is_ignored() {
        let mut repo = repo();
        let issue = handle_submission(&mut repo, &submission("a@x.com")).unwrap();

        let applied = handle_status_edit(&mut repo, "K-1", "CLOSED", 2, 1).unwrap();
        assert!(applied.is_none());
        assert_eq!(
            repo.docs().title_by_url(issue.doc_url.as_deref().unwrap()),
            Some("[OPEN] K-1".to_string())
        );
    }

    #[test]
    fn bad_id_surfaces_malformed() {
        let mut repo = repo();
        handle_submission(&mut repo, &submission("a@x.com")).unwrap();
        let col = repo.table().status_column_index();

        let err = handle_status_edit(&mut repo, "garbage", "CLOSED", 2, col).unwrap_err();
        assert!(matches!(err, FormtrackError::MalformedId { .. }));
    }
}

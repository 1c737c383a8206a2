//! Per-invocation application wiring.
//!
//! `App` assembles the production collaborators out of one loaded
//! `Config` and hands the repository to whichever entry point the host
//! fires. It is constructed fresh on every invocation; nothing here is a
//! process-wide singleton.

use crate::config::Config;
use crate::doc::{FsDocumentStore, FsFolder};
use crate::error::Result;
use crate::model::Submission;
use crate::repo::IssueRepository;
use crate::storage::{SqliteStore, TabularStore};
use crate::table::IssueTable;
use crate::util::time::{format_sheet_date, format_sheet_timestamp};
use tracing::debug;

/// Column titles of the raw-submissions sheet, in persisted order.
pub const RAW_FORM_HEADERS: [&str; 7] = [
    "Timestamp",
    "Email",
    "Summary",
    "Details",
    "Reason",
    "Severity",
    "Desired Deadline",
];

/// One wired-up invocation context.
#[derive(Debug)]
pub struct App {
    config: Config,
    repo: IssueRepository<SqliteStore, FsDocumentStore, FsFolder>,
}

impl App {
    /// Wire the production collaborators from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails if the store, a sheet, or one of the document directories is
    /// missing — i.e. the workspace has not been initialized.
    pub fn init(config: Config) -> Result<Self> {
        debug!(db = %config.db.display(), sheet = %config.issues_sheet, "wiring app");
        let store = SqliteStore::open(&config.db, &config.issues_sheet)?;
        let table = IssueTable::new(store)?;
        let docs = FsDocumentStore::open(&config.docs_dir)?;
        let folder = FsFolder::open(&config.folder_dir)?;
        let repo = IssueRepository::new(
            table,
            docs,
            folder,
            config.issue_key.clone(),
            config.default_editor.clone(),
            config.default_viewer.clone(),
        );
        Ok(Self { config, repo })
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The issue repository.
    pub fn repo_mut(&mut self) -> &mut IssueRepository<SqliteStore, FsDocumentStore, FsFolder> {
        &mut self.repo
    }

    /// Shared access to the issue repository.
    #[must_use]
    pub fn repo(&self) -> &IssueRepository<SqliteStore, FsDocumentStore, FsFolder> {
        &self.repo
    }

    /// Append a submission to the raw-submissions sheet, the way the form
    /// platform records every intake before any issue exists. Host-side;
    /// not part of the aggregate.
    ///
    /// # Errors
    ///
    /// Fails if the raw-submissions sheet is missing or the append fails.
    pub fn record_raw_submission(&self, submission: &Submission) -> Result<()> {
        let mut raw = SqliteStore::open(&self.config.db, &self.config.raw_form_sheet)?;
        raw.append_row(&[
            format_sheet_timestamp(submission.create_time),
            submission.submitter_email.clone(),
            submission.summary.clone(),
            submission.details.clone(),
            submission.reason.clone(),
            submission.severity.clone(),
            submission
                .desired_deadline
                .map(format_sheet_date)
                .unwrap_or_default(),
        ])
    }
}

//! Companion document collaborators.
//!
//! Every issue gets one rich-text companion document whose display title
//! carries the visible status marker (`"[OPEN] ISS-3"`). The core only
//! needs a handful of capabilities from the surrounding system: create a
//! titled document, file it into a folder, grant access, re-resolve a
//! persisted URL back into a handle, and rename. Content population is
//! out of scope entirely.

mod fs;
mod memory;

pub use fs::{FsDocumentStore, FsFolder};
pub use memory::{MemDocumentStore, MemFolder};

use crate::error::Result;
use crate::model::Issue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opaque handle to a companion document. The URL is the persisted,
/// stable identity of the document; adapters may relocate the underlying
/// artifact when filing it into a folder, updating the handle in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    url: String,
}

impl DocumentRef {
    /// Wrap a document URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The document URL, as persisted into the issue row.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }
}

/// Document capabilities supplied by the surrounding system.
pub trait DocumentStore {
    /// Create a new document with the given display title.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the document cannot be created.
    fn create(&mut self, title: &str) -> Result<DocumentRef>;

    /// Re-resolve a persisted URL into an editable handle.
    ///
    /// # Errors
    ///
    /// Returns `DocumentUpdateFailed` if no document lives at `url`.
    fn open_by_url(&self, url: &str) -> Result<DocumentRef>;

    /// Current display title of the document.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the document cannot be read.
    fn title_of(&self, doc: &DocumentRef) -> Result<String>;

    /// Rewrite the display title.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the document cannot be rewritten.
    fn rename(&mut self, doc: &DocumentRef, new_title: &str) -> Result<()>;

    /// Grant edit access to an email address.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the grant cannot be recorded.
    fn add_editor(&mut self, doc: &DocumentRef, email: &str) -> Result<()>;

    /// Grant view access to an email address.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the grant cannot be recorded.
    fn add_viewer(&mut self, doc: &DocumentRef, email: &str) -> Result<()>;
}

/// Folder collaborator: files a created document into the issue-doc
/// folder. May relocate the document; the handle is updated in place.
pub trait Folder {
    /// File the document into this folder.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the document cannot be moved.
    fn add_file(&mut self, doc: &mut DocumentRef) -> Result<()>;
}

/// Default companion-document title: `"[<status>] <id>"`.
#[must_use]
pub fn doc_title(issue: &Issue) -> String {
    format!("[{}] {}", issue.status, issue.id)
}

static STATUS_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[A-Za-z0-9]+\]").expect("status marker pattern"));

/// Substitute the leading bracketed status marker of a title with
/// `new_status`. Titles that do not start with a marker pass through
/// unchanged; the substitution rule is applied literally, nothing more.
#[must_use]
pub fn substitute_status_marker(title: &str, new_status: &str) -> String {
    STATUS_MARKER
        .replace(title, format!("[{new_status}]"))
        .into_owned()
}

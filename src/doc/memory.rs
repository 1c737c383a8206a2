//! In-memory document adapter for unit tests and embedders.

use super::{DocumentRef, DocumentStore, Folder};
use crate::error::{FormtrackError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct MemDoc {
    title: String,
    editors: Vec<String>,
    viewers: Vec<String>,
}

/// Map-backed document store with `mem://docs/<n>` URLs.
#[derive(Debug, Default)]
pub struct MemDocumentStore {
    docs: HashMap<String, MemDoc>,
    next: u64,
}

impl MemDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Title of the document at `url`, if it exists (test inspection).
    #[must_use]
    pub fn title_by_url(&self, url: &str) -> Option<String> {
        self.docs.get(url).map(|d| d.title.clone())
    }

    /// Editor grants of the document at `url` (test inspection).
    #[must_use]
    pub fn editors_by_url(&self, url: &str) -> Vec<String> {
        self.docs.get(url).map(|d| d.editors.clone()).unwrap_or_default()
    }

    /// Viewer grants of the document at `url` (test inspection).
    #[must_use]
    pub fn viewers_by_url(&self, url: &str) -> Vec<String> {
        self.docs.get(url).map(|d| d.viewers.clone()).unwrap_or_default()
    }

    fn doc_mut(&mut self, doc: &DocumentRef) -> Result<&mut MemDoc> {
        self.docs
            .get_mut(doc.url())
            .ok_or_else(|| FormtrackError::document_update(format!("no document at '{}'", doc.url())))
    }
}

impl DocumentStore for MemDocumentStore {
    fn create(&mut self, title: &str) -> Result<DocumentRef> {
        self.next += 1;
        let url = format!("mem://docs/{}", self.next);
        self.docs.insert(
            url.clone(),
            MemDoc {
                title: title.to_string(),
                ..MemDoc::default()
            },
        );
        Ok(DocumentRef::new(url))
    }

    fn open_by_url(&self, url: &str) -> Result<DocumentRef> {
        if !self.docs.contains_key(url) {
            return Err(FormtrackError::document_update(format!(
                "no document at '{url}'"
            )));
        }
        Ok(DocumentRef::new(url))
    }

    fn title_of(&self, doc: &DocumentRef) -> Result<String> {
        self.docs
            .get(doc.url())
            .map(|d| d.title.clone())
            .ok_or_else(|| FormtrackError::document_update(format!("no document at '{}'", doc.url())))
    }

    fn rename(&mut self, doc: &DocumentRef, new_title: &str) -> Result<()> {
        self.doc_mut(doc)?.title = new_title.to_string();
        Ok(())
    }

    fn add_editor(&mut self, doc: &DocumentRef, email: &str) -> Result<()> {
        let entry = self.doc_mut(doc)?;
        if !entry.editors.iter().any(|e| e == email) {
            entry.editors.push(email.to_string());
        }
        Ok(())
    }

    fn add_viewer(&mut self, doc: &DocumentRef, email: &str) -> Result<()> {
        let entry = self.doc_mut(doc)?;
        if !entry.viewers.iter().any(|v| v == email) {
            entry.viewers.push(email.to_string());
        }
        Ok(())
    }
}

/// Folder that records which documents were filed into it.
#[derive(Debug, Default)]
pub struct MemFolder {
    files: Vec<String>,
}

impl MemFolder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs filed into this folder, in order (test inspection).
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }
}

impl Folder for MemFolder {
    fn add_file(&mut self, doc: &mut DocumentRef) -> Result<()> {
        self.files.push(doc.url().to_string());
        Ok(())
    }
}

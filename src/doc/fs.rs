//! Filesystem document adapter.
//!
//! Documents are Markdown files named `doc-<n>.md` whose first line holds
//! the display title (`# <title>`); the file's absolute path doubles as
//! its URL. Access grants are persisted in a `doc-<n>.meta.json` sidecar.
//! New documents start in a staging directory and are moved into the
//! issue-doc folder by [`FsFolder::add_file`], which mirrors the original
//! create-then-file flow.

use super::{DocumentRef, DocumentStore, Folder};
use crate::error::{FormtrackError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SEQ_FILE: &str = ".seq";
const META_EXT: &str = "meta.json";

/// Access grants persisted next to each document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocMeta {
    #[serde(default)]
    pub editors: Vec<String>,
    #[serde(default)]
    pub viewers: Vec<String>,
}

/// Document store rooted at a staging directory.
#[derive(Debug)]
pub struct FsDocumentStore {
    staging: PathBuf,
}

fn meta_path(doc_path: &Path) -> PathBuf {
    doc_path.with_extension(META_EXT)
}

fn read_meta(doc_path: &Path) -> Result<DocMeta> {
    let path = meta_path(doc_path);
    if !path.exists() {
        return Ok(DocMeta::default());
    }
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn write_meta(doc_path: &Path, meta: &DocMeta) -> Result<()> {
    fs::write(meta_path(doc_path), serde_json::to_string_pretty(meta)?)?;
    Ok(())
}

impl FsDocumentStore {
    /// Open a store over an existing staging directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist.
    pub fn open(staging: impl Into<PathBuf>) -> Result<Self> {
        let staging = staging.into();
        if !staging.is_dir() {
            return Err(FormtrackError::Config(format!(
                "document staging directory '{}' does not exist",
                staging.display()
            )));
        }
        Ok(Self {
            // Document URLs must stay resolvable regardless of the
            // caller's working directory.
            staging: staging.canonicalize()?,
        })
    }

    /// Create the staging directory if needed and open a store over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(staging: impl Into<PathBuf>) -> Result<Self> {
        let staging = staging.into();
        fs::create_dir_all(&staging)?;
        Self::open(staging)
    }

    fn next_seq(&mut self) -> Result<u64> {
        let path = self.staging.join(SEQ_FILE);
        let current: u64 = if path.exists() {
            fs::read_to_string(&path)?.trim().parse().unwrap_or(0)
        } else {
            0
        };
        let next = current + 1;
        fs::write(&path, next.to_string())?;
        Ok(next)
    }

    fn doc_path(doc: &DocumentRef) -> PathBuf {
        PathBuf::from(doc.url())
    }
}

impl DocumentStore for FsDocumentStore {
    fn create(&mut self, title: &str) -> Result<DocumentRef> {
        let n = self.next_seq()?;
        let path = self.staging.join(format!("doc-{n}.md"));
        fs::write(&path, format!("# {title}\n"))?;
        write_meta(&path, &DocMeta::default())?;
        Ok(DocumentRef::new(path.to_string_lossy().into_owned()))
    }

    fn open_by_url(&self, url: &str) -> Result<DocumentRef> {
        let path = PathBuf::from(url);
        if !path.is_file() {
            return Err(FormtrackError::document_update(format!(
                "no document at '{url}'"
            )));
        }
        Ok(DocumentRef::new(url))
    }

    fn title_of(&self, doc: &DocumentRef) -> Result<String> {
        let contents = fs::read_to_string(Self::doc_path(doc))?;
        let first = contents.lines().next().unwrap_or("");
        Ok(first.strip_prefix("# ").unwrap_or(first).to_string())
    }

    fn rename(&mut self, doc: &DocumentRef, new_title: &str) -> Result<()> {
        let path = Self::doc_path(doc);
        let contents = fs::read_to_string(&path)?;
        let body: String = contents.lines().skip(1).collect::<Vec<_>>().join("\n");
        let rewritten = if body.is_empty() {
            format!("# {new_title}\n")
        } else {
            format!("# {new_title}\n{body}\n")
        };
        fs::write(&path, rewritten)?;
        Ok(())
    }

    fn add_editor(&mut self, doc: &DocumentRef, email: &str) -> Result<()> {
        let path = Self::doc_path(doc);
        let mut meta = read_meta(&path)?;
        if !meta.editors.iter().any(|e| e == email) {
            meta.editors.push(email.to_string());
        }
        write_meta(&path, &meta)
    }

    fn add_viewer(&mut self, doc: &DocumentRef, email: &str) -> Result<()> {
        let path = Self::doc_path(doc);
        let mut meta = read_meta(&path)?;
        if !meta.viewers.iter().any(|v| v == email) {
            meta.viewers.push(email.to_string());
        }
        write_meta(&path, &meta)
    }
}

/// Folder adapter: a directory that documents are moved into.
#[derive(Debug)]
pub struct FsFolder {
    dir: PathBuf,
}

impl FsFolder {
    /// Open an existing folder directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(FormtrackError::Config(format!(
                "issue-doc folder '{}' does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.canonicalize()?,
        })
    }

    /// Create the folder directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Self::open(dir)
    }
}

impl Folder for FsFolder {
    fn add_file(&mut self, doc: &mut DocumentRef) -> Result<()> {
        let from = PathBuf::from(doc.url());
        let name = from
            .file_name()
            .ok_or_else(|| FormtrackError::document_update(format!("bad url '{}'", doc.url())))?;
        let to = self.dir.join(name);
        fs::rename(&from, &to)?;
        let from_meta = meta_path(&from);
        if from_meta.exists() {
            fs::rename(&from_meta, meta_path(&to))?;
        }
        doc.set_url(to.to_string_lossy().into_owned());
        Ok(())
    }
}

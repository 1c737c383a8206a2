//! Error types and handling for `formtrack`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for wrapped infrastructure errors
//! - Domain failures (bad id, undecodable row, missing issue, missing
//!   column, document update) get their own variants and are surfaced to
//!   the triggering operation without retry or compensation

use thiserror::Error;

/// Primary error type for `formtrack` operations.
#[derive(Error, Debug)]
pub enum FormtrackError {
    // === Identifier / Row Errors ===
    /// Issue ID string does not have the `<key>-<num>` shape.
    #[error("Malformed issue id: '{id}'")]
    MalformedId { id: String },

    /// A persisted row cannot be decoded back into an issue.
    #[error("Malformed row: {reason}")]
    MalformedRow { reason: String },

    // === Lookup Errors ===
    /// Issue with the specified ID was not found in the table.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// Expected header is missing from the sheet.
    #[error("Column not found: '{header}'")]
    ColumnNotFound { header: String },

    /// Named sheet does not exist in the store.
    #[error("Sheet not found: '{name}'")]
    SheetNotFound { name: String },

    // === Document Errors ===
    /// Companion document could not be resolved or renamed.
    #[error("Document update failed: {reason}")]
    DocumentUpdateFailed { reason: String },

    // === Validation Errors ===
    /// Host-side input validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    // === Configuration Errors ===
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === Infrastructure Errors ===
    /// `SQLite` database error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FormtrackError {
    /// Create a malformed-id error.
    #[must_use]
    pub fn malformed_id(id: impl Into<String>) -> Self {
        Self::MalformedId { id: id.into() }
    }

    /// Create a malformed-row error.
    #[must_use]
    pub fn malformed_row(reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            reason: reason.into(),
        }
    }

    /// Create a not-found error for the given id.
    #[must_use]
    pub fn issue_not_found(id: impl Into<String>) -> Self {
        Self::IssueNotFound { id: id.into() }
    }

    /// Create a document-update error.
    #[must_use]
    pub fn document_update(reason: impl Into<String>) -> Self {
        Self::DocumentUpdateFailed {
            reason: reason.into(),
        }
    }

    /// Create a validation error for a specific field.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedId { .. }
                | Self::IssueNotFound { .. }
                | Self::SheetNotFound { .. }
                | Self::Validation { .. }
                | Self::Config(_)
        )
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type using `FormtrackError`.
pub type Result<T> = std::result::Result<T, FormtrackError>;

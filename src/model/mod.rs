//! Core data types for `formtrack`.
//!
//! This module defines the fundamental types used throughout the application:
//! - `IssueId` - Namespace + sequence identifier (`"PRJ-7"`)
//! - `Issue` - The aggregate root for one tracked item
//! - `Submission` - Typed intake-form payload

use crate::error::FormtrackError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status every new issue starts in.
pub const STATUS_OPEN: &str = "OPEN";

/// Issue identifier: a short project key plus a monotonically increasing
/// sequence number. Canonical string form is `"{key}-{num}"`, which is
/// also its serialized form.
///
/// `num` is always >= 1; values that would violate that are rejected at
/// the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueId {
    key: String,
    num: u32,
}

impl Serialize for IssueId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IssueId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

impl IssueId {
    /// First identifier for a key.
    #[must_use]
    pub fn first(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            num: 1,
        }
    }

    /// The project key (namespace) portion.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The sequence number portion.
    #[must_use]
    pub const fn num(&self) -> u32 {
        self.num
    }

    /// The identifier following this one, same key. Never mutates `self`.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            key: self.key.clone(),
            num: self.num + 1,
        }
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key, self.num)
    }
}

impl FromStr for IssueId {
    type Err = FormtrackError;

    /// Parse the canonical `"{key}-{num}"` form.
    ///
    /// Rejected as `MalformedId`: zero or more than one `-` separator, an
    /// empty key, a non-integer suffix, and a suffix of `0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(FormtrackError::malformed_id(s));
        }
        let (key, num_str) = (parts[0], parts[1]);
        if key.is_empty() {
            return Err(FormtrackError::malformed_id(s));
        }
        let num: u32 = num_str
            .parse()
            .map_err(|_| FormtrackError::malformed_id(s))?;
        if num == 0 {
            return Err(FormtrackError::malformed_id(s));
        }
        Ok(Self {
            key: key.to_string(),
            num,
        })
    }
}

/// The aggregate root representing one tracked item.
///
/// `id`, `submitter` and `create_time` are fixed at creation. `status`
/// starts as [`STATUS_OPEN`] and is the only business field mutated through
/// repository operations; `assignee` and `doc_url` change only as side
/// effects of defined operations. Issues are never deleted: updates
/// overwrite the backing row in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique sequential ID (e.g., "ISS-12").
    pub id: IssueId,

    /// Submitter email, non-empty.
    pub submitter: String,

    /// Wall-clock creation time (matches the persisted sheet format,
    /// which carries no timezone).
    pub create_time: NaiveDateTime,

    /// Assigned user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Workflow status. Opaque to the core: no transition table is
    /// enforced, any string may follow any other.
    pub status: String,

    /// URL of the companion document, once created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
}

impl Issue {
    /// Construct a freshly submitted issue in the `OPEN` state.
    #[must_use]
    pub fn new(id: IssueId, submitter: impl Into<String>, create_time: NaiveDateTime) -> Self {
        Self {
            id,
            submitter: submitter.into(),
            create_time,
            assignee: None,
            status: STATUS_OPEN.to_string(),
            doc_url: None,
        }
    }
}

/// One intake-form submission, already decoded by the host.
///
/// The repository consumes only `submitter_email` and `create_time`; the
/// remaining fields travel with the payload for the raw-submissions sheet
/// and the document collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub submitter_email: String,
    pub create_time: NaiveDateTime,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_deadline: Option<NaiveDate>,
}

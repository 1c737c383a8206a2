//! Issue ⇄ row codec.
//!
//! A row is a fixed-width ordered sequence of string cells:
//! `[id, submitter, created, assignee, status, document url]`. Absent
//! `assignee`/`doc_url` encode as the empty string, and an empty cell
//! decodes back to absent.

use crate::error::{FormtrackError, Result};
use crate::model::{Issue, IssueId};
use crate::util::time::{format_sheet_timestamp, parse_sheet_timestamp};

/// Number of cells in an issue row.
const ROW_WIDTH: usize = 6;

/// Encode an issue into its persisted row form.
#[must_use]
pub fn encode_row(issue: &Issue) -> Vec<String> {
    vec![
        issue.id.to_string(),
        issue.submitter.clone(),
        format_sheet_timestamp(issue.create_time),
        issue.assignee.clone().unwrap_or_default(),
        issue.status.clone(),
        issue.doc_url.clone().unwrap_or_default(),
    ]
}

/// Decode a persisted row back into an issue.
///
/// # Errors
///
/// Returns `MalformedRow` when the row has fewer than six cells or its id
/// or timestamp cell cannot be parsed.
pub fn decode_row(cells: &[String]) -> Result<Issue> {
    if cells.len() < ROW_WIDTH {
        return Err(FormtrackError::malformed_row(format!(
            "expected {ROW_WIDTH} cells, got {}",
            cells.len()
        )));
    }

    let id: IssueId = cells[0]
        .parse()
        .map_err(|_| FormtrackError::malformed_row(format!("bad issue id '{}'", cells[0])))?;
    let create_time = parse_sheet_timestamp(&cells[2])?;

    Ok(Issue {
        id,
        submitter: cells[1].clone(),
        create_time,
        assignee: non_empty(&cells[3]),
        status: cells[4].clone(),
        doc_url: non_empty(&cells[5]),
    })
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

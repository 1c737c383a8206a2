//! Sheet timestamp parsing and formatting.
//!
//! The tabular store persists creation times as `YYYY/MM/DD HH:mm:ss`
//! wall-clock strings with no timezone marker, so the crate works with
//! `NaiveDateTime` throughout and hosts stamp local time at the intake
//! boundary.

use crate::error::{FormtrackError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// The persisted timestamp pattern. Part of the row wire format.
pub const SHEET_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// The persisted date-only pattern (desired deadlines).
pub const SHEET_DATE_FORMAT: &str = "%Y/%m/%d";

/// Format a timestamp for a sheet cell.
#[must_use]
pub fn format_sheet_timestamp(ts: NaiveDateTime) -> String {
    ts.format(SHEET_TIMESTAMP_FORMAT).to_string()
}

/// Parse a sheet cell back into a timestamp.
///
/// # Errors
///
/// Returns `MalformedRow` if the cell does not match the persisted
/// pattern.
pub fn parse_sheet_timestamp(cell: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(cell.trim(), SHEET_TIMESTAMP_FORMAT)
        .map_err(|e| FormtrackError::malformed_row(format!("bad timestamp '{cell}': {e}")))
}

/// Format a date-only value for a sheet cell.
#[must_use]
pub fn format_sheet_date(date: NaiveDate) -> String {
    date.format(SHEET_DATE_FORMAT).to_string()
}

/// Parse a date-only cell.
///
/// # Errors
///
/// Returns `MalformedRow` if the cell does not match the date pattern.
pub fn parse_sheet_date(cell: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), SHEET_DATE_FORMAT)
        .map_err(|e| FormtrackError::malformed_row(format!("bad date '{cell}': {e}")))
}

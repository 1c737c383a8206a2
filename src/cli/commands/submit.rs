//! Submit command implementation.

use crate::app::App;
use crate::cli::SubmitArgs;
use crate::config::Config;
use crate::error::{FormtrackError, Result};
use crate::handlers::handle_submission;
use crate::model::Submission;
use crate::util::time::{SHEET_DATE_FORMAT, SHEET_TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::path::Path;

/// Execute the submit command: record the raw submission, then create the
/// issue through the intake entry point.
///
/// # Errors
///
/// Returns `Validation` for unparseable `--at`/`--deadline` values and
/// propagates workspace failures.
pub fn execute(args: &SubmitArgs, json: bool, config_path: &Path) -> Result<()> {
    let submission = build_submission(args)?;

    let mut app = App::init(Config::load(config_path)?)?;
    app.record_raw_submission(&submission)?;
    let issue = handle_submission(app.repo_mut(), &submission)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!(
            "Created {} (doc: {})",
            issue.id,
            issue.doc_url.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn build_submission(args: &SubmitArgs) -> Result<Submission> {
    let create_time: NaiveDateTime = args.at.as_deref().map_or_else(
        || Ok(Local::now().naive_local()),
        |at| {
            NaiveDateTime::parse_from_str(at, SHEET_TIMESTAMP_FORMAT)
                .map_err(|e| FormtrackError::validation("at", format!("'{at}': {e}")))
        },
    )?;
    let desired_deadline = args
        .deadline
        .as_deref()
        .map(|d| {
            NaiveDate::parse_from_str(d, SHEET_DATE_FORMAT)
                .map_err(|e| FormtrackError::validation("deadline", format!("'{d}': {e}")))
        })
        .transpose()?;

    Ok(Submission {
        submitter_email: args.email.clone(),
        create_time,
        summary: args.summary.clone(),
        details: args.details.clone(),
        reason: args.reason.clone(),
        severity: args.severity.clone(),
        desired_deadline,
    })
}

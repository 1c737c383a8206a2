//! Show command implementation.

use crate::app::App;
use crate::config::Config;
use crate::error::Result;
use crate::model::IssueId;
use crate::util::time::format_sheet_timestamp;
use std::path::Path;

/// Execute the show command.
///
/// # Errors
///
/// Returns `MalformedId` for an unparseable id and `IssueNotFound` if no
/// row matches.
pub fn execute(id: &str, json: bool, config_path: &Path) -> Result<()> {
    let id: IssueId = id.parse()?;
    let app = App::init(Config::load(config_path)?)?;
    let issue = app.repo().table().find_by_id(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!("{}", issue.id);
        println!("  Submitter: {}", issue.submitter);
        println!("  Created:   {}", format_sheet_timestamp(issue.create_time));
        println!("  Assignee:  {}", issue.assignee.as_deref().unwrap_or("-"));
        println!("  Status:    {}", issue.status);
        println!("  Document:  {}", issue.doc_url.as_deref().unwrap_or("-"));
    }
    Ok(())
}

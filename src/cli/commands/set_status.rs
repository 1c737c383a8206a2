//! Set-status command implementation.
//!
//! Mirrors the original platform flow where a human edits the status
//! cell of the issues sheet and a trigger reacts to that edit: the
//! command first performs the cell edit (host-side), then fires the
//! status-edit entry point with the edited row and column. The core
//! itself never rewrites the row.

use crate::app::App;
use crate::cli::SetStatusArgs;
use crate::config::Config;
use crate::error::{FormtrackError, Result};
use crate::handlers::handle_status_edit;
use crate::model::IssueId;
use crate::storage::TabularStore;
use crate::table::HEADER_ISSUE_ID;
use std::path::Path;
use tracing::debug;

/// Execute the set-status command.
///
/// # Errors
///
/// Returns `MalformedId` for an unparseable id, `IssueNotFound` if the
/// issue has no row, and `DocumentUpdateFailed` if the companion document
/// cannot be renamed.
pub fn execute(args: &SetStatusArgs, json: bool, config_path: &Path) -> Result<()> {
    let id: IssueId = args.id.parse()?;
    let mut app = App::init(Config::load(config_path)?)?;

    let (edited_row, edited_col) = edit_status_cell(&mut app, &id, &args.status)?;
    handle_status_edit(app.repo_mut(), &args.id, &args.status, edited_row, edited_col)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "id": id.to_string(), "status": args.status })
        );
    } else {
        println!("{} status set to {}", id, args.status);
    }
    Ok(())
}

/// The host-side "human edit": overwrite the status cell of the issue's
/// row, returning the edited position for the trigger.
fn edit_status_cell(app: &mut App, id: &IssueId, new_status: &str) -> Result<(usize, usize)> {
    let table = app.repo_mut().table_mut();
    let col = table.status_column_index();
    let store = table.store_mut();

    let row = store
        .find_row(HEADER_ISSUE_ID, &id.to_string())?
        .ok_or_else(|| FormtrackError::issue_not_found(id.to_string()))?;

    let mut cells = store.read_cells(row)?;
    let cell = cells.get_mut(col - 1).ok_or_else(|| {
        FormtrackError::malformed_row(format!("row {} has no status cell", row.row()))
    })?;
    *cell = new_status.to_string();
    store.write_cells(row, &cells)?;

    debug!(id = %id, row = row.row(), col, "status cell edited");
    Ok((row.row(), col))
}

//! Init command implementation.

use crate::app::RAW_FORM_HEADERS;
use crate::cli::InitArgs;
use crate::config::Config;
use crate::doc::{FsDocumentStore, FsFolder};
use crate::error::{FormtrackError, Result};
use crate::storage::SqliteStore;
use crate::table::ISSUE_HEADERS;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Execute the init command: write the config file, seed both sheets and
/// create the document directories.
///
/// # Errors
///
/// Returns `Config` if the workspace already exists and `--force` was not
/// given.
pub fn execute(args: &InitArgs, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        return Err(FormtrackError::Config(format!(
            "already initialized at '{}' (use --force to reinitialize)",
            config_path.display()
        )));
    }

    let config = Config {
        issue_key: args.key.clone(),
        issues_sheet: "Issues".to_string(),
        raw_form_sheet: "Raw Submissions".to_string(),
        db: PathBuf::from("formtrack.db"),
        docs_dir: PathBuf::from("docs/drafts"),
        folder_dir: PathBuf::from("docs/issues"),
        default_editor: args.editor.clone(),
        default_viewer: args.viewer.clone(),
    };

    if args.force && config.db.exists() {
        fs::remove_file(&config.db)?;
    }

    config.save(config_path)?;
    drop(SqliteStore::create(
        &config.db,
        &config.issues_sheet,
        &ISSUE_HEADERS,
    )?);
    drop(SqliteStore::create(
        &config.db,
        &config.raw_form_sheet,
        &RAW_FORM_HEADERS,
    )?);
    drop(FsDocumentStore::create(&config.docs_dir)?);
    drop(FsFolder::create(&config.folder_dir)?);

    info!(config = %config_path.display(), key = %config.issue_key, "workspace initialized");
    println!(
        "Initialized formtrack workspace (key {}, store {})",
        config.issue_key,
        config.db.display()
    );
    Ok(())
}

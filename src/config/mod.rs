//! Configuration management for `formtrack`.
//!
//! One flat YAML file loaded once per invocation; no hot reload.
//! Sources and precedence (highest wins):
//! 1. Environment overrides (`FORMTRACK_DB`)
//! 2. Config file (`formtrack.yaml`)
//! 3. Defaults for the workspace-layout keys
//!
//! The config file path itself comes from the CLI (`--config`, or the
//! `FORMTRACK_CONFIG` environment variable).

use crate::error::{FormtrackError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename.
pub const DEFAULT_CONFIG_FILENAME: &str = "formtrack.yaml";

fn default_issues_sheet() -> String {
    "Issues".to_string()
}

fn default_raw_form_sheet() -> String {
    "Raw Submissions".to_string()
}

fn default_db() -> PathBuf {
    PathBuf::from("formtrack.db")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs/drafts")
}

fn default_folder_dir() -> PathBuf {
    PathBuf::from("docs/issues")
}

/// Flat key→value configuration for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Issue id namespace (the `K` of `K-1`).
    pub issue_key: String,

    /// Sheet holding issue rows.
    #[serde(default = "default_issues_sheet")]
    pub issues_sheet: String,

    /// Sheet holding raw form submissions.
    #[serde(default = "default_raw_form_sheet")]
    pub raw_form_sheet: String,

    /// Tabular store database path.
    #[serde(default = "default_db")]
    pub db: PathBuf,

    /// Staging directory where documents are created.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Issue-doc folder directory that documents are filed into.
    #[serde(default = "default_folder_dir")]
    pub folder_dir: PathBuf,

    /// Email granted edit access on every companion document.
    pub default_editor: String,

    /// Email granted view access on every companion document.
    pub default_viewer: String,
}

impl Config {
    /// Load and validate the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file is missing, unparseable, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, env::var("FORMTRACK_DB").ok().as_deref())
    }

    fn load_with_env(path: &Path, db_override: Option<&str>) -> Result<Self> {
        if !path.is_file() {
            return Err(FormtrackError::Config(format!(
                "config file '{}' not found (run 'ft init' first)",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| FormtrackError::Config(format!("{}: {e}", path.display())))?;

        if let Some(db) = db_override {
            if !db.trim().is_empty() {
                config.db = PathBuf::from(db);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Serialize and write the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.issue_key.trim().is_empty() {
            return Err(FormtrackError::Config(
                "issue_key must not be empty".to_string(),
            ));
        }
        if self.issue_key.contains('-') {
            return Err(FormtrackError::Config(
                "issue_key must not contain '-'".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, yaml: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn load_applies_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "issue_key: K\ndefault_editor: lead@example.com\ndefault_viewer: all@example.com\n",
        );
        let config = Config::load_with_env(&path, None).unwrap();
        assert_eq!(config.issue_key, "K");
        assert_eq!(config.issues_sheet, "Issues");
        assert_eq!(config.raw_form_sheet, "Raw Submissions");
        assert_eq!(config.db, PathBuf::from("formtrack.db"));
    }

    #[test]
    fn env_override_wins_for_db() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "issue_key: K\ndb: from_file.db\ndefault_editor: a@x.com\ndefault_viewer: b@x.com\n",
        );
        let config = Config::load_with_env(&path, Some("/tmp/override.db")).unwrap();
        assert_eq!(config.db, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn missing_file_and_missing_key_fail() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            Config::load_with_env(&missing, None).unwrap_err(),
            FormtrackError::Config(_)
        ));

        let path = write_config(&dir, "issues_sheet: Issues\n");
        assert!(matches!(
            Config::load_with_env(&path, None).unwrap_err(),
            FormtrackError::Config(_)
        ));
    }

    #[test]
    fn invalid_issue_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "issue_key: \"A-B\"\ndefault_editor: a@x.com\ndefault_viewer: b@x.com\n",
        );
        assert!(matches!(
            Config::load_with_env(&path, None).unwrap_err(),
            FormtrackError::Config(_)
        ));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
        let config = Config {
            issue_key: "ISS".to_string(),
            issues_sheet: default_issues_sheet(),
            raw_form_sheet: default_raw_form_sheet(),
            db: dir.path().join("store.db"),
            docs_dir: dir.path().join("drafts"),
            folder_dir: dir.path().join("issues"),
            default_editor: "lead@example.com".to_string(),
            default_viewer: "all@example.com".to_string(),
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load_with_env(&path, None).unwrap(), config);
    }
}

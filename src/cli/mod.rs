//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Form-intake issue tracker (tabular store + companion docs)
#[derive(Parser, Debug)]
#[command(name = "ft", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(
        long,
        global = true,
        env = "FORMTRACK_CONFIG",
        default_value = crate::config::DEFAULT_CONFIG_FILENAME
    )]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a formtrack workspace
    Init(InitArgs),

    /// Record an intake submission and create its issue
    Submit(SubmitArgs),

    /// Edit an issue's status cell and fire the status trigger
    SetStatus(SetStatusArgs),

    /// Show issue details
    Show {
        /// Issue ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Issue id namespace (the "K" of K-1)
    #[arg(long, default_value = "ISS")]
    pub key: String,

    /// Email granted edit access on every companion document
    #[arg(long)]
    pub editor: String,

    /// Email granted view access on every companion document
    #[arg(long)]
    pub viewer: String,

    /// Overwrite an existing workspace
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Submitter email address
    #[arg(long)]
    pub email: String,

    /// One-line summary
    #[arg(long, default_value = "")]
    pub summary: String,

    /// Free-form details
    #[arg(long, default_value = "")]
    pub details: String,

    /// Why this matters
    #[arg(long, default_value = "")]
    pub reason: String,

    /// Severity label
    #[arg(long, default_value = "")]
    pub severity: String,

    /// Desired deadline (YYYY/MM/DD)
    #[arg(long)]
    pub deadline: Option<String>,

    /// Submission timestamp (YYYY/MM/DD HH:MM:SS); defaults to now
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Issue ID
    pub id: String,

    /// New status value
    pub status: String,
}

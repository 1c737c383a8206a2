//! Logging initialization.
//!
//! Diagnostics go through `tracing`; the host picks verbosity via the
//! `-v`/`-q` flags and `RUST_LOG` wins when set. Retention of emitted
//! logs is the subscriber's (i.e. the host environment's) concern.

use crate::error::Result;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber from CLI verbosity flags.
///
/// Quiet mode drops everything below errors; each `-v` raises the level
/// (`warn` → `info` → `debug`). An explicit `RUST_LOG` takes precedence.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("formtrack={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;

    Ok(())
}

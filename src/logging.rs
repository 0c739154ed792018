//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so in that mode log lines go to a file.
//! One-shot commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter directives, checked before `RUST_LOG`
pub const LOG_ENV: &str = "CDNMON_LOG";

/// Log file override for TUI mode
pub const LOG_FILE_ENV: &str = "CDNMON_LOG_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Where TUI logs are written
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(LOG_FILE_ENV)
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("cdnmon").join("cdnmon.log"))
}

/// Install the global subscriber. Returns the log file path in file mode.
pub fn init(target: LogTarget) -> Result<Option<PathBuf>> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter("warn"))
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow!(e))?;
            Ok(None)
        }
        LogTarget::File => {
            let path = log_file_path().context("no directory available for the log file")?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(env_filter("info"))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!(e))?;
            Ok(Some(path))
        }
    }
}

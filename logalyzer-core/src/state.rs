//! `TS_FILE` bookkeeping.
//!
//! The timestamp is written for outside monitoring (e.g. a cron freshness
//! check) and shown by `config check`. Whether a log still needs a report is
//! decided by the report file alone, never by this timestamp.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to write timestamp file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Completion time of the last successful run, if one was recorded.
///
/// A missing file means no run has completed yet. Unreadable contents are
/// treated the same way, with a warning.
pub fn load_last_processed(ts_file: &Path) -> Option<DateTime<Utc>> {
    let contents = fs::read_to_string(ts_file).ok()?;

    let parsed = contents
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    if parsed.is_none() {
        tracing::warn!(path = %ts_file.display(), "ignoring unreadable timestamp file");
    }
    parsed
}

/// Record `at` as the completion time of the last successful run.
pub fn save_last_processed(ts_file: &Path, at: DateTime<Utc>) -> Result<(), StateError> {
    let write_err = |e| StateError::Write {
        path: ts_file.to_path_buf(),
        source: e,
    };

    if let Some(parent) = ts_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    fs::write(ts_file, at.timestamp().to_string()).map_err(write_err)
}

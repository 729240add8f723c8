use crate::analysis::is_compressed;
use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("failed to list log directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A log file selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    /// Date embedded in the file name.
    pub date: NaiveDate,
    pub compressed: bool,
}

/// Find the log file with the most recent date in its name.
///
/// Only regular files (or symlinks to them) directly inside `log_dir` whose name matches `pattern`
/// are considered. Capture group 1 of the pattern must hold a `YYYYMMDD`
/// date; names with impossible dates are skipped. When two files carry the
/// same date the lexically greatest name wins, so the result does not depend
/// on directory listing order.
///
/// # Errors
///
/// Returns `DiscoverError::ReadDir` if the directory cannot be listed.
pub fn find_latest_log(log_dir: &Path, pattern: &Regex) -> Result<Option<LogFile>, DiscoverError> {
    let entries = fs::read_dir(log_dir).map_err(|e| DiscoverError::ReadDir {
        path: log_dir.to_path_buf(),
        source: e,
    })?;

    let mut latest: Option<(NaiveDate, String, PathBuf)> = None;

    for entry in entries.filter_map(Result::ok) {
        // Follows symlinks, so a linked log counts as a file.
        if !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        let Some(date) = match_log_date(name, pattern) else {
            continue;
        };

        let newer = latest
            .as_ref()
            .is_none_or(|(d, n, _)| (date, name) > (*d, n.as_str()));
        if newer {
            latest = Some((date, name.to_string(), entry.path()));
        }
    }

    Ok(latest.map(|(date, _, path)| LogFile {
        compressed: is_compressed(&path),
        path,
        date,
    }))
}

/// Date part of a log file name, if the name matches the pattern.
pub fn match_log_date(file_name: &str, pattern: &Regex) -> Option<NaiveDate> {
    let raw = pattern.captures(file_name)?.get(1)?.as_str();

    match NaiveDate::parse_from_str(raw, "%Y%m%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(file = file_name, date = raw, error = %e, "ignoring log file with invalid date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::{DEFAULT_LOG_FILE_PATTERN, log_file_regex};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn pattern() -> Regex {
        log_file_regex(DEFAULT_LOG_FILE_PATTERN).unwrap()
    }

    #[test]
    fn finds_latest_dated_file() {
        // Arrange
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("nginx-access-ui.log-20170101.gz"), "").unwrap();
        fs::write(root.join("nginx-access-ui.log-20170630"), "").unwrap();
        fs::write(root.join("nginx-access-ui.log-20170102.gz"), "").unwrap();

        // Act
        let result = find_latest_log(root, &pattern()).unwrap();

        // Assert
        assert_eq!(
            result,
            Some(LogFile {
                path: root.join("nginx-access-ui.log-20170630"),
                date: NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
                compressed: false,
            })
        );
    }

    #[test]
    fn flags_compressed_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("nginx-access-ui.log-20170101.gz"), "").unwrap();

        let result = find_latest_log(root, &pattern()).unwrap().unwrap();

        assert!(result.compressed);
    }

    #[test]
    fn ignores_non_matching_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("nginx-access-ui.log-20170101.gz"), "").unwrap();
        fs::write(root.join("nginx-access-ui.log-20991231.bz2"), "").unwrap();
        fs::write(root.join("nginx-access-api.log-20991231.gz"), "").unwrap();
        fs::create_dir(root.join("nginx-access-ui.log-20991231")).unwrap();

        let result = find_latest_log(root, &pattern()).unwrap().unwrap();

        assert_eq!(result.date, NaiveDate::from_ymd_opt(2017, 1, 1).unwrap());
    }

    #[test]
    fn skips_impossible_dates() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("nginx-access-ui.log-20170101"), "").unwrap();
        fs::write(root.join("nginx-access-ui.log-20171399"), "").unwrap();

        let result = find_latest_log(root, &pattern()).unwrap().unwrap();

        assert_eq!(result.path, root.join("nginx-access-ui.log-20170101"));
    }

    #[test]
    fn same_date_prefers_greatest_name() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("nginx-access-ui.log-20170101"), "").unwrap();
        fs::write(root.join("nginx-access-ui.log-20170101.gz"), "").unwrap();

        let result = find_latest_log(root, &pattern()).unwrap().unwrap();

        assert_eq!(result.path, root.join("nginx-access-ui.log-20170101.gz"));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_logs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let archive = tempdir().unwrap();
        let target = archive.path().join("access.log");

        fs::write(root.join("nginx-access-ui.log-20170101"), "").unwrap();
        fs::write(&target, "").unwrap();
        std::os::unix::fs::symlink(&target, root.join("nginx-access-ui.log-20170630")).unwrap();
        std::os::unix::fs::symlink(
            archive.path().join("missing"),
            root.join("nginx-access-ui.log-20991231"),
        )
        .unwrap();

        let result = find_latest_log(root, &pattern()).unwrap().unwrap();

        assert_eq!(result.path, root.join("nginx-access-ui.log-20170630"));
    }

    #[test]
    fn empty_directory_has_no_log() {
        let dir = tempdir().unwrap();

        assert_eq!(find_latest_log(dir.path(), &pattern()).unwrap(), None);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();

        let result = find_latest_log(&dir.path().join("missing"), &pattern());

        assert!(matches!(result, Err(DiscoverError::ReadDir { .. })));
    }
}

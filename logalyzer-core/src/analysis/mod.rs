//! Access Log Analysis Pipeline
//!
//! Reads one nginx access log (plain or gzip) and reduces it to a ranked
//! per-url response time report.
//!
//! Lines are pulled one at a time, so memory grows with the number of distinct
//! urls and their samples, never with the size of the file. A line that cannot
//! be decoded or parsed is counted and dropped; once the whole file has been
//! read the failure ratio decides whether the report is trustworthy at all.
//!
//! The overall data processing architecture is:
//!
//! LineSource
//! parse_line
//! ParseOutcome
//! Aggregator
//! Aggregation
//! build_report
//! ReportRow
//!

mod aggregate;
mod parse;
mod report;
mod source;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{
    Aggregation, Aggregator, FormatError, RunTotals, UrlAccumulator, UrlMap, aggregate,
};
pub use parse::parse_line;
pub use report::{DEFAULT_REPORT_SIZE, ReportRow, build_report, median};
pub use source::{LineSource, RawLine, is_compressed};
pub use types::{ParseError, ParseOutcome, ParsedLine};

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAX_ERROR_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeOptions {
    /// Maximum number of report rows.
    pub limit: usize,
    /// Largest tolerated fraction of unparsable lines, in `[0, 1]`.
    pub max_error_ratio: f64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_REPORT_SIZE,
            max_error_ratio: DEFAULT_MAX_ERROR_RATIO,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unusable log file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl AnalyzeError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } | Self::Format { path, .. } => path,
        }
    }
}

/// Aggregate a whole log file without building the report.
pub fn aggregate_file(path: &Path, max_error_ratio: f64) -> Result<Aggregation, AnalyzeError> {
    let source = LineSource::open(path).map_err(|e| AnalyzeError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %source.path().display(), compressed = is_compressed(path), "start processing");

    let mut aggregator = Aggregator::new();
    for line in source {
        let line = line.map_err(|e| AnalyzeError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        aggregator.push(line.and_then(|text| parse_line(&text)));
    }

    aggregator
        .finish(max_error_ratio)
        .map_err(|e| AnalyzeError::Format {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Analyze one log file end to end: read, parse, aggregate, rank.
pub fn analyze_file(path: &Path, options: &AnalyzeOptions) -> Result<Vec<ReportRow>, AnalyzeError> {
    let aggregation = aggregate_file(path, options.max_error_ratio)?;
    let rows = build_report(&aggregation, options.limit);

    tracing::info!(rows = rows.len(), "report built");
    Ok(rows)
}

use crate::analysis::analyze_file;
use crate::conf::{AnalyzerConfig, log_file_regex};
use crate::discover::find_latest_log;
use crate::render::{load_template, render_report, report_path, write_report};
use crate::state::save_last_processed;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// `LOG_DIR` holds no file matching `LOG_FILE_PATTERN`.
    NoLogs,
    /// The latest log already has a report.
    AlreadyReported { report: PathBuf },
    Reported { report: PathBuf, rows: usize },
}

/// Build the report for the most recent log in `LOG_DIR`.
///
/// Nothing is written unless the whole file was analyzed successfully: a
/// failed run leaves neither a report nor an updated timestamp behind.
pub fn run(config: &AnalyzerConfig) -> Result<RunOutcome> {
    let pattern = log_file_regex(&config.log_file_pattern)?;

    let Some(log) = find_latest_log(&config.log_dir, &pattern)? else {
        tracing::info!(dir = %config.log_dir.display(), "no log files found");
        return Ok(RunOutcome::NoLogs);
    };

    let report = report_path(&config.report_dir, log.date);
    if report.exists() {
        tracing::info!(log = %log.path.display(), report = %report.display(), "log already processed");
        return Ok(RunOutcome::AlreadyReported { report });
    }

    let rows = analyze_file(&log.path, &config.analyze_options())
        .with_context(|| format!("failed to analyze {}", log.path.display()))?;

    let template = load_template(config.report_template.as_deref())?;
    let html = render_report(&rows, &template)?;
    let report = write_report(&config.report_dir, log.date, &html)?;

    tracing::info!(report = %report.display(), rows = rows.len(), "report written");

    save_last_processed(&config.ts_file, Utc::now())?;

    Ok(RunOutcome::Reported {
        report,
        rows: rows.len(),
    })
}

use crate::analysis::{AnalyzeOptions, DEFAULT_MAX_ERROR_RATIO, DEFAULT_REPORT_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE_PATTERN: &str = r"^nginx-access-ui\.log-(\d{8})(\.gz)?$";

/// Analyzer settings. Every key is optional in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Maximum number of rows in a report.
    pub report_size: usize,

    pub report_dir: PathBuf,

    /// HTML template with a `$table_json` placeholder. The built-in template is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_template: Option<PathBuf>,

    pub log_dir: PathBuf,

    /// Regex matched against file names in `LOG_DIR`. Group 1 must capture a `YYYYMMDD` date.
    pub log_file_pattern: String,

    /// Largest tolerated fraction of unparsable lines.
    pub parse_error_perc_max: f64,

    /// Where the completion timestamp of the last successful run is kept.
    pub ts_file: PathBuf,

    /// Log to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_log: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            report_size: DEFAULT_REPORT_SIZE,
            report_dir: PathBuf::from("./reports"),
            report_template: None,
            log_dir: PathBuf::from("./log"),
            log_file_pattern: DEFAULT_LOG_FILE_PATTERN.to_string(),
            parse_error_perc_max: DEFAULT_MAX_ERROR_RATIO,
            ts_file: PathBuf::from("./logalyzer.ts"),
            process_log: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            limit: self.report_size,
            max_error_ratio: self.parse_error_perc_max,
        }
    }
}

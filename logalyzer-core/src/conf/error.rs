use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    //-------------------------------------------------------------------------
    // Parsing
    //-------------------------------------------------------------------------
    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    //-------------------------------------------------------------------------
    // Values
    //-------------------------------------------------------------------------
    #[error("REPORT_SIZE must be between {min} and {max}, got {value}")]
    #[diagnostic(code(config::report_size))]
    InvalidReportSize { value: usize, min: usize, max: usize },

    #[error("PARSE_ERROR_PERC_MAX must be between 0 and 1, got {value}")]
    #[diagnostic(code(config::parse_error_perc_max))]
    InvalidErrorRatio { value: f64 },

    #[error("invalid LOG_FILE_PATTERN '{pattern}': {source}")]
    #[diagnostic(code(config::log_file_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("LOG_FILE_PATTERN '{pattern}' has no capture group for the log date")]
    #[diagnostic(code(config::log_file_pattern))]
    PatternWithoutDate { pattern: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

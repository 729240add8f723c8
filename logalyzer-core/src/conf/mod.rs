mod error;
mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    REPORT_SIZE_MAX, REPORT_SIZE_MIN, load_config, load_config_or_default, log_file_regex,
    parse_config, validate_config,
};
pub use types::{AnalyzerConfig, DEFAULT_LOG_FILE_PATTERN};

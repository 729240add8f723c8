use crate::conf::error::ConfigError;
use crate::conf::types::AnalyzerConfig;
use regex::Regex;
use std::fs;
use std::path::Path;

pub const REPORT_SIZE_MIN: usize = 1;
pub const REPORT_SIZE_MAX: usize = 1_000_000;

/// Load, parse and validate a TOML config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config = parse_config(path, &contents)?;

    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Config from an optional file path; no path means all defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<AnalyzerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = AnalyzerConfig::default();
            validate_config(&config)?;
            Ok(config)
        }
    }
}

pub fn parse_config(path: &Path, contents: &str) -> Result<AnalyzerConfig, ConfigError> {
    let config: AnalyzerConfig =
        toml::from_str(contents).map_err(|e| ConfigError::parse(path, e))?;

    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    if !(REPORT_SIZE_MIN..=REPORT_SIZE_MAX).contains(&config.report_size) {
        return Err(ConfigError::InvalidReportSize {
            value: config.report_size,
            min: REPORT_SIZE_MIN,
            max: REPORT_SIZE_MAX,
        });
    }

    if !(0.0..=1.0).contains(&config.parse_error_perc_max) {
        return Err(ConfigError::InvalidErrorRatio {
            value: config.parse_error_perc_max,
        });
    }

    log_file_regex(&config.log_file_pattern)?;
    Ok(())
}

/// Compile `LOG_FILE_PATTERN`, requiring a capture group for the date.
pub fn log_file_regex(pattern: &str) -> Result<Regex, ConfigError> {
    let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() < 2 {
        return Err(ConfigError::PatternWithoutDate {
            pattern: pattern.to_string(),
        });
    }

    Ok(regex)
}

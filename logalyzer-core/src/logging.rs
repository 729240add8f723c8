use anyhow::{Context, Result};
use std::io::{self, IsTerminal};
use std::path::Path;
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Human-readable output on a terminal, JSON everywhere else.
pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Initialize the logging system with environment-based filtering
///
/// - Uses `RUST_LOG` for level filtering (defaults to "info" if not set)
/// - Writes to `process_log` when given, otherwise to stderr
/// - JSON output flattens event fields for cleaner log lines
///
/// The returned guard flushes buffered file output on drop and must be kept
/// alive for as long as the process logs.
pub fn init_logging(process_log: Option<&Path>, format: LogFormat) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = process_log else {
        let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
        match format {
            LogFormat::Json => builder.json().flatten_event(true).init(),
            LogFormat::Pretty => builder.init(),
        }
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("invalid PROCESS_LOG path {}", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);
    match format {
        LogFormat::Json => builder.json().flatten_event(true).init(),
        LogFormat::Pretty => builder.init(),
    }

    Ok(Some(guard))
}

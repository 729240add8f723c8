use clap::{Parser, Subcommand};
use logalyzer_core::app::{self, RunOutcome};
use logalyzer_core::cli;
use logalyzer_core::conf::load_config_or_default;
use logalyzer_core::logging::{WorkerGuard, default_log_format, init_logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "logalyzer",
    version,
    about = "Logalyzer: per-url response time reports from nginx access logs"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report on the latest log in LOG_DIR (default)
    Run {
        /// Path to the config file; defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Analyze a single log file and print the rows as JSON
    Analyze(cli::analyze::AnalyzeArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Analyze(args)) => {
            let _guard = match start_logging(None) {
                Ok(guard) => guard,
                Err(code) => return code,
            };

            if let Err(e) = cli::analyze::run(args) {
                tracing::error!(error = %format!("{e:#}"), "analysis failed");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }

        Some(Command::Config { cmd }) => match cli::conf::run(cmd) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("config error: {e:#}");
                ExitCode::FAILURE
            }
        },

        Some(Command::Run { config }) => run(config),

        None => run(None),
    }
}

fn run(config: Option<PathBuf>) -> ExitCode {
    let cfg = match load_config_or_default(config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Held until return so buffered file output is flushed.
    let _guard = match start_logging(cfg.process_log.as_deref()) {
        Ok(guard) => guard,
        Err(code) => return code,
    };

    match app::run(&cfg) {
        Ok(RunOutcome::Reported { report, rows }) => {
            tracing::info!(report = %report.display(), rows, "done");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::AlreadyReported { report }) => {
            tracing::info!(report = %report.display(), "nothing to do");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoLogs) => {
            tracing::info!("nothing to do");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "run failed");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(process_log: Option<&Path>) -> Result<Option<WorkerGuard>, ExitCode> {
    init_logging(process_log, default_log_format()).map_err(|e| {
        eprintln!("logging error: {e:#}");
        ExitCode::FAILURE
    })
}

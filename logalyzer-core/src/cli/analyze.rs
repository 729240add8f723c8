use crate::analysis::{AnalyzeOptions, DEFAULT_MAX_ERROR_RATIO, DEFAULT_REPORT_SIZE, analyze_file};
use anyhow::{Result, bail};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Access log to analyze (`.gz` files are decompressed)
    pub file: PathBuf,

    /// Maximum number of report rows
    #[arg(long, default_value_t = DEFAULT_REPORT_SIZE)]
    pub limit: usize,

    /// Largest tolerated fraction of unparsable lines
    #[arg(long, default_value_t = DEFAULT_MAX_ERROR_RATIO)]
    pub max_error_ratio: f64,

    /// Pretty-print the JSON rows
    #[arg(long)]
    pub pretty: bool,
}

/// Analyze a single file and print its rows as JSON on stdout.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    if !(0.0..=1.0).contains(&args.max_error_ratio) {
        bail!(
            "--max-error-ratio must be between 0 and 1, got {}",
            args.max_error_ratio
        );
    }

    let options = AnalyzeOptions {
        limit: args.limit,
        max_error_ratio: args.max_error_ratio,
    };
    let rows = analyze_file(&args.file, &options)?;

    let mut out = io::stdout().lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &rows)?;
    } else {
        serde_json::to_writer(&mut out, &rows)?;
    }
    writeln!(out)?;

    Ok(())
}

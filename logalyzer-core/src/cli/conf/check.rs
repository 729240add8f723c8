use crate::conf::{ConfigError, REPORT_SIZE_MAX, load_config_or_default};
use crate::state::load_last_processed;
use miette::Report;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Validate the config at `path`, or the built-in defaults when no path is given.
pub fn check(path: Option<PathBuf>, plain: bool) -> anyhow::Result<()> {
    match load_config_or_default(path.as_deref()) {
        Ok(cfg) => {
            println!("{} Config loaded successfully", "✔".green());
            println!("{} report size {}", "✔".green(), cfg.report_size);
            println!(
                "{} max unparsable lines {:.1}%",
                "✔".green(),
                cfg.parse_error_perc_max * 100.0
            );
            println!(
                "{} logs {} matching {}",
                "✔".green(),
                cfg.log_dir.display(),
                cfg.log_file_pattern
            );
            match &cfg.report_template {
                Some(template) => println!("{} template {}", "✔".green(), template.display()),
                None => println!("{} built-in template", "✔".green()),
            }
            match load_last_processed(&cfg.ts_file) {
                Some(at) => println!("{} last report {}", "✔".green(), at.to_rfc3339()),
                None => println!("{} no report yet", "✔".green()),
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: ConfigError, plain: bool) {
    let hint = config_error_hint(&err);
    if plain {
        eprintln!("{}", err);
    } else {
        eprintln!();
        eprintln!("{:?}", Report::new(err));
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<String> {
    match err {
        ConfigError::InvalidReportSize { .. } => Some(format!(
            "REPORT_SIZE is the number of urls kept in the report.\n\
             \n\
             Use a value between 1 and {REPORT_SIZE_MAX}, for example:\n\
             \n\
             REPORT_SIZE = 1000"
        )),

        ConfigError::InvalidErrorRatio { .. } => Some(
            "PARSE_ERROR_PERC_MAX is a fraction, not a percentage.\n\
             \n\
             Example (tolerate up to 20% unparsable lines):\n\
             \n\
             PARSE_ERROR_PERC_MAX = 0.2"
                .to_string(),
        ),

        ConfigError::PatternWithoutDate { .. } => Some(
            "The first capture group of LOG_FILE_PATTERN must match the YYYYMMDD date.\n\
             \n\
             Example:\n\
             \n\
             LOG_FILE_PATTERN = '^nginx-access-ui\\.log-(\\d{8})(\\.gz)?$'"
                .to_string(),
        ),

        _ => None,
    }
}

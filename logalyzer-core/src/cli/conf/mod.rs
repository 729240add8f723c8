mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print errors without diagnostics formatting
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration, defaults included
    Dump {
        /// Path to the config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { config, plain } => check(config, plain),
        ConfigCmd::Dump { config, json, yaml } => dump(config, json, yaml),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct ConfigCli {
        #[command(subcommand)]
        cmd: ConfigCmd,
    }

    #[test]
    fn check_without_config_uses_defaults() {
        let cli = ConfigCli::try_parse_from(["config", "check", "--plain"]).unwrap();

        assert!(matches!(
            cli.cmd,
            ConfigCmd::Check {
                config: None,
                plain: true
            }
        ));
        assert!(run(cli.cmd).is_ok());
    }

    #[test]
    fn check_and_dump_take_the_same_config_flag() {
        let check = ConfigCli::try_parse_from(["config", "check", "--config", "a.toml"]).unwrap();
        let dump = ConfigCli::try_parse_from(["config", "dump", "--config", "a.toml"]).unwrap();

        let expected = PathBuf::from("a.toml");
        assert!(matches!(check.cmd, ConfigCmd::Check { config: Some(ref p), .. } if *p == expected));
        assert!(matches!(dump.cmd, ConfigCmd::Dump { config: Some(ref p), .. } if *p == expected));
    }
}

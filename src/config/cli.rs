//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use super::settings::{Config, DEFAULT_EXTENSION, DEFAULT_POLLING_SECS};

/// Watches a directory for files and reports lines containing magic text
#[derive(Parser, Debug)]
#[command(name = "dirwatcher")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Text to search for in the watched files
    pub magic_text: String,

    /// Directory to watch
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Only track files with this extension (no leading dot, empty for all files)
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Polling interval in seconds
    #[arg(
        short,
        long = "polling_time",
        alias = "polling-time",
        value_name = "SECONDS",
        default_value_t = DEFAULT_POLLING_SECS,
        allow_negative_numbers = true
    )]
    pub polling_time: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DIRWATCHER_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "DIRWATCHER_LOG_JSON")]
    pub log_json: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            dir: cli.dir,
            magic: cli.magic_text,
            extension: cli.extension,
            polling_secs: cli.polling_time,
            log_level: cli.log_level,
            log_json: cli.log_json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["dirwatcher", "MAGIC", "-d", "/tmp/watch"]).unwrap();
        assert_eq!(cli.magic_text, "MAGIC");
        assert_eq!(cli.dir, PathBuf::from("/tmp/watch"));
        assert_eq!(cli.extension, "txt");
        assert!((cli.polling_time - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_long_options() {
        let cli = Cli::try_parse_from([
            "dirwatcher",
            "needle",
            "--dir",
            "logs",
            "--extension",
            "log",
            "--polling_time",
            "0.25",
        ])
        .unwrap();
        assert_eq!(cli.dir, PathBuf::from("logs"));
        assert_eq!(cli.extension, "log");
        assert!((cli.polling_time - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_polling_time_alias() {
        let cli =
            Cli::try_parse_from(["dirwatcher", "x", "-d", ".", "--polling-time", "2"]).unwrap();
        assert!((cli.polling_time - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_empty_extension() {
        let cli = Cli::try_parse_from(["dirwatcher", "x", "-d", ".", "-e", ""]).unwrap();
        assert!(cli.extension.is_empty());
    }

    #[test]
    fn test_cli_no_args_shows_help() {
        let err = Cli::try_parse_from(["dirwatcher"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_cli_missing_dir() {
        let err = Cli::try_parse_from(["dirwatcher", "MAGIC"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_invalid_polling_time() {
        let err =
            Cli::try_parse_from(["dirwatcher", "x", "-d", ".", "-p", "soon"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_negative_polling_time_rejected_by_config() {
        let cli = Cli::try_parse_from(["dirwatcher", "x", "-d", ".", "-p", "-1"]).unwrap();
        let config = Config::from(cli);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_into_config() {
        let cli = Cli::try_parse_from(["dirwatcher", "MAGIC", "-d", "/srv", "-p", "0.1"]).unwrap();
        let config = Config::from(cli);
        assert_eq!(config.magic, "MAGIC");
        assert_eq!(config.dir, PathBuf::from("/srv"));
        assert!(config.validate().is_ok());
    }
}

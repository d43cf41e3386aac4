//! Command line arguments

use bridge_traits::time::LogLevel;
use clap::Parser;
use core_runtime::logging::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mp3sync",
    version,
    about = "Sync an mp3 library into a tag-named destination tree"
)]
pub struct Args {
    /// Path of the JSON configuration file
    #[arg(short, long, default_value = "config.json", env = "MP3SYNC_CONFIG")]
    pub config: PathBuf,

    /// Minimum level of diagnostic logs written to stderr
    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,

    /// Diagnostic log format: pretty, json or compact
    #[arg(long, default_value = "compact")]
    pub log_format: LogFormat,

    /// Answer every prompt with yes
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Directory for error logs, overriding the config file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["mp3sync"]);
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.log_level, LogLevel::Warn);
        assert_eq!(args.log_format, LogFormat::Compact);
        assert!(!args.yes);
        assert!(args.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "mp3sync",
            "--config",
            "/etc/mp3sync.json",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--yes",
            "--log-dir",
            "/var/log/mp3sync",
        ]);
        assert_eq!(args.config, PathBuf::from("/etc/mp3sync.json"));
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(args.yes);
        assert_eq!(args.log_dir, Some(PathBuf::from("/var/log/mp3sync")));
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Args::try_parse_from(["mp3sync", "--log-level", "loud"]).is_err());
    }
}

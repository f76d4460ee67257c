//! Command line for the `desk_report` binary

use crate::config::DeskConfig;
use crate::Result;
use clap::Parser;
use std::path::PathBuf;

/// Run a batch of calculator requests through the desk and print the results.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "desk_report")]
#[command(about = "Run forex calculator requests and report the outcomes", long_about = None)]
pub struct ReportArgs {
    /// JSON array of calculator requests (a built-in sample batch when omitted)
    #[arg(help = "Path to a JSON file of calculator requests")]
    pub requests: Option<PathBuf>,

    /// Desk config file; overrides FX_DESK_CONFIG
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ReportArgs {
    /// Config from `--config`, falling back to the environment
    pub fn desk_config(&self) -> Result<DeskConfig> {
        match &self.config {
            Some(path) => DeskConfig::from_file(path),
            None => DeskConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_arguments() {
        let args = ReportArgs::try_parse_from(["desk_report"]).unwrap();
        assert!(args.requests.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_requests_and_config() {
        let args =
            ReportArgs::try_parse_from(["desk_report", "batch.json", "--config", "desk.json"])
                .unwrap();
        assert_eq!(args.requests, Some(PathBuf::from("batch.json")));
        assert_eq!(args.config, Some(PathBuf::from("desk.json")));
    }

    #[test]
    fn test_help_is_not_a_requests_file() {
        let err = ReportArgs::try_parse_from(["desk_report", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_config_flag_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_pair": "AUD/NZD", "account_currency": "GBP"}}"#).unwrap();

        let args = ReportArgs {
            requests: None,
            config: Some(file.path().to_path_buf()),
        };
        let config = args.desk_config().unwrap();
        assert_eq!(config.default_pair.symbol(), "AUD/NZD");
        assert_eq!(config.account_currency, "GBP");
    }
}

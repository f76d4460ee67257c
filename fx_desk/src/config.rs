//! Desk configuration

use crate::{DeskError, Result};
use fx_math::Instrument;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "FX_DESK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Pair selected when no preferences have been saved
    pub default_pair: Instrument,
    /// Currency pip values are reported in
    pub account_currency: String,
    /// Where preferences are persisted, if anywhere
    pub preferences_path: Option<PathBuf>,
    /// Rate snapshot to load at start-up
    pub rates_path: Option<PathBuf>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            default_pair: Instrument::default(),
            account_currency: "USD".to_string(),
            preferences_path: None,
            rates_path: None,
        }
    }
}

impl DeskConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: DeskConfig = serde_json::from_str(&contents).map_err(|e| {
            DeskError::Config(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `FX_DESK_CONFIG`, or use defaults when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!("Loading desk config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        let currency = self.account_currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DeskError::Config(format!(
                "Account currency must be a three letter code, got '{}'",
                self.account_currency
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.default_pair.symbol(), "EUR/USD");
        assert_eq!(config.account_currency, "USD");
        assert!(config.preferences_path.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_pair": "GBP/JPY"}}"#).unwrap();

        let config = DeskConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_pair.symbol(), "GBP/JPY");
        assert_eq!(config.account_currency, "USD");
    }

    #[test]
    fn test_bad_config_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"account_currency": "DOLLARS"}}"#).unwrap();
        assert!(matches!(
            DeskConfig::from_file(file.path()),
            Err(DeskError::Config(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_pair": "not a pair"}}"#).unwrap();
        assert!(matches!(
            DeskConfig::from_file(file.path()),
            Err(DeskError::Config(_))
        ));
    }
}

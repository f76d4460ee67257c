//! Persisted UI preferences

use crate::stats::UsageStats;
use crate::Result;
use fx_math::Instrument;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What survives between sessions: the selected pair and usage counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub selected_pair: Instrument,
    pub stats: UsageStats,
}

impl Preferences {
    /// Load preferences, or defaults when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No preferences at {}, starting fresh", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("Saved preferences to {}", path.display());
        Ok(())
    }
}

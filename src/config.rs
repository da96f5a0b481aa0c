use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Tool settings persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Tempo the recording client runs at, in beats per minute.
    pub bpm: f64,
    /// Number of buckets in the delta histogram.
    pub histogram_buckets: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bpm: 138.0,
            histogram_buckets: 24,
        }
    }
}

impl Settings {
    /// Half a beat interval in seconds: the widest delta the client can
    /// emit. Requires a positive bpm.
    pub fn max_delta(&self) -> f64 {
        (60.0 / self.bpm) / 2.0
    }

    /// Load settings from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_file().unwrap_or_default()
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::settings_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn settings_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("io", "offbeat", "offbeat") {
            Ok(proj_dirs.config_dir().join("settings.json"))
        } else {
            Ok(PathBuf::from(".offbeat-settings.json"))
        }
    }
}

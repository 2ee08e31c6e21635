// libs/calendar-cell/src/preferences.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::ViewPreferences;

/// Local key-value collaborator persisting the view settings under a
/// fixed key. A failed load is not fatal; callers fall back to defaults.
pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> Option<ViewPreferences>;
    fn save(&self, preferences: &ViewPreferences) -> Result<()>;
}

/// Reference implementation writing a single JSON document to disk.
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.preferences_path.clone())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn load(&self) -> Option<ViewPreferences> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(preferences) => {
                debug!("Loaded calendar preferences from {}", self.path.display());
                Some(preferences)
            }
            Err(e) => {
                warn!("Discarding unreadable calendar preferences: {}", e);
                None
            }
        }
    }

    fn save(&self, preferences: &ViewPreferences) -> Result<()> {
        let raw = serde_json::to_string_pretty(preferences)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing calendar preferences to {}", self.path.display()))
    }
}

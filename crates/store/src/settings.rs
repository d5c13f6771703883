//! Governance settings
//!
//! Settings are kept as `settings.json` in the data directory and loaded with
//! defaults when the file is missing or unreadable.

use crate::Result;
use governance_model::UserId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.json";

/// Settings consulted by the coordinator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceSettings {
    /// Actors that bypass ACL checks on every document
    #[serde(default)]
    pub superusers: Vec<UserId>,
}

impl GovernanceSettings {
    pub fn with_superuser(mut self, user: impl Into<UserId>) -> Self {
        let user = user.into();
        if !self.superusers.contains(&user) {
            self.superusers.push(user);
        }
        self
    }

    pub fn is_superuser(&self, user: &UserId) -> bool {
        self.superusers.contains(user)
    }
}

/// Settings manager for loading, saving, and updating governance settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: GovernanceSettings,
}

impl SettingsManager {
    /// Create a new settings manager for the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join(SETTINGS_FILE),
            current: GovernanceSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, or fall back to defaults
    pub fn load(&mut self) -> Result<&GovernanceSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<GovernanceSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.settings_path.display(),
                        "Failed to parse settings file, using defaults: {}",
                        e
                    );
                    self.current = GovernanceSettings::default();
                }
            }
        } else {
            self.current = GovernanceSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn settings(&self) -> &GovernanceSettings {
        &self.current
    }

    /// Replace the cached settings. Call [`SettingsManager::save`] to persist.
    pub fn update(&mut self, settings: GovernanceSettings) {
        self.current = settings;
    }
}

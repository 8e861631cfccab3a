// src/core/settings.rs

use crate::constants::DEFAULT_HISTORY_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("Failed to serialize settings to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

type SettingsResult<T> = Result<T, SettingsError>;

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

/// User-tunable options, stored as `settings.toml` in the config directory.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Capacity of the recency-ordered history list.
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file is not an error: defaults
    /// are returned so first runs work without any setup.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            log::debug!("No settings file at '{}', using defaults.", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Writes the settings back to `path` unchanged. Used by the "edit
    /// configuration" action so the file exists with the effective values
    /// before the host opens it for the user.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings.history_size, DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings { history_size: 7 };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "# empty\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.history_size, DEFAULT_HISTORY_SIZE);
    }
}

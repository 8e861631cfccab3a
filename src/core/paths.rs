// src/core/paths.rs

use crate::constants::{HISTORY_FILENAME, SETTINGS_FILENAME};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref CMDHIST_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns the path to the cmdhist configuration directory
/// (`~/.config/cmdhist`), creating it if it doesn't exist.
///
/// Memoized: the first call computes and caches the path, subsequent calls
/// return the cached value instantly.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached = CMDHIST_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join("cmdhist");

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached = Some(config_path.clone());
    Ok(config_path)
}

/// Returns the path to the persisted ledger file.
pub fn get_history_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(HISTORY_FILENAME))
}

/// Returns the path to the settings file.
pub fn get_settings_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(SETTINGS_FILENAME))
}

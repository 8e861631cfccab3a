// src/cli/handlers/mod.rs

pub mod config;
pub mod scan;
pub mod show;

use crate::core::paths;
use crate::core::session::Session;
use crate::core::settings::Settings;
use crate::host::term::FileHost;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Builds a file-backed session: settings and the persisted ledger come from
/// the config directory, registry and log from the given paths.
pub fn open_session(registry: PathBuf, log: PathBuf, pin: bool) -> Result<Session<FileHost>> {
    let settings = load_settings()?;
    let history_path = paths::get_history_path()?;
    let host = FileHost::new(registry, log, pin);
    Session::new(host, &settings, history_path).context("Failed to restore command history")
}

pub fn load_settings() -> Result<Settings> {
    let path = paths::get_settings_path()?;
    match Settings::load(&path) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            // A broken settings file degrades to defaults instead of
            // blocking the whole tool.
            log::error!("Could not read '{}': {}. Using defaults.", path.display(), e);
            Ok(Settings::default())
        }
    }
}

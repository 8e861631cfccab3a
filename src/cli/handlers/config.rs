// src/cli/handlers/config.rs

use crate::core::paths;
use anyhow::{Context, Result};

/// Re-saves the effective settings unchanged and prints where they live, so
/// the user can open and edit the file.
pub fn handle() -> Result<()> {
    let settings = super::load_settings()?;
    let path = paths::get_settings_path()?;
    settings
        .save(&path)
        .with_context(|| format!("Failed to write settings to '{}'", path.display()))?;
    println!("history_size = {}", settings.history_size);
    println!("{}", path.display());
    Ok(())
}

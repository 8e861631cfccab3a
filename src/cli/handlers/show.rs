// src/cli/handlers/show.rs

use anyhow::Result;
use std::path::PathBuf;

/// Scans for new log activity, runs the picker, and persists the ledger.
pub fn handle(registry: PathBuf, log: PathBuf, pin: bool) -> Result<()> {
    let mut session = super::open_session(registry, log, pin)?;
    session.show_picker()?;
    session.shutdown();
    Ok(())
}

// src/core/codec.rs

//! Flat-text persistence for the ledger.
//!
//! One entry per line: pinned entries first, each prefixed with `pinned:`,
//! then history entries oldest→newest. Entries are written by display name,
//! never by numeric id. Ids are not stable across host restarts and plugin
//! reloads, names are the portable identity.
//!
//! On load, every name is resolved back to an id opportunistically; names
//! the current registry doesn't know round-trip verbatim as `ByName` so a
//! user's history survives a providing plugin that isn't loaded yet.

use crate::constants::PINNED_PREFIX;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::host::Host;
use crate::models::CommandRef;
use anyhow::Result;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads the persisted ledger from `path`. A missing or empty file yields an
/// empty ledger; that is not an error.
pub fn load<H: Host>(
    host: &H,
    directory: &mut Directory,
    path: &Path,
    capacity: usize,
) -> Result<Ledger> {
    if !path.exists() {
        log::debug!("No persisted history at '{}'.", path.display());
        return Ok(Ledger::new(capacity));
    }

    let raw = fs::read_to_string(path).map_err(PersistError::Io)?;
    let mut history = Vec::new();
    let mut pinned = Vec::new();

    for line in raw.lines() {
        let (is_pinned, name) = match line.strip_prefix(PINNED_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let name = name.trim_end();
        if name.is_empty() {
            continue;
        }

        // Resolve opportunistically: a known name becomes an id, an unknown
        // one is kept verbatim and may heal later.
        let r = match directory.resolve_by_name(host, name)? {
            Some(info) => CommandRef::ById(info.id),
            None => CommandRef::ByName(name.to_string()),
        };
        if is_pinned {
            pinned.push(r);
        } else {
            history.push(r);
        }
    }

    Ok(Ledger::from_parts(history, pinned, capacity))
}

/// Serializes the ledger, resolving every ref to a display name. Refs whose
/// name cannot be resolved are dropped: stale or uninstalled commands are not
/// persisted. Returns `None` when nothing remains to write.
pub fn encode<H: Host>(host: &H, directory: &mut Directory, ledger: &Ledger) -> Result<Option<String>> {
    let mut lines = Vec::new();

    for r in ledger.pinned() {
        if let Some(name) = ref_name(host, directory, r)? {
            lines.push(format!("{}{}", PINNED_PREFIX, name));
        }
    }
    for r in ledger.history() {
        if let Some(name) = ref_name(host, directory, r)? {
            lines.push(name);
        }
    }

    if lines.is_empty() {
        return Ok(None);
    }
    lines.push(String::new()); // trailing newline
    Ok(Some(lines.join("\n")))
}

/// Saves the ledger to `path`. Nothing is written when the ledger is empty
/// or no entry resolves to a name.
pub fn save<H: Host>(
    host: &H,
    directory: &mut Directory,
    ledger: &Ledger,
    path: &Path,
) -> Result<()> {
    if ledger.is_empty() {
        log::debug!("Ledger empty, skipping save.");
        return Ok(());
    }
    match encode(host, directory, ledger)? {
        Some(text) => {
            fs::write(path, text).map_err(PersistError::Io)?;
            Ok(())
        }
        None => {
            log::debug!("No resolvable entries, skipping save.");
            Ok(())
        }
    }
}

fn ref_name<H: Host>(host: &H, directory: &mut Directory, r: &CommandRef) -> Result<Option<String>> {
    match r {
        CommandRef::ById(id) => directory.resolve_by_id(host, *id),
        CommandRef::ByName(name) => Ok(Some(name.clone())),
    }
}

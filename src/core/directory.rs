// src/core/directory.rs

//! Memoized lookups against the host's command registry.
//!
//! The registry snapshot is fetched lazily through [`Host::commands`], held
//! for the duration of one ledger operation, and must be discarded afterwards
//! via [`Directory::invalidate_snapshot`]; the host's set of registered
//! commands can change between operations (plugins load and unload).
//!
//! Each lookup cache is capped at [`CACHE_CAP`] keys. On overflow the whole
//! cache is cleared before inserting the new entry; misses are rare in steady
//! state, so the coarse policy is adequate. Negative results are memoized
//! too, keeping repeated misses O(1).

use crate::constants::CACHE_CAP;
use crate::host::Host;
use crate::models::{CommandId, CommandInfo};
use anyhow::Result;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Directory {
    snapshot: Option<Vec<CommandInfo>>,
    id_names: HashMap<CommandId, Option<String>>,
    modmeth_ids: HashMap<(String, String), Option<CommandId>>,
    menu_path_names: HashMap<String, Option<String>>,
}

/// Display name for a registry entry, with the fallbacks applied for
/// commands that exist but carry an empty name.
fn entry_display_name(info: &CommandInfo) -> Option<String> {
    let name = info.name.as_ref()?;
    if !name.is_empty() {
        return Some(name.clone());
    }
    match (&info.module, &info.method) {
        (Some(module), Some(method)) if !module.is_empty() && !method.is_empty() => {
            Some(format!("{}.{}", module, method))
        }
        _ => Some(format!("Unnamed command: {}", info.id)),
    }
}

/// Clears `cache` wholesale once the key cap is hit, before the caller
/// inserts a new entry. Deliberately not an LRU.
fn make_room<K, V>(cache: &mut HashMap<K, V>) {
    if cache.len() >= CACHE_CAP {
        log::debug!("Lookup cache hit {} entries, clearing.", cache.len());
        cache.clear();
    }
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the registry snapshot. Must be called at the end of every
    /// externally-triggered ledger operation; the memoized lookup caches
    /// survive, the snapshot does not.
    pub fn invalidate_snapshot(&mut self) {
        self.snapshot = None;
    }

    fn snapshot<H: Host>(&mut self, host: &H) -> Result<&[CommandInfo]> {
        if self.snapshot.is_none() {
            let commands = host.commands()?;
            log::debug!("Fetched registry snapshot: {} commands.", commands.len());
            self.snapshot = Some(commands);
        }
        // The branch above guarantees the slot is filled.
        Ok(self.snapshot.as_deref().unwrap_or_default())
    }

    /// Resolves a numeric id to a display name. `None` means the id is not
    /// (or no longer) registered; that outcome is memoized as well.
    pub fn resolve_by_id<H: Host>(&mut self, host: &H, id: CommandId) -> Result<Option<String>> {
        if let Some(cached) = self.id_names.get(&id) {
            return Ok(cached.clone());
        }

        let snapshot = self.snapshot(host)?;
        let resolved = match snapshot.iter().find(|info| info.id == id) {
            Some(info) => entry_display_name(info),
            None => {
                log::debug!("No such command in registry: {}", id);
                None
            }
        };

        make_room(&mut self.id_names);
        self.id_names.insert(id, resolved.clone());
        Ok(resolved)
    }

    /// Finds the registry entry whose display name equals `name` exactly.
    /// Only used while loading the persisted ledger, so it scans directly
    /// without a cache of its own.
    pub fn resolve_by_name<H: Host>(
        &mut self,
        host: &H,
        name: &str,
    ) -> Result<Option<CommandInfo>> {
        let snapshot = self.snapshot(host)?;
        Ok(snapshot
            .iter()
            .find(|info| info.name.as_deref() == Some(name))
            .cloned())
    }

    /// Resolves a plugin command's `(module, method)` pair to its id.
    pub fn resolve_by_module_method<H: Host>(
        &mut self,
        host: &H,
        module: &str,
        method: &str,
    ) -> Result<Option<CommandId>> {
        let key = (module.to_string(), method.to_string());
        if let Some(cached) = self.modmeth_ids.get(&key) {
            return Ok(*cached);
        }

        let snapshot = self.snapshot(host)?;
        let resolved = snapshot
            .iter()
            .find(|info| {
                info.module.as_deref() == Some(module) && info.method.as_deref() == Some(method)
            })
            .map(|info| info.id);
        if resolved.is_none() {
            log::debug!("No registry entry for module '{}', method '{}'.", module, method);
        }

        make_room(&mut self.modmeth_ids);
        self.modmeth_ids.insert(key, resolved);
        Ok(resolved)
    }

    /// Resolves a cleaned menu path (segments split on `>`, mnemonics already
    /// stripped) to a command *name*. API-menu ids are unstable, so callers
    /// store the name, not the id.
    ///
    /// The directory is scanned in reverse so that, among several entries
    /// with matching trailing segments, the last-registered one wins. That
    /// tie-break is inherited behavior; tests pin it down as such.
    pub fn resolve_by_menu_path<H: Host>(
        &mut self,
        host: &H,
        path: &str,
    ) -> Result<Option<String>> {
        if let Some(cached) = self.menu_path_names.get(path) {
            return Ok(cached.clone());
        }

        let segments: Vec<String> = path.split('>').map(|s| s.trim().to_string()).collect();
        let snapshot = self.snapshot(host)?;
        let resolved = snapshot
            .iter()
            .rev()
            .filter_map(|info| info.name.as_deref())
            .find(|name| menu_path_matches(name, &segments))
            .map(str::to_string);
        if resolved.is_none() {
            log::debug!("No registry entry matches menu path '{}'.", path);
        }

        make_room(&mut self.menu_path_names);
        self.menu_path_names.insert(path.to_string(), resolved.clone());
        Ok(resolved)
    }
}

/// Matches a registry name against menu path segments, tail to head: the
/// name must end with the last segment, and its `:`-separated components
/// must line up with the remaining segments walking backwards.
fn menu_path_matches(name: &str, segments: &[String]) -> bool {
    let Some((last, rest)) = segments.split_last() else {
        return false;
    };
    if last.is_empty() || !name.ends_with(last.as_str()) {
        return false;
    }

    let components: Vec<&str> = name.split(':').map(str::trim).collect();
    if components.len() < segments.len() {
        return false;
    }
    // The last segment was suffix-matched against the full name above; the
    // ones before it must equal the components right-aligned.
    rest.iter()
        .rev()
        .zip(components[..components.len() - 1].iter().rev())
        .all(|(segment, component)| segment == component)
}

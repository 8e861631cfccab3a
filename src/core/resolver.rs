// src/core/resolver.rs

//! Turns raw invocation-log records into command references.
//!
//! Records are fed newest-to-oldest; the resolver signals when the scan hits
//! the boundary sentinel left behind by a previous pass. Log noise (palette
//! open/close bookkeeping, menu begin/end markers, unknown invoke shapes) is
//! skipped, and malformed payloads are skipped with a diagnostic; nothing
//! in here is fatal.

use crate::constants::{SENTINEL_CODE, SENTINEL_TAG};
use crate::core::directory::Directory;
use crate::host::Host;
use crate::models::{CommandRef, InvokeKind, LogRecord};
use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Menu path embedded in a `menu_api` record: after `;m=`, up to `;`.
    static ref MENU_PATH_RE: Regex = Regex::new(r";m=([^;]*);").expect("static regex");
}

/// Outcome of resolving one log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The record is the boundary sentinel: the rest of the log was already
    /// consumed by a previous scan.
    Stop,
    /// Bookkeeping noise or an unresolvable record; continue scanning.
    Skip,
    /// A user-invoked command.
    Found(CommandRef),
}

/// Resolves one raw log record. Parse failures never abort the scan; the
/// record is skipped and a diagnostic is logged.
pub fn resolve_record<H: Host>(
    host: &H,
    directory: &mut Directory,
    record: &LogRecord,
) -> Result<Resolution> {
    if record.code == SENTINEL_CODE && record.text == SENTINEL_TAG {
        return Ok(Resolution::Stop);
    }

    match record.invoke_kind() {
        InvokeKind::Palette => {
            // Codes 1 and 2 are palette open/close bookkeeping.
            if record.code == 1 || record.code == 2 {
                return Ok(Resolution::Skip);
            }
            Ok(Resolution::Found(CommandRef::ById(record.code)))
        }
        InvokeKind::Menu => match record.code {
            // Code 1: command about to run, identity in `text` as
            // `py:<module>,<method>,`.
            1 => resolve_plugin_text(host, directory, record),
            // Code 2: command finished.
            2 => Ok(Resolution::Skip),
            // Anything else is already a concrete id.
            id => Ok(Resolution::Found(CommandRef::ById(id))),
        },
        InvokeKind::MenuApi => {
            if record.code != 1 {
                return Ok(Resolution::Skip);
            }
            resolve_menu_api_text(host, directory, record)
        }
        InvokeKind::Other => Ok(Resolution::Skip),
    }
}

fn resolve_plugin_text<H: Host>(
    host: &H,
    directory: &mut Directory,
    record: &LogRecord,
) -> Result<Resolution> {
    let Some((module, method)) = parse_plugin_text(&record.text) else {
        log::warn!("Skipping menu record with unexpected text shape: {:?}", record);
        return Ok(Resolution::Skip);
    };

    match directory.resolve_by_module_method(host, module, method)? {
        Some(id) => Ok(Resolution::Found(CommandRef::ById(id))),
        None => {
            log::warn!("No registered command for log record: {:?}", record);
            Ok(Resolution::Skip)
        }
    }
}

/// Parses `py:<module>,<method>,` into its module and method parts.
fn parse_plugin_text(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix("py:")?.strip_suffix(',')?;
    let (module, method) = body.split_once(',')?;
    // A second comma would mean extra fields we don't understand.
    if module.is_empty() || method.is_empty() || method.contains(',') {
        return None;
    }
    Some((module, method))
}

fn resolve_menu_api_text<H: Host>(
    host: &H,
    directory: &mut Directory,
    record: &LogRecord,
) -> Result<Resolution> {
    let Some(path) = parse_menu_api_text(&record.text) else {
        log::warn!("Skipping menu_api record without ';m=' marker: {:?}", record);
        return Ok(Resolution::Skip);
    };

    // API-menu ids are unstable across sessions, so the resolution yields a
    // name, never an id.
    match directory.resolve_by_menu_path(host, &path)? {
        Some(name) => Ok(Resolution::Found(CommandRef::ByName(name))),
        None => {
            log::warn!("No registered command for menu path '{}'.", path);
            Ok(Resolution::Skip)
        }
    }
}

/// Extracts the menu path after the `;m=` marker and strips `&` mnemonics.
/// Segment splitting and trimming happen in the directory lookup.
fn parse_menu_api_text(text: &str) -> Option<String> {
    let captured = MENU_PATH_RE.captures(text)?.get(1)?.as_str();
    if captured.is_empty() {
        return None;
    }
    Some(captured.replace('&', ""))
}

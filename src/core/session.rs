// src/core/session.rs

//! One owned ledger wired to a host.
//!
//! `Session` is the single mutation point for ledger state: the periodic
//! timer, the editor-focus notification and the picker all funnel through
//! it, running sequentially on the host's dispatch thread. Every entry point
//! discards the registry snapshot on exit so no operation ever acts on a
//! stale command set.

use crate::core::codec;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::core::picker;
use crate::core::resolver::{self, Resolution};
use crate::core::settings::Settings;
use crate::host::Host;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Session<H: Host> {
    host: H,
    directory: Directory,
    ledger: Ledger,
    history_path: PathBuf,
}

impl<H: Host> Session<H> {
    /// Creates the session, restoring the persisted ledger if one exists.
    /// Names are resolved to ids opportunistically against the registry as
    /// it stands right now; the rest stay `ByName` until they heal.
    pub fn new(host: H, settings: &Settings, history_path: PathBuf) -> Result<Self> {
        let mut directory = Directory::new();
        let ledger = codec::load(&host, &mut directory, &history_path, settings.history_size)?;
        directory.invalidate_snapshot();
        log::debug!(
            "Session started: {} history, {} pinned entries restored.",
            ledger.history().len(),
            ledger.pinned().len()
        );
        Ok(Self {
            host,
            directory,
            ledger,
            history_path,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Consumes the new window of the invocation log. This is the shared
    /// entry point of the periodic timer and the focus-change notification;
    /// both may fire redundantly, and re-processing an empty or
    /// already-consumed window is a no-op thanks to the boundary sentinel.
    pub fn process_log(&mut self) -> Result<()> {
        // The snapshot is discarded even when the scan fails partway; an
        // errored operation must not leave the next one on stale commands.
        let result = self.consume_log_window();
        self.directory.invalidate_snapshot();
        result
    }

    fn consume_log_window(&mut self) -> Result<()> {
        let records = self.host.command_log()?;
        if records.is_empty() {
            return Ok(());
        }

        let mut newest_first = Vec::new();
        let mut boundary_is_current = false;
        for (index, record) in records.iter().rev().enumerate() {
            match resolver::resolve_record(&self.host, &mut self.directory, record)? {
                Resolution::Stop => {
                    // The newest record already is the sentinel: the window
                    // was consumed before and needs no fresh mark.
                    boundary_is_current = index == 0;
                    break;
                }
                Resolution::Skip => continue,
                Resolution::Found(r) => newest_first.push(r),
            }
        }

        if !newest_first.is_empty() {
            log::debug!("Appending {} commands to history.", newest_first.len());
            self.ledger.append_batch(newest_first);
        }

        if boundary_is_current {
            return Ok(());
        }
        // Mark the consumed window so the next scan stops here.
        self.host.mark_log_boundary()
    }

    /// Scans for fresh log activity, then shows the picker.
    pub fn show_picker(&mut self) -> Result<()> {
        self.process_log()?;
        let result = picker::run_picker(&mut self.host, &mut self.directory, &mut self.ledger);
        self.directory.invalidate_snapshot();
        result
    }

    /// Persists the ledger. Write failures are reported but never propagated:
    /// a failed save must not prevent host shutdown.
    pub fn shutdown(&mut self) {
        if let Err(e) = codec::save(&self.host, &mut self.directory, &self.ledger, &self.history_path)
        {
            log::error!(
                "Failed to save command history to '{}': {}",
                self.history_path.display(),
                e
            );
        }
        self.directory.invalidate_snapshot();
    }
}

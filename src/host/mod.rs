// src/host/mod.rs

//! Interfaces to the embedding application.
//!
//! The ledger never talks to the host directly; everything it needs (the
//! command registry, the invocation log, execution, and the modal prompt)
//! goes through the [`Host`] trait so the core stays testable and the host
//! bindings stay thin.

pub mod term;

use anyhow::Result;

use crate::models::{CommandId, CommandInfo, LogRecord};

/// The host facilities the ledger depends on.
///
/// All methods are expected to be cheap wrappers around host calls; none of
/// them may block except [`Host::select_from_list`], which suspends until the
/// user picks an entry or cancels.
pub trait Host {
    /// Returns a snapshot of the currently registered commands.
    ///
    /// The registry can change between calls (plugins load and unload), so a
    /// snapshot must never be held across ledger operations.
    fn commands(&self) -> Result<Vec<CommandInfo>>;

    /// Returns the invocation log, oldest record first.
    fn command_log(&self) -> Result<Vec<LogRecord>>;

    /// Appends the boundary sentinel to the invocation log, marking the
    /// consumed window so the next scan stops there.
    fn mark_log_boundary(&mut self) -> Result<()>;

    /// Runs a command by id. Fire-and-forget; the ledger consumes no result.
    fn run_command(&mut self, id: CommandId) -> Result<()>;

    /// Shows the modal selection prompt. Returns the chosen index, or `None`
    /// if the user cancelled.
    fn select_from_list(
        &mut self,
        items: &[String],
        caption: &str,
        focused: usize,
    ) -> Result<Option<usize>>;

    /// Whether the pin/unpin modifier key is held at selection time.
    fn pin_modifier_down(&self) -> bool;
}

// src/cli/handlers/scan.rs

use crate::models::CommandRef;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Consumes the new log window and prints the resulting ledger state.
pub fn handle(registry: PathBuf, log: PathBuf) -> Result<()> {
    let mut session = super::open_session(registry, log, false)?;
    session.process_log()?;

    let ledger = session.ledger();
    if ledger.is_empty() {
        println!("(history empty)");
    } else {
        for r in ledger.pinned() {
            println!("{} {}", "pinned".cyan().bold(), describe(r));
        }
        // Newest first, matching the picker's recency view.
        for r in ledger.history().iter().rev() {
            println!("       {}", describe(r));
        }
    }

    session.shutdown();
    Ok(())
}

fn describe(r: &CommandRef) -> String {
    match r {
        CommandRef::ById(id) => format!("#{}", id),
        CommandRef::ByName(name) => name.clone(),
    }
}

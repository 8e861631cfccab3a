// src/cli/mod.rs

pub mod handlers;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmdhist: bounded, deduplicated command history with pinned favourites.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the host command registry (TOML).
    #[arg(long, global = true, default_value = "registry.toml")]
    pub registry: PathBuf,

    /// Path to the host invocation log (JSON lines).
    #[arg(long, global = true, default_value = "command_log.jsonl")]
    pub log: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the invocation log and show the interactive picker.
    Show {
        /// Treat the selection as a pin/unpin toggle instead of running it.
        #[arg(long)]
        pin: bool,
    },
    /// Scan the invocation log and print the resulting ledger.
    Scan,
    /// Print the settings path and re-save the effective settings.
    Config,
}

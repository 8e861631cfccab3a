// src/host/term.rs

//! File-backed host for the demo binary.
//!
//! Stands in for a real embedding application: the command registry lives in
//! a TOML file, the invocation log is JSON-lines (one record per line, which
//! is also how the sentinel write-back appends), execution just announces the
//! command, and the modal prompt is a `dialoguer` select on the terminal.

use crate::host::Host;
use crate::models::{CommandId, CommandInfo, LogRecord};
use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
struct RegistryFile {
    #[serde(default)]
    commands: Vec<CommandInfo>,
}

/// A host whose registry and invocation log are plain files on disk.
#[derive(Debug)]
pub struct FileHost {
    registry_path: PathBuf,
    log_path: PathBuf,
    pin_modifier: bool,
}

impl FileHost {
    pub fn new(registry_path: PathBuf, log_path: PathBuf, pin_modifier: bool) -> Self {
        Self {
            registry_path,
            log_path,
            pin_modifier,
        }
    }
}

impl Host for FileHost {
    fn commands(&self) -> Result<Vec<CommandInfo>> {
        let raw = fs::read_to_string(&self.registry_path).with_context(|| {
            format!("Failed to read registry '{}'", self.registry_path.display())
        })?;
        let registry: RegistryFile = toml::from_str(&raw).with_context(|| {
            format!("Failed to parse registry '{}'", self.registry_path.display())
        })?;
        Ok(registry.commands)
    }

    fn command_log(&self) -> Result<Vec<LogRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log '{}'", self.log_path.display()))?;

        let mut records = Vec::new();
        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str::<LogRecord>(line) {
                Ok(record) => records.push(record),
                // A single mangled line must not lose the rest of the log.
                Err(e) => log::warn!("Ignoring malformed log line {:?}: {}", line, e),
            }
        }
        Ok(records)
    }

    fn mark_log_boundary(&mut self) -> Result<()> {
        let sentinel = LogRecord {
            code: crate::constants::SENTINEL_CODE,
            text: crate::constants::SENTINEL_TAG.to_string(),
            invoke: String::new(),
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log '{}'", self.log_path.display()))?;
        writeln!(file, "{}", serde_json::to_string(&sentinel)?)?;
        Ok(())
    }

    fn run_command(&mut self, id: CommandId) -> Result<()> {
        // Fire-and-forget stand-in for the host's execution call.
        println!("{} command {}", "Running".green().bold(), id);
        Ok(())
    }

    fn select_from_list(
        &mut self,
        items: &[String],
        caption: &str,
        focused: usize,
    ) -> Result<Option<usize>> {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(caption)
            .items(items)
            .default(focused)
            .interact_opt()?;
        Ok(choice)
    }

    fn pin_modifier_down(&self) -> bool {
        self.pin_modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SENTINEL_CODE, SENTINEL_TAG};
    use tempfile::tempdir;

    #[test]
    fn test_registry_and_log_parsing() {
        let tmp = tempdir().unwrap();
        let registry = tmp.path().join("registry.toml");
        let log = tmp.path().join("log.jsonl");
        fs::write(
            &registry,
            r#"
[[commands]]
id = 10
name = "File: Save"

[[commands]]
id = 11
name = "Breadcrumbs: Show tree"
module = "cuda_breadcrumbs"
method = "show_tree"
"#,
        )
        .unwrap();
        fs::write(
            &log,
            "{\"code\":10,\"text\":\"\",\"invoke\":\"app_pal\"}\nnot json\n",
        )
        .unwrap();

        let host = FileHost::new(registry, log, false);
        let commands = host.commands().unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].module.as_deref(), Some("cuda_breadcrumbs"));

        // The malformed line is dropped, the valid one survives.
        let records = host.command_log().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, 10);
    }

    #[test]
    fn test_boundary_is_appended_as_a_log_line() {
        let tmp = tempdir().unwrap();
        let registry = tmp.path().join("registry.toml");
        let log = tmp.path().join("log.jsonl");
        fs::write(&registry, "").unwrap();
        fs::write(&log, "{\"code\":10,\"text\":\"\",\"invoke\":\"app_pal\"}\n").unwrap();

        let mut host = FileHost::new(registry, log, false);
        host.mark_log_boundary().unwrap();

        let records = host.command_log().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].code, SENTINEL_CODE);
        assert_eq!(records[1].text, SENTINEL_TAG);
    }
}

// src/core/picker.rs

//! Builds the combined pinned+history view, runs the host's modal selection
//! and applies the outcome back onto the ledger.

use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::host::Host;
use crate::models::CommandRef;
use anyhow::Result;

const PICKER_CAPTION: &str = "Commands history";

/// One row of the picker: display label plus the ledger ref it maps back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub label: String,
    pub target: CommandRef,
    pub pinned: bool,
}

/// Formats a command name for display: the `:`-separated leaf first, its
/// category after a tab, so "File: Save" renders as "Save<TAB>File".
fn display_label(name: &str, pinned: bool) -> String {
    let base = match name.rsplit_once(':') {
        Some((category, leaf)) => format!("{}\t{}", leaf.trim(), category.trim()),
        None => name.to_string(),
    };
    if pinned { format!("* {}", base) } else { base }
}

/// Builds the display list: pinned entries first in insertion order, then
/// history most-recently-used first. Refs whose name cannot be resolved are
/// silently omitted; they keep their structural slot in the ledger and may
/// reappear once their provider loads.
pub fn build_display_list<H: Host>(
    host: &H,
    directory: &mut Directory,
    ledger: &Ledger,
) -> Result<Vec<DisplayEntry>> {
    let mut entries = Vec::with_capacity(ledger.pinned().len() + ledger.history().len());

    for r in ledger.pinned() {
        if let Some(name) = ref_display_name(host, directory, r)? {
            entries.push(DisplayEntry {
                label: display_label(&name, true),
                target: r.clone(),
                pinned: true,
            });
        }
    }
    for r in ledger.history().iter().rev() {
        if let Some(name) = ref_display_name(host, directory, r)? {
            entries.push(DisplayEntry {
                label: display_label(&name, false),
                target: r.clone(),
                pinned: false,
            });
        }
    }

    Ok(entries)
}

fn ref_display_name<H: Host>(
    host: &H,
    directory: &mut Directory,
    r: &CommandRef,
) -> Result<Option<String>> {
    match r {
        CommandRef::ById(id) => directory.resolve_by_id(host, *id),
        // A ByName ref is its own display string; whether it currently
        // resolves to an id only matters at execution time.
        CommandRef::ByName(name) => Ok(Some(name.clone())),
    }
}

/// Shows the picker and applies the user's choice: run-and-promote by
/// default, pin/unpin transfer when the modifier is held. Cancellation
/// leaves the ledger untouched.
pub fn run_picker<H: Host>(
    host: &mut H,
    directory: &mut Directory,
    ledger: &mut Ledger,
) -> Result<()> {
    let entries = build_display_list(host, directory, ledger)?;
    if entries.is_empty() {
        log::debug!("Nothing to show: ledger empty or nothing resolvable.");
        return Ok(());
    }

    let labels: Vec<String> = entries.iter().map(|e| e.label.clone()).collect();
    let Some(index) = host.select_from_list(&labels, PICKER_CAPTION, 0)? else {
        return Ok(());
    };
    let Some(entry) = entries.get(index) else {
        log::warn!("Prompt returned out-of-range index {}.", index);
        return Ok(());
    };

    if host.pin_modifier_down() {
        ledger.toggle_pin(&entry.target);
        return Ok(());
    }

    let id = match &entry.target {
        CommandRef::ById(id) => Some(*id),
        CommandRef::ByName(name) => directory.resolve_by_name(host, name)?.map(|info| info.id),
    };
    match id {
        Some(id) => {
            host.run_command(id)?;
            ledger.promote(&entry.target);
        }
        None => {
            log::warn!("Command '{:?}' no longer resolves to an id, not running.", entry.target);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommandId, CommandInfo, LogRecord};
    use std::cell::RefCell;

    struct ScriptedHost {
        commands: Vec<CommandInfo>,
        selection: Option<usize>,
        modifier: bool,
        ran: RefCell<Vec<CommandId>>,
    }

    impl ScriptedHost {
        fn new(commands: Vec<CommandInfo>) -> Self {
            Self {
                commands,
                selection: None,
                modifier: false,
                ran: RefCell::new(Vec::new()),
            }
        }
    }

    impl Host for ScriptedHost {
        fn commands(&self) -> Result<Vec<CommandInfo>> {
            Ok(self.commands.clone())
        }
        fn command_log(&self) -> Result<Vec<LogRecord>> {
            Ok(Vec::new())
        }
        fn mark_log_boundary(&mut self) -> Result<()> {
            Ok(())
        }
        fn run_command(&mut self, id: CommandId) -> Result<()> {
            self.ran.borrow_mut().push(id);
            Ok(())
        }
        fn select_from_list(
            &mut self,
            _items: &[String],
            _caption: &str,
            _focused: usize,
        ) -> Result<Option<usize>> {
            Ok(self.selection)
        }
        fn pin_modifier_down(&self) -> bool {
            self.modifier
        }
    }

    fn info(id: CommandId, name: &str) -> CommandInfo {
        CommandInfo {
            id,
            name: Some(name.to_string()),
            module: None,
            method: None,
        }
    }

    fn seeded_ledger() -> Ledger {
        let mut ledger = Ledger::new(24);
        // history = [1, 2, 3] oldest→newest, pin 3.
        ledger.append_batch(vec![
            CommandRef::ById(3),
            CommandRef::ById(2),
            CommandRef::ById(1),
        ]);
        ledger.toggle_pin(&CommandRef::ById(3));
        ledger
    }

    fn registry() -> Vec<CommandInfo> {
        vec![info(1, "File: Save"), info(2, "File: Open"), info(3, "View: Sidebar")]
    }

    #[test]
    fn test_display_list_pinned_first_then_mru() {
        let host = ScriptedHost::new(registry());
        let mut dir = Directory::new();
        let ledger = seeded_ledger();

        let entries = build_display_list(&host, &mut dir, &ledger).unwrap();
        let targets: Vec<&CommandRef> = entries.iter().map(|e| &e.target).collect();
        assert_eq!(
            targets,
            vec![&CommandRef::ById(3), &CommandRef::ById(2), &CommandRef::ById(1)]
        );
        assert!(entries[0].pinned);
        assert_eq!(entries[0].label, "* Sidebar\tView");
        assert_eq!(entries[2].label, "Save\tFile");
    }

    #[test]
    fn test_unresolvable_refs_are_omitted_but_kept() {
        let host = ScriptedHost::new(registry());
        let mut dir = Directory::new();
        let mut ledger = seeded_ledger();
        ledger.append_batch(vec![CommandRef::ById(404)]);

        let entries = build_display_list(&host, &mut dir, &ledger).unwrap();
        assert!(entries.iter().all(|e| e.target != CommandRef::ById(404)));
        // The structural slot survives.
        assert!(ledger.history().contains(&CommandRef::ById(404)));
    }

    #[test]
    fn test_by_name_entries_display_verbatim() {
        let host = ScriptedHost::new(registry());
        let mut dir = Directory::new();
        let mut ledger = Ledger::new(24);
        ledger.append_batch(vec![CommandRef::ByName("Ghost: Command".to_string())]);

        let entries = build_display_list(&host, &mut dir, &ledger).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Command\tGhost");
    }

    #[test]
    fn test_run_promotes_selection() {
        let mut host = ScriptedHost::new(registry());
        // Display order: [3 pinned, 2, 1]; pick index 2 (= id 1, oldest).
        host.selection = Some(2);
        let mut dir = Directory::new();
        let mut ledger = seeded_ledger();

        run_picker(&mut host, &mut dir, &mut ledger).unwrap();
        assert_eq!(*host.ran.borrow(), vec![1]);
        assert_eq!(ledger.history(), &[CommandRef::ById(2), CommandRef::ById(1)]);
    }

    #[test]
    fn test_running_pinned_does_not_reorder() {
        let mut host = ScriptedHost::new(registry());
        host.selection = Some(0); // the pinned entry
        let mut dir = Directory::new();
        let mut ledger = seeded_ledger();
        let before_pinned = ledger.pinned().to_vec();
        let before_history = ledger.history().to_vec();

        run_picker(&mut host, &mut dir, &mut ledger).unwrap();
        assert_eq!(*host.ran.borrow(), vec![3]);
        assert_eq!(ledger.pinned(), before_pinned.as_slice());
        assert_eq!(ledger.history(), before_history.as_slice());
    }

    #[test]
    fn test_modifier_toggles_pin_instead_of_running() {
        let mut host = ScriptedHost::new(registry());
        host.selection = Some(1); // id 2, most recent history entry
        host.modifier = true;
        let mut dir = Directory::new();
        let mut ledger = seeded_ledger();

        run_picker(&mut host, &mut dir, &mut ledger).unwrap();
        assert!(host.ran.borrow().is_empty());
        assert_eq!(ledger.pinned(), &[CommandRef::ById(3), CommandRef::ById(2)]);
        assert_eq!(ledger.history(), &[CommandRef::ById(1)]);
    }

    #[test]
    fn test_cancellation_is_a_no_op() {
        let mut host = ScriptedHost::new(registry());
        host.selection = None;
        let mut dir = Directory::new();
        let mut ledger = seeded_ledger();
        let before = ledger.clone();

        run_picker(&mut host, &mut dir, &mut ledger).unwrap();
        assert!(host.ran.borrow().is_empty());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_stale_by_name_selection_is_skipped() {
        let mut host = ScriptedHost::new(registry());
        host.selection = Some(0);
        let mut dir = Directory::new();
        let mut ledger = Ledger::new(24);
        ledger.append_batch(vec![CommandRef::ByName("Ghost: Command".to_string())]);
        let before = ledger.clone();

        run_picker(&mut host, &mut dir, &mut ledger).unwrap();
        assert!(host.ran.borrow().is_empty());
        assert_eq!(ledger, before);
    }
}

// src/models.rs

use serde::{Deserialize, Serialize};

use crate::constants::{INVOKE_MENU, INVOKE_MENU_API, INVOKE_PALETTE};

/// Numeric command identifier as assigned by the host registry.
/// Ids are stable within one host session only; names are the portable identity.
pub type CommandId = i64;

/// A reference to a logical command, as stored in the ledger.
///
/// The two variants are deliberately *not* reconciled by equality: an `ById`
/// and a `ByName` that denote the same underlying command compare unequal.
/// Dedup and disjointness operate on this stored representation; identity
/// reconciliation happens only through the directory cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandRef {
    /// Resolved to a numeric id in the current host session.
    ById(CommandId),
    /// Known only by display name (id unknown, e.g. provider not loaded yet).
    ByName(String),
}

/// One entry of the host's command registry snapshot.
///
/// `name == None` means "no such command" to the host; an empty name means
/// the command exists but carries no display name (see fallback naming in
/// the directory cache).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub id: CommandId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

/// One raw record of the host's invocation log, in wire form.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub code: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub invoke: String,
}

/// Closed enumeration of the log record shapes we understand.
/// Anything else is noise and is skipped by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeKind {
    Palette,
    Menu,
    MenuApi,
    Other,
}

impl InvokeKind {
    pub fn parse(marker: &str) -> Self {
        match marker {
            INVOKE_PALETTE => Self::Palette,
            INVOKE_MENU => Self::Menu,
            INVOKE_MENU_API => Self::MenuApi,
            _ => Self::Other,
        }
    }
}

impl LogRecord {
    pub fn invoke_kind(&self) -> InvokeKind {
        InvokeKind::parse(&self.invoke)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_equality_is_structural() {
        // Same underlying command, different representation: not equal.
        assert_ne!(
            CommandRef::ById(7),
            CommandRef::ByName("File: Save".to_string())
        );
        assert_eq!(CommandRef::ById(7), CommandRef::ById(7));
        assert_ne!(CommandRef::ById(7), CommandRef::ById(8));
        assert_eq!(
            CommandRef::ByName("a".to_string()),
            CommandRef::ByName("a".to_string())
        );
    }

    #[test]
    fn test_invoke_kind_parsing() {
        assert_eq!(InvokeKind::parse("app_pal"), InvokeKind::Palette);
        assert_eq!(InvokeKind::parse("menu_main"), InvokeKind::Menu);
        assert_eq!(InvokeKind::parse("menu_api"), InvokeKind::MenuApi);
        assert_eq!(InvokeKind::parse("dlg_proc"), InvokeKind::Other);
        assert_eq!(InvokeKind::parse(""), InvokeKind::Other);
    }
}

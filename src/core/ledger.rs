// src/core/ledger.rs

//! The History/Pin Ledger: two ordered sequences of command references.
//!
//! `history` is recency-ordered oldest→newest, capped at the configured
//! capacity and free of duplicates. `pinned` is unbounded and keeps insertion
//! order. The two sets stay disjoint at all times; an entry moves between
//! them only through [`Ledger::toggle_pin`].

use crate::models::CommandRef;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    history: Vec<CommandRef>,
    pinned: Vec<CommandRef>,
    capacity: usize,
}

impl Ledger {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Vec::new(),
            pinned: Vec::new(),
            capacity,
        }
    }

    /// Rebuilds a ledger from persisted state. Persisted files are not
    /// trusted to uphold the invariants: hand-edited or name-aliased lines
    /// can repeat, and a file written with a larger `history_size` can
    /// overflow. Pins keep their first occurrence, history keeps the newest,
    /// overlap resolves in favour of the pin, and the head is trimmed to
    /// capacity.
    pub fn from_parts(history: Vec<CommandRef>, pinned: Vec<CommandRef>, capacity: usize) -> Self {
        let mut ledger = Self {
            history,
            pinned,
            capacity,
        };
        let mut seen: HashSet<CommandRef> = HashSet::with_capacity(ledger.pinned.len());
        ledger.pinned.retain(|r| seen.insert(r.clone()));
        ledger.history.retain(|r| !ledger.pinned.contains(r));
        ledger.dedup_keep_newest();
        ledger.trim_to_capacity();
        ledger
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// History entries, oldest→newest.
    pub fn history(&self) -> &[CommandRef] {
        &self.history
    }

    /// Pinned entries, in insertion order.
    pub fn pinned(&self) -> &[CommandRef] {
        &self.pinned
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.pinned.is_empty()
    }

    /// Ingests one scanned log window. `newest_first` is ordered as produced
    /// by scanning the log backwards; entries land in the history tail in
    /// chronological order. Duplicates keep their most recent occurrence,
    /// then the head is trimmed until the capacity holds. Refs that are
    /// currently pinned are left where they are.
    pub fn append_batch(&mut self, newest_first: Vec<CommandRef>) {
        if newest_first.is_empty() {
            return;
        }

        for r in newest_first.into_iter().rev() {
            if self.pinned.contains(&r) {
                continue;
            }
            self.history.push(r);
        }

        self.dedup_keep_newest();
        self.trim_to_capacity();
    }

    /// Promotes a just-run history entry to the most-recent position.
    /// Pinned entries are not reordered by running them.
    pub fn promote(&mut self, target: &CommandRef) {
        if let Some(pos) = self.history.iter().position(|r| r == target) {
            let r = self.history.remove(pos);
            self.history.push(r);
        }
    }

    /// Moves a history entry to the pinned tail, or a pinned entry back into
    /// history. Unpinning inserts at the *head*: the entry re-enters as the
    /// least-recent item and shows at the bottom of the recency view. That
    /// asymmetry is intentional: pin/unpin is not position-preserving.
    pub fn toggle_pin(&mut self, target: &CommandRef) {
        if let Some(pos) = self.history.iter().position(|r| r == target) {
            let r = self.history.remove(pos);
            self.pinned.push(r);
        } else if let Some(pos) = self.pinned.iter().position(|r| r == target) {
            let r = self.pinned.remove(pos);
            self.history.insert(0, r);
        }
    }

    // Dedup preserving the position of the most recent occurrence: walk
    // newest-first, keep the first sighting of each ref, then restore
    // oldest→newest order.
    fn dedup_keep_newest(&mut self) {
        let mut seen: HashSet<CommandRef> = HashSet::with_capacity(self.history.len());
        let mut kept: Vec<CommandRef> = Vec::with_capacity(self.history.len());
        for r in self.history.drain(..).rev() {
            if seen.insert(r.clone()) {
                kept.push(r);
            }
        }
        kept.reverse();
        self.history = kept;
    }

    fn trim_to_capacity(&mut self) {
        if self.history.len() > self.capacity {
            let excess = self.history.len() - self.capacity;
            self.history.drain(..excess);
        }
    }
}

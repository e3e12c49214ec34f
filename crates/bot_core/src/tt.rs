//! Transposition table.
//!
//! Cache of search results keyed by Zobrist hash. Entries are overwritten
//! unconditionally on key collision; there is no verification tag, so a
//! 64-bit collision silently returns a wrong entry. The table is
//! single-owner and unsynchronized.

use std::collections::HashMap;

/// How a cached score relates to the true value of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact search value.
    Exact,
    /// The search failed high; the true value is at least this score.
    LowerBound,
    /// The search failed low; the true value is at most this score.
    UpperBound,
}

/// One cached search result.
#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub key: u64,
    /// Mover-relative score in pawn units.
    pub score: f64,
    pub bound: Bound,
    /// Remaining depth of the search that produced the score.
    pub depth: u8,
    /// Game ply at store time, for external staleness decisions.
    pub age: u32,
}

/// Map from Zobrist key to the most recently stored entry.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Store an entry, replacing any previous entry under the same key.
    pub fn add(&mut self, entry: TtEntry) {
        self.entries.insert(entry.key, entry);
    }

    pub fn get(&self, key: u64) -> Option<&TtEntry> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;

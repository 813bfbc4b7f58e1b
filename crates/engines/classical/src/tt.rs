//! Transposition table keyed by position hash.
//!
//! Entries remember the window a value was proven in rather than a bound
//! tag: `[v, v]` is exact, `[v, +inf)` a fail-high and `(-inf, v]` a
//! fail-low. The table outlives single searches and is aged once per
//! top-level search instead of being cleared.

use std::collections::hash_map::Entry as Slot;
use std::collections::HashMap;

/// Depth stored for terminal positions, deeper than any real search.
pub const TERMINAL_DEPTH: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub depth: u8,
    pub value: f32,
    pub lower: f32,
    pub upper: f32,
    pub age: u8,
}

impl Entry {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }

    /// The value a node searched `depth` plies deep in window
    /// `[alpha, beta]` may return without searching, if any.
    ///
    /// Only entries of the same depth, or terminal ones, are used unless
    /// `reuse_deeper` is set. A deeper value differs from the fixed-depth
    /// one, so reusing it makes the result depend on the table.
    pub fn cutoff(&self, depth: u8, alpha: f32, beta: f32, reuse_deeper: bool) -> Option<f32> {
        let usable = match self.depth {
            TERMINAL_DEPTH => true,
            d if reuse_deeper => d >= depth,
            d => d == depth,
        };
        if !usable {
            return None;
        }
        if self.is_exact() {
            Some(self.value)
        } else if self.lower >= beta {
            Some(self.lower)
        } else if self.upper <= alpha {
            Some(self.upper)
        } else {
            None
        }
    }
}

/// Window achieved by a value searched in `[alpha, beta]`.
pub fn window(value: f32, alpha: f32, beta: f32) -> (f32, f32) {
    if value <= alpha {
        (f32::NEG_INFINITY, value)
    } else if value >= beta {
        (value, f32::INFINITY)
    } else {
        (value, value)
    }
}

#[derive(Debug)]
pub struct TranspositionTable {
    entries: HashMap<u64, Entry>,
    lifetime: u8,
}

impl TranspositionTable {
    /// `lifetime` is how many [`TranspositionTable::age_and_evict`] calls an
    /// entry survives without being stored again.
    pub fn new(lifetime: u8) -> Self {
        Self {
            entries: HashMap::new(),
            lifetime: lifetime.max(1),
        }
    }

    #[inline]
    pub fn lookup(&self, hash: u64) -> Option<Entry> {
        self.entries.get(&hash).copied()
    }

    /// Stored value for `hash`, whatever its depth or bound.
    #[inline]
    pub fn value(&self, hash: u64) -> Option<f32> {
        self.entries.get(&hash).map(|e| e.value)
    }

    /// Record `value` proven within `window` at `depth`.
    ///
    /// A shallower result never replaces a deeper one, but either way the
    /// entry's age is reset.
    pub fn store(&mut self, hash: u64, depth: u8, window: (f32, f32), value: f32) {
        let fresh = Entry {
            depth,
            value,
            lower: window.0,
            upper: window.1,
            age: self.lifetime,
        };
        match self.entries.entry(hash) {
            Slot::Occupied(mut slot) => {
                let entry = slot.get_mut();
                if depth >= entry.depth {
                    *entry = fresh;
                } else {
                    entry.age = self.lifetime;
                }
            }
            Slot::Vacant(slot) => {
                slot.insert(fresh);
            }
        }
    }

    /// Age every entry by one search and drop the ones that expire.
    pub fn age_and_evict(&mut self) {
        self.entries.retain(|_, e| {
            e.age = e.age.saturating_sub(1);
            e.age > 0
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn lifetime(&self) -> u8 {
        self.lifetime
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;

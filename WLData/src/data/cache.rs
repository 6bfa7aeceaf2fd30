//! Permanent per-key memoization
//!
//! Every cache in `WLData` lives for the whole process and never evicts. A key
//! that was never computed is simply missing from the map; a key that was
//! computed and came up empty holds [`Slot::Absent`], so genuinely-absent
//! results aren't recomputed on every request.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A computed cache entry
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<V> {
    /// Computed, and there was nothing there
    Absent,
    /// Computed value
    Present(V),
}

impl<V> Slot<V> {
    /// Borrow the value, if present
    pub fn as_ref(&self) -> Option<&V> {
        match self {
            Slot::Absent => None,
            Slot::Present(v) => Some(v),
        }
    }
}

impl<V: Clone> Slot<V> {
    /// Clone the value out, if present
    pub fn to_option(&self) -> Option<V> {
        self.as_ref().cloned()
    }
}

impl<V> From<Option<V>> for Slot<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => Slot::Present(v),
            None => Slot::Absent,
        }
    }
}

/// Lookup statistics for debugging
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: usize,
    pub misses: usize,
}

/// Process-lifetime cache keyed by identifier
#[derive(Debug)]
pub struct Memo<K, V> {
    entries: HashMap<K, Slot<V>>,
    stats: MemoStats,
}

impl<K: Eq + Hash, V> Memo<K, V> {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: MemoStats::default(),
        }
    }

    /// Look up a computed entry, recording a hit or miss
    ///
    /// `None` means "not computed yet"; `Some(Slot::Absent)` means "computed, nothing there".
    pub fn lookup<Q>(&mut self, key: &Q) -> Option<&Slot<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.get(key);
        if slot.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        slot
    }

    /// Check whether `key` has been computed, without touching statistics
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Record the computed result for `key`
    pub fn store(&mut self, key: K, value: Option<V>) {
        self.entries.insert(key, value.into());
    }

    /// Number of computed entries (absent ones included)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been computed yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current statistics
    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

impl<K: Eq + Hash, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

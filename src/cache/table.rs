//! Entry Table Module
//!
//! Maps each key to the handle of its live entry.

use std::collections::HashMap;

use crate::cache::EntryId;

// == Entry Table ==
/// Authority for whether a key is present in the cache.
#[derive(Debug, Default)]
pub struct EntryTable {
    index: HashMap<Vec<u8>, EntryId>,
}

impl EntryTable {
    // == Constructor ==
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    // == With Capacity ==
    /// Creates an empty table with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
        }
    }

    // == Lookup ==
    /// Returns the handle for `key`, if present.
    pub fn lookup(&self, key: &[u8]) -> Option<EntryId> {
        self.index.get(key).copied()
    }

    // == Insert ==
    /// Registers a new key. The key must not already be present.
    pub fn insert(&mut self, key: Vec<u8>, id: EntryId) {
        let previous = self.index.insert(key, id);
        debug_assert!(previous.is_none(), "key inserted twice into entry table");
    }

    // == Remove ==
    /// Deletes the association for `key`.
    pub fn remove(&mut self, key: &[u8]) -> Option<EntryId> {
        self.index.remove(key)
    }

    // == Contains ==
    /// Checks if `key` is present.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    // == Length ==
    /// Returns the number of keys in the table.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    /// Returns true if the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Clear ==
    /// Removes every key.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    // == Iter ==
    /// Iterates over `(key, handle)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], EntryId)> {
        self.index.iter().map(|(key, id)| (key.as_slice(), *id))
    }
}

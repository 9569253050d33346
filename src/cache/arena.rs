//! Entry Arena Module
//!
//! Slot storage that owns every live entry. The entry table and the recency
//! heap both refer to entries through `EntryId` handles into this arena.

use std::ops::{Index, IndexMut};

use crate::cache::Entry;

// == Entry Handle ==
/// Stable handle to an entry slot. Valid until the entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl EntryId {
    // == Index ==
    /// Returns the raw slot number.
    pub fn index(self) -> usize {
        self.0
    }
}

// == Entry Arena ==
/// Vector of entry slots with a free list for reuse after eviction.
#[derive(Debug)]
pub struct EntryArena<V> {
    slots: Vec<Option<Entry<V>>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<V> EntryArena<V> {
    // == Constructor ==
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // == With Capacity ==
    /// Creates an empty arena with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // == Insert ==
    /// Stores an entry, reusing a freed slot when one is available.
    pub fn insert(&mut self, entry: Entry<V>) -> EntryId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(entry);
            idx
        } else {
            self.slots.push(Some(entry));
            self.slots.len() - 1
        };
        self.len += 1;
        EntryId(idx)
    }

    // == Remove ==
    /// Takes the entry out of its slot and frees the slot.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry<V>> {
        let entry = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(entry)
    }

    // == Get ==
    /// Returns the entry in slot `id`, or None if the slot is vacant.
    pub fn get(&self, id: EntryId) -> Option<&Entry<V>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    // == Get Mut ==
    /// Returns a mutable reference to the entry in slot `id`.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry<V>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    // == Contains ==
    /// Checks if slot `id` holds a live entry.
    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry and forgets all freed slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    // == Iter ==
    /// Iterates over live entries with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry<V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|entry| (EntryId(idx), entry)))
    }
}

impl<V> Default for EntryArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics if the slot is vacant. Handles held by the table and heap always
/// point at live slots.
impl<V> Index<EntryId> for EntryArena<V> {
    type Output = Entry<V>;

    fn index(&self, id: EntryId) -> &Entry<V> {
        match self.get(id) {
            Some(entry) => entry,
            None => panic!("vacant entry slot {}", id.0),
        }
    }
}

impl<V> IndexMut<EntryId> for EntryArena<V> {
    fn index_mut(&mut self, id: EntryId) -> &mut Entry<V> {
        match self.get_mut(id) {
            Some(entry) => entry,
            None => panic!("vacant entry slot {}", id.0),
        }
    }
}

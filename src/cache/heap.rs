//! Recency Heap Module
//!
//! Array-backed binary min-heap of entry handles ordered by recency
//! (clock stamp, then access sequence).
//!
//! Every entry records its own slot in `heap_index`, so a changed stamp can be
//! fixed in O(log n) without searching for the entry. Each swap rewrites the
//! `heap_index` of both entries it moves.

use crate::cache::{EntryArena, EntryId};

// == Recency Heap ==
/// Min-heap over `Entry::recency`. Slot 0 holds the least recently used entry.
#[derive(Debug, Default)]
pub struct RecencyHeap {
    slots: Vec<EntryId>,
}

impl RecencyHeap {
    // == Constructor ==
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    // == With Capacity ==
    /// Creates an empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    // == Push ==
    /// Appends `id` and sifts it up to its place.
    pub fn push<V>(&mut self, id: EntryId, arena: &mut EntryArena<V>) {
        let idx = self.slots.len();
        self.slots.push(id);
        arena[id].heap_index = idx;
        self.sift_up(idx, arena);
    }

    // == Pop Min ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the heap is empty.
    pub fn pop_min<V>(&mut self, arena: &mut EntryArena<V>) -> Option<EntryId> {
        if self.slots.is_empty() {
            return None;
        }

        let last = self.slots.len() - 1;
        self.swap(0, last, arena);
        let id = self.slots.pop()?;

        if !self.slots.is_empty() {
            self.sift_down(0, arena);
        }

        Some(id)
    }

    // == Fix ==
    /// Restores heap order around `index` after its entry's stamp changed.
    ///
    /// Only one entry changed, so at most one direction moves anything.
    pub fn fix<V>(&mut self, index: usize, arena: &mut EntryArena<V>) {
        debug_assert!(index < self.slots.len(), "fix index {} out of bounds", index);
        if index >= self.slots.len() {
            return;
        }
        if !self.sift_up(index, arena) {
            self.sift_down(index, arena);
        }
    }

    // == Peek Min ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_min(&self) -> Option<EntryId> {
        self.slots.first().copied()
    }

    // == Get ==
    /// Returns the handle stored at `index`.
    pub fn get(&self, index: usize) -> Option<EntryId> {
        self.slots.get(index).copied()
    }

    // == Length ==
    /// Returns the number of entries in the heap.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    // == Is Empty ==
    /// Returns true if the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // == Clear ==
    /// Removes every handle from the heap.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    // == Iter ==
    /// Iterates over handles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.slots.iter().copied()
    }

    fn less<V>(&self, a: usize, b: usize, arena: &EntryArena<V>) -> bool {
        arena[self.slots[a]].recency() < arena[self.slots[b]].recency()
    }

    /// Moves `idx` toward the root. Returns true if it moved.
    fn sift_up<V>(&mut self, mut idx: usize, arena: &mut EntryArena<V>) -> bool {
        let start = idx;
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.less(idx, parent, arena) {
                break;
            }
            self.swap(idx, parent, arena);
            idx = parent;
        }
        idx != start
    }

    fn sift_down<V>(&mut self, mut idx: usize, arena: &mut EntryArena<V>) {
        let len = self.slots.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let smallest = if right < len && self.less(right, left, arena) {
                right
            } else {
                left
            };

            if !self.less(smallest, idx, arena) {
                break;
            }
            self.swap(idx, smallest, arena);
            idx = smallest;
        }
    }

    fn swap<V>(&mut self, a: usize, b: usize, arena: &mut EntryArena<V>) {
        self.slots.swap(a, b);
        arena[self.slots[a]].heap_index = a;
        arena[self.slots[b]].heap_index = b;
    }
}

//! Cache Entry Module
//!
//! Defines the record stored for every live key.

// == Cache Entry ==
/// A single cached key with its value and recency bookkeeping.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The key this entry is stored under
    pub(crate) key: Vec<u8>,
    /// The stored value
    pub(crate) value: V,
    /// Clock stamp of the most recent touch
    pub(crate) last_access: u64,
    /// Per-cache access counter, breaks ties between equal stamps
    pub(crate) sequence: u64,
    /// Current slot in the recency heap
    pub(crate) heap_index: usize,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates an entry stamped at `last_access`.
    ///
    /// The heap index is assigned when the entry is pushed onto the heap.
    pub fn new(key: Vec<u8>, value: V, last_access: u64, sequence: u64) -> Self {
        Self {
            key,
            value,
            last_access,
            sequence,
            heap_index: 0,
        }
    }

    // == Key ==
    /// Returns the entry's key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    // == Value ==
    /// Returns a reference to the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    // == Last Access ==
    /// Returns the clock stamp of the most recent access.
    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    // == Recency ==
    /// Returns the heap ordering key: clock stamp first, access sequence
    /// second. Smaller means less recently used.
    pub fn recency(&self) -> (u64, u64) {
        (self.last_access, self.sequence)
    }

    // == Heap Index ==
    /// Returns the entry's current slot in the recency heap.
    pub fn heap_index(&self) -> usize {
        self.heap_index
    }

    // == Into Parts ==
    /// Consumes the entry, yielding its key and value.
    pub fn into_parts(self) -> (Vec<u8>, V) {
        (self.key, self.value)
    }
}

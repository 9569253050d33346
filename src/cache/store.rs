//! Cache Store Module
//!
//! The LRU cache façade combining the entry arena, the entry table and the
//! recency heap.

use tracing::{debug, info, trace};

use crate::cache::{
    AnyClock, CacheStats, Clock, Entry, EntryArena, EntryId, EntryTable, LogicalClock,
    RecencyHeap,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved at construction. Larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

// == LRU Cache ==
/// Fixed-capacity key-value cache that evicts the least recently used entry.
///
/// Keys are byte strings. Values are owned by the cache; `get` and `peek`
/// hand out borrows of the stored value and eviction moves it back out.
///
/// Every access (`get` hit or `put` on an existing key) restamps the entry
/// with the clock and a fresh access sequence, then fixes its heap slot, so
/// the heap root is always the entry touched longest ago. The sequence keeps
/// that order exact when a coarse clock hands out equal stamps.
#[derive(Debug)]
pub struct LruCache<V, C = LogicalClock> {
    /// Owns every live entry
    entries: EntryArena<V>,
    /// Key lookup
    table: EntryTable,
    /// Recency order
    heap: RecencyHeap,
    /// Access stamp source
    clock: C,
    /// Last access sequence handed out
    sequence: u64,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<V> LruCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, stamped by a
    /// logical clock.
    ///
    /// Fails with `CacheError::ZeroCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, LogicalClock::new())
    }
}

impl<V> LruCache<V, AnyClock> {
    // == From Config ==
    /// Creates a cache from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        info!(
            "Creating LRU cache: capacity={}, clock={}",
            config.capacity, config.clock
        );
        Self::with_clock(config.capacity, AnyClock::from(config.clock))
    }
}

impl<V, C: Clock> LruCache<V, C> {
    // == With Clock ==
    /// Creates a cache with an explicit clock.
    ///
    /// Only a bounded number of slots is reserved up front, so any positive
    /// capacity is accepted.
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }

        let reserve = capacity.min(PREALLOC_LIMIT);
        Ok(Self {
            entries: EntryArena::with_capacity(reserve),
            table: EntryTable::with_capacity(reserve),
            heap: RecencyHeap::with_capacity(reserve),
            clock,
            sequence: 0,
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks the entry as just used.
    ///
    /// Returns None on a miss; a miss changes nothing but the miss counter.
    pub fn get<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&V> {
        let key = key.as_ref();
        match self.table.lookup(key) {
            Some(id) => {
                self.stats.record_hit();
                self.touch(id);
                trace!("Cache hit: key_len={}", key.len());
                Some(&self.entries[id].value)
            }
            None => {
                self.stats.record_miss();
                trace!("Cache miss: key_len={}", key.len());
                None
            }
        }
    }

    // == Put ==
    /// Stores a value under `key`.
    ///
    /// An existing key is overwritten in place and marked as just used. A new
    /// key on a full cache first evicts the least recently used entry, which
    /// is returned as `(key, value)`.
    pub fn put<K: Into<Vec<u8>>>(&mut self, key: K, value: V) -> Option<(Vec<u8>, V)> {
        let key = key.into();

        if let Some(id) = self.table.lookup(&key) {
            self.entries[id].value = value;
            self.touch(id);
            self.stats.record_update();
            return None;
        }

        let evicted = if self.table.len() >= self.capacity {
            Some(self.evict_oldest())
        } else {
            None
        };

        let stamp = self.clock.tick();
        let sequence = self.next_sequence();
        let id = self
            .entries
            .insert(Entry::new(key.clone(), value, stamp, sequence));
        self.table.insert(key, id);
        self.heap.push(id, &mut self.entries);

        self.stats.record_insert();
        self.stats.set_total_entries(self.table.len());
        trace!(
            "Cache insert: stamp={}, entries={}",
            stamp,
            self.table.len()
        );

        evicted
    }

    // == Peek ==
    /// Retrieves a value without changing its recency.
    pub fn peek<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        self.table
            .lookup(key.as_ref())
            .map(|id| &self.entries[id].value)
    }

    // == Peek LRU ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&[u8], &V)> {
        self.heap.peek_min().map(|id| {
            let entry = &self.entries[id];
            (entry.key(), entry.value())
        })
    }

    // == Contains ==
    /// Checks if a key is present without changing its recency.
    pub fn contains<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.table.contains(key.as_ref())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    // == Capacity ==
    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.table.len());
        stats
    }

    // == Clear ==
    /// Drops every entry. Counters and the clock keep running.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.table.clear();
        self.heap.clear();
        self.stats.set_total_entries(0);
        debug!("Cache cleared");
    }

    /// Restamps an entry and restores heap order around it.
    fn touch(&mut self, id: EntryId) {
        let stamp = self.clock.tick();
        let sequence = self.next_sequence();
        let entry = &mut self.entries[id];
        entry.last_access = stamp;
        entry.sequence = sequence;
        let index = entry.heap_index;
        self.heap.fix(index, &mut self.entries);
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Removes the heap minimum from all three structures.
    ///
    /// Only called with `len == capacity >= 1`, so the heap cannot be empty.
    fn evict_oldest(&mut self) -> (Vec<u8>, V) {
        let Some(id) = self.heap.pop_min(&mut self.entries) else {
            unreachable!(
                "recency heap empty while entry table holds {} keys",
                self.table.len()
            );
        };
        let Some(entry) = self.entries.remove(id) else {
            unreachable!("recency heap held vacant entry slot {}", id.index());
        };

        self.table.remove(entry.key());
        self.stats.record_eviction();
        debug!(
            "Evicted least recently used entry: key_len={}, last_access={}",
            entry.key().len(),
            entry.last_access()
        );

        entry.into_parts()
    }
}

#[cfg(test)]
impl<V, C: Clock> LruCache<V, C> {
    /// Panics unless table, heap and arena describe the same entry set, every
    /// `heap_index` is accurate, and the root holds the oldest recency.
    pub(crate) fn assert_consistent(&self) {
        assert!(self.table.len() <= self.capacity, "capacity exceeded");
        assert_eq!(self.table.len(), self.heap.len(), "table/heap size mismatch");
        assert_eq!(self.table.len(), self.entries.len(), "table/arena size mismatch");

        for (key, id) in self.table.iter() {
            let entry = &self.entries[id];
            assert_eq!(entry.key(), key, "table key does not match entry key");
            assert_eq!(
                self.heap.get(entry.heap_index()),
                Some(id),
                "stale heap_index for entry"
            );
        }

        for (idx, id) in self.heap.iter().enumerate() {
            assert_eq!(self.entries[id].heap_index(), idx);
            if idx > 0 {
                let parent = self.heap.get((idx - 1) / 2).unwrap();
                assert!(self.entries[parent].recency() <= self.entries[id].recency());
            }
        }

        if let Some(root) = self.heap.peek_min() {
            let oldest = self
                .entries
                .iter()
                .map(|(_, entry)| entry.recency())
                .min()
                .unwrap();
            assert_eq!(self.entries[root].recency(), oldest, "root is not LRU");
        }
    }

    pub(crate) fn last_access_of(&self, key: &[u8]) -> Option<u64> {
        self.table
            .lookup(key)
            .map(|id| self.entries[id].last_access())
    }
}

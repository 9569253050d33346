//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of `get` calls that found their key
    pub hits: u64,
    /// Number of `get` calls for absent keys
    pub misses: u64,
    /// Number of new keys stored
    pub inserts: u64,
    /// Number of `put` calls that overwrote an existing key
    pub updates: u64,
    /// Number of entries evicted to make room for a new key
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Fixed maximum number of entries
    pub capacity: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Insert ==
    /// Increments the insert counter.
    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    // == Record Update ==
    /// Increments the overwrite counter.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

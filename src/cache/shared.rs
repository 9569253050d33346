//! Shared Cache Module
//!
//! Thread-safe handle around a single `LruCache`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheStats, Clock, LogicalClock, LruCache};
use crate::error::Result;

// == Shared LRU Cache ==
/// Cloneable handle to a cache guarded by one mutex.
///
/// `get` restamps and fixes the heap, so reads take the lock exclusively just
/// like writes. The lock is held for the whole operation.
#[derive(Debug)]
pub struct SharedLruCache<V, C = LogicalClock> {
    inner: Arc<Mutex<LruCache<V, C>>>,
}

impl<V, C> Clone for SharedLruCache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedLruCache<V> {
    // == Constructor ==
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_cache(LruCache::new(capacity)?))
    }
}

impl<V, C: Clock> SharedLruCache<V, C> {
    // == From Cache ==
    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<V, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Put ==
    /// Stores a value, returning the evicted entry if one was displaced.
    pub fn put<K: Into<Vec<u8>>>(&self, key: K, value: V) -> Option<(Vec<u8>, V)> {
        self.inner.lock().put(key, value)
    }

    // == Get ==
    /// Retrieves a copy of the value and marks the entry as just used.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    // == Contains ==
    /// Checks if a key is present without changing its recency.
    pub fn contains<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.inner.lock().contains(key)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Capacity ==
    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == With Lock ==
    /// Runs `f` with exclusive access to the underlying cache.
    ///
    /// Useful for borrowing values without cloning them.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<V, C>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_put_and_get() {
        let cache = SharedLruCache::new(2).unwrap();

        cache.put("a", "one".to_string());
        assert_eq!(cache.get("a"), Some("one".to_string()));
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_shared_clone_sees_same_cache() {
        let cache = SharedLruCache::new(2).unwrap();
        let other = cache.clone();

        other.put("a", 1);
        assert!(cache.contains("a"));
        assert_eq!(cache.stats().inserts, 1);
    }

    #[test]
    fn test_shared_concurrent_puts_respect_capacity() {
        let cache = SharedLruCache::new(16).unwrap();

        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100u32 {
                        let key = format!("t{}-k{}", t, i);
                        cache.put(key.clone(), i);
                        let _ = cache.get(&key);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
        assert_eq!(cache.stats().inserts, 400);
        assert_eq!(cache.stats().evictions, 384);
        cache.with_lock(|inner| inner.assert_consistent());
    }

    #[test]
    fn test_shared_with_lock_borrows() {
        let cache = SharedLruCache::new(1).unwrap();
        cache.put("a", vec![1u8, 2, 3]);

        let len = cache.with_lock(|inner| inner.peek("a").map(Vec::len));
        assert_eq!(len, Some(3));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 1);
    }
}

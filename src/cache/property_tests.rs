//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a straightforward reference LRU
//! and to verify table/heap consistency after every operation.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};

use crate::cache::LruCache;

// == Reference Model ==
/// Obvious O(n) LRU used as the oracle. Front of `order` is the oldest key.
#[derive(Debug)]
struct ModelLru {
    capacity: usize,
    order: VecDeque<Vec<u8>>,
    values: HashMap<Vec<u8>, u32>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            values: HashMap::new(),
        }
    }

    fn touch(&mut self, key: &[u8]) {
        self.order.retain(|k| k.as_slice() != key);
        self.order.push_back(key.to_vec());
    }

    fn put(&mut self, key: Vec<u8>, value: u32) -> Option<(Vec<u8>, u32)> {
        if self.values.contains_key(&key) {
            self.values.insert(key.clone(), value);
            self.touch(&key);
            return None;
        }

        let evicted = if self.values.len() >= self.capacity {
            self.order.pop_front().map(|k| {
                let v = self.values.remove(&k).unwrap();
                (k, v)
            })
        } else {
            None
        };

        self.values.insert(key.clone(), value);
        self.order.push_back(key);
        evicted
    }

    fn get(&mut self, key: &[u8]) -> Option<u32> {
        let value = self.values.get(key).copied();
        if value.is_some() {
            self.touch(key);
        }
        value
    }
}

// == Strategies ==
/// Small binary key space so puts collide and evictions are frequent.
fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..3)
}

/// Keys that are distinct from one another.
fn distinct_keys_strategy(range: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::hash_set(prop::collection::vec(any::<u8>(), 1..8), range)
        .prop_map(|set| set.into_iter().collect())
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: Vec<u8>, value: u32 },
    Get { key: Vec<u8> },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation returns what the reference LRU returns, and the
    // table, heap and arena stay in agreement with the root as the oldest.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    let evicted = cache.put(key.clone(), value);
                    prop_assert_eq!(evicted, model.put(key, value));
                }
                CacheOp::Get { key } => {
                    let value = cache.get(&key).copied();
                    prop_assert_eq!(value, model.get(&key));
                }
            }

            cache.assert_consistent();
            prop_assert_eq!(cache.len(), model.values.len());
            prop_assert_eq!(
                cache.peek_lru().map(|(k, _)| k.to_vec()),
                model.order.front().cloned()
            );
        }
    }

    // The number of entries never exceeds capacity.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..16,
        entries in prop::collection::vec((key_strategy(), any::<u32>()), 1..200)
    ) {
        let mut cache = LruCache::new(capacity).unwrap();

        for (key, value) in entries {
            cache.put(key, value);
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // Filling past capacity with no reads evicts the first key only.
    #[test]
    fn prop_lru_eviction_order(keys in distinct_keys_strategy(2..12)) {
        let capacity = keys.len() - 1;
        let mut cache = LruCache::new(capacity).unwrap();

        for (i, key) in keys.iter().enumerate() {
            cache.put(key.clone(), i);
        }

        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(!cache.contains(&keys[0]), "First key should have been evicted");
        for (i, key) in keys.iter().enumerate().skip(1) {
            prop_assert_eq!(cache.get(key), Some(&i));
        }
    }

    // Reading the oldest key protects it; the next oldest is evicted instead.
    #[test]
    fn prop_get_refreshes_recency(keys in distinct_keys_strategy(3..10)) {
        let (new_key, initial) = keys.split_last().unwrap();
        let capacity = initial.len();
        let mut cache = LruCache::new(capacity).unwrap();

        for key in initial {
            cache.put(key.clone(), ());
        }

        prop_assert!(cache.get(&initial[0]).is_some());
        let evicted = cache.put(new_key.clone(), ());

        prop_assert_eq!(evicted.map(|(k, _)| k), Some(initial[1].clone()));
        prop_assert!(cache.contains(&initial[0]), "Accessed key should survive");
        prop_assert!(cache.contains(new_key));
    }

    // A second put on the same key replaces the value without adding an entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in any::<u32>(),
        value2 in any::<u32>()
    ) {
        let mut cache = LruCache::new(4).unwrap();

        cache.put(key.clone(), value1);
        prop_assert!(cache.put(key.clone(), value2).is_none());

        prop_assert_eq!(cache.get(&key), Some(&value2));
        prop_assert_eq!(cache.len(), 1);
        prop_assert_eq!(cache.stats().updates, 1);
    }

    // A miss leaves the entry count and the eviction candidate untouched.
    #[test]
    fn prop_miss_does_not_alter_order(
        capacity in 1usize..8,
        entries in prop::collection::vec((key_strategy(), any::<u32>()), 1..50),
        missing_key in prop::collection::vec(4u8..8, 1..3)
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        for (key, value) in entries {
            cache.put(key, value);
        }

        let len_before = cache.len();
        let lru_before = cache.peek_lru().map(|(k, v)| (k.to_vec(), *v));
        let stamp_before = lru_before.as_ref().and_then(|(k, _)| cache.last_access_of(k));

        // Bytes 4..8 never appear in the key strategy, so this always misses
        prop_assert_eq!(cache.get(&missing_key), None);

        prop_assert_eq!(cache.len(), len_before);
        prop_assert_eq!(cache.peek_lru().map(|(k, v)| (k.to_vec(), *v)), lru_before.clone());
        prop_assert_eq!(
            lru_before.as_ref().and_then(|(k, _)| cache.last_access_of(k)),
            stamp_before
        );
        cache.assert_consistent();
    }
}

//! heap_lru - A fixed-capacity LRU cache
//!
//! Stores values under byte-string keys and evicts the least recently used
//! entry when full. Recency is tracked with an indexed binary min-heap.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, Clock, LogicalClock, LruCache, SharedLruCache, SystemClock};
pub use config::{ClockKind, Config};
pub use error::{CacheError, Result};

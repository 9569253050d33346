//! Cache Module
//!
//! Provides a fixed-capacity LRU cache whose recency order lives in an
//! indexed binary min-heap.

mod arena;
mod clock;
mod entry;
mod heap;
mod shared;
mod stats;
mod store;
mod table;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use arena::{EntryArena, EntryId};
pub use clock::{AnyClock, Clock, LogicalClock, SystemClock};
pub use entry::Entry;
pub use heap::RecencyHeap;
pub use shared::SharedLruCache;
pub use stats::CacheStats;
pub use store::LruCache;
pub use table::EntryTable;

//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and configuration.
///
/// Lookups and inserts never fail; a miss is reported as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be at least one entry
    #[error("Cache capacity must be greater than zero")]
    ZeroCapacity,

    /// Configuration value could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Clock Kind ==
/// Which clock stamps entry accesses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Monotonic counter, exact recency order
    #[default]
    Logical,
    /// Unix seconds, accesses within one second tie
    System,
}

impl FromStr for ClockKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logical" => Ok(ClockKind::Logical),
            "system" => Ok(ClockKind::System),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown clock kind '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockKind::Logical => write!(f, "logical"),
            ClockKind::System => write!(f, "system"),
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Clock used to stamp accesses
    #[serde(default)]
    pub clock: ClockKind,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `LRU_CLOCK` - `logical` or `system` (default: logical)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("LRU_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            clock: env::var("LRU_CLOCK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Checks that the configuration describes a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            clock: ClockKind::Logical,
        }
    }
}

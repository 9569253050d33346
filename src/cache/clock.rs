//! Clock Module
//!
//! Sources of access stamps used to order entries by recency.

use chrono::Utc;

use crate::config::ClockKind;

// == Clock Trait ==
/// Produces the stamp recorded on every entry access.
pub trait Clock {
    /// Returns the stamp for an access happening now.
    fn tick(&mut self) -> u64;
}

// == Logical Clock ==
/// Strictly increasing counter. No two accesses share a stamp, so recency
/// order is exact.
#[derive(Debug, Clone, Default)]
pub struct LogicalClock {
    last: u64,
}

impl LogicalClock {
    // == Constructor ==
    /// Creates a clock whose first tick is 1.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for LogicalClock {
    fn tick(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

// == System Clock ==
/// Wall-clock Unix seconds.
///
/// Accesses within the same second get equal stamps; the cache orders those
/// by its own access sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn tick(&mut self) -> u64 {
        Utc::now().timestamp().max(0) as u64
    }
}

// == Any Clock ==
/// Clock chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyClock {
    Logical(LogicalClock),
    System(SystemClock),
}

impl Clock for AnyClock {
    fn tick(&mut self) -> u64 {
        match self {
            AnyClock::Logical(clock) => clock.tick(),
            AnyClock::System(clock) => clock.tick(),
        }
    }
}

impl From<ClockKind> for AnyClock {
    fn from(kind: ClockKind) -> Self {
        match kind {
            ClockKind::Logical => AnyClock::Logical(LogicalClock::new()),
            ClockKind::System => AnyClock::System(SystemClock),
        }
    }
}

//! Time handling for the sample path
//!
//! The core never reads a clock itself. Drivers stamp each sample with
//! whatever monotonic nanosecond clock they have (kernel boot time, a
//! hardware timer, `Instant` on a host) and the core only ever subtracts
//! two stamps from the same clock.
//!
//! `TimeSource` exists for callers that want to inject that clock, and for
//! tests that need to step it deterministically.

use crate::constants::NS_PER_US;

/// Timestamp in nanoseconds on a monotonic clock
pub type Timestamp = u64;

/// Source of sample timestamps
pub trait TimeSource {
    /// Current timestamp in nanoseconds
    fn now(&self) -> Timestamp;
}

/// Time elapsed between two stamps, zero if the clock went backwards
#[inline]
pub fn elapsed_ns(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

/// Convert a period in microseconds to nanoseconds
#[inline]
pub fn us_to_ns(us: u32) -> u64 {
    u64::from(us) * NS_PER_US
}

/// Monotonic time source backed by `std::time::Instant`
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Start counting from now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_nanos() as Timestamp
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Start at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Step the clock forward by `us` microseconds
    pub fn advance_us(&mut self, us: u32) {
        self.timestamp += us_to_ns(us);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

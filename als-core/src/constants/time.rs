//! Time Unit Conversions
//!
//! Timestamps are nanoseconds, requested periods are microseconds and the
//! poll delay handed back to drivers is milliseconds.

/// Nanoseconds per microsecond.
pub const NS_PER_US: u64 = 1_000;

/// Microseconds per millisecond.
pub const US_PER_MS: u32 = 1_000;

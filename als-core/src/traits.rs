//! Core traits
//!
//! The only seam between the core and the outside world is where a
//! calibrated value leaves it. Keep it simple: one call, no return value.

use crate::time::Timestamp;

/// Sink for calibrated lux values
///
/// Called at most once per processed sample. Implementations forward the
/// value to whatever consumes it (sysfs attribute, input event, IIO buffer,
/// a channel in a host-side simulator).
pub trait LuxReporter {
    /// Deliver a calibrated value and the timestamp of the sample it came from
    fn report(&mut self, lux: u32, timestamp: Timestamp);
}

impl<F> LuxReporter for F
where
    F: FnMut(u32, Timestamp),
{
    fn report(&mut self, lux: u32, timestamp: Timestamp) {
        self(lux, timestamp)
    }
}

/// Reporter that drops every value
///
/// Useful while priming a sensor when only thresholds and poll timing matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardReporter;

impl LuxReporter for DiscardReporter {
    fn report(&mut self, _lux: u32, _timestamp: Timestamp) {}
}

/// Reporter that keeps the most recent value
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LastValue {
    /// Most recent `(lux, timestamp)`, if anything was reported
    pub last: Option<(u32, Timestamp)>,
    /// Number of values received
    pub count: u32,
}

impl LuxReporter for LastValue {
    fn report(&mut self, lux: u32, timestamp: Timestamp) {
        self.last = Some((lux, timestamp));
        self.count = self.count.saturating_add(1);
    }
}

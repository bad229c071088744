//! Shared fixtures for integration tests
//!
//! Provides:
//! - Typical sensor configurations (sub-unit scale, 16-bit counter)
//! - A three-entry resolution table
//! - A driver harness that feeds samples on a simulated clock

#![allow(dead_code)]

use als_core::{
    time::{FixedTime, TimeSource},
    AmbientLight, Disposition, FixedPoint, LightConfig, LuxReporter, ResolutionEntry,
    ResolutionTable, Timestamp,
};

/// 16-bit counter
pub const HW_MASK: u32 = 0xFFFF;

/// Requested sampling period used by most tests (µs)
pub const DELAY_US: u32 = 100_000;

/// 0.01 lux/count reported against a 0.01 scale
pub fn basic_config() -> LightConfig {
    LightConfig {
        resolution: FixedPoint::new(0, 10_000_000),
        scale: FixedPoint::new(0, 10_000_000),
        thresh_lo: 100,
        thresh_hi: 100,
        report_n: 1,
        delay_us_min: 50_000,
        ..LightConfig::default()
    }
}

/// Gain table: fine, medium, wide
pub fn resolution_entries() -> [ResolutionEntry; 3] {
    [
        ResolutionEntry::new(
            FixedPoint::new(0, 5_000_000),
            FixedPoint::from_int(327),
            FixedPoint::new(0, 100_000_000),
            400,
        ),
        ResolutionEntry::new(
            FixedPoint::new(0, 20_000_000),
            FixedPoint::from_int(1310),
            FixedPoint::new(0, 110_000_000),
            200,
        ),
        ResolutionEntry::new(
            FixedPoint::new(0, 80_000_000),
            FixedPoint::from_int(5242),
            FixedPoint::new(0, 120_000_000),
            100,
        ),
    ]
}

/// Table limited to `[lo, hi]`
pub fn resolution_table(lo: u32, hi: u32) -> ResolutionTable {
    ResolutionTable::new(&resolution_entries(), lo, hi).unwrap()
}

/// Reporter that records everything it receives
#[derive(Debug, Default)]
pub struct Captured {
    pub reports: Vec<(u32, Timestamp)>,
}

impl Captured {
    pub fn count(&self) -> usize {
        self.reports.len()
    }

    pub fn last(&self) -> Option<(u32, Timestamp)> {
        self.reports.last().copied()
    }
}

impl LuxReporter for Captured {
    fn report(&mut self, lux: u32, timestamp: Timestamp) {
        self.reports.push((lux, timestamp));
    }
}

/// Simulated driver: owns the sensor, a clock and a report sink
pub struct Driver {
    pub light: AmbientLight,
    pub clock: FixedTime,
    pub sink: Captured,
}

impl Driver {
    /// Enabled sensor sampling every [`DELAY_US`]
    pub fn new(light: AmbientLight) -> Self {
        let mut light = light;
        light.delay_us = DELAY_US;
        light.enable();
        Self {
            light,
            clock: FixedTime::new(0),
            sink: Captured::default(),
        }
    }

    /// Advance the clock by `after_us`, then feed `hw`
    pub fn step(&mut self, hw: u32, after_us: u32) -> Disposition {
        self.clock.advance_us(after_us);
        self.light.sample(hw, self.clock.now());
        self.light.read(&mut self.sink)
    }

    /// Feed `hw` once per sampling period
    pub fn step_period(&mut self, hw: u32) -> Disposition {
        self.step(hw, self.light.delay_us)
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

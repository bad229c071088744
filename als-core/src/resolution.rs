//! Dynamic resolution (gain ranging) tables
//!
//! ## Motivation
//!
//! A fixed gain can't cover both a dark room (a few lux) and direct sun
//! (tens of thousands of lux) with useful precision. Many ALS parts offer
//! several gain/integration-time settings; the driver lists them in a table
//! and the core walks up and down it as readings saturate:
//!
//! ```text
//! index:        0          1          2          3
//!           high gain ──────────────────────► low gain
//!           fine resolution                   wide range
//!           long integration                  short integration
//! ```
//!
//! - Reading pinned at the top of the counter → move to `index + 1`
//! - Reading at (or near) zero → move to `index - 1`
//!
//! One step per sample, and never outside `[index_lo, index_hi]`. Those two
//! bounds come from board configuration (see [`crate::limits`]) because the
//! usable part of the table depends on the cover glass in front of the
//! sensor, not on the sensor alone.
//!
//! Sensors start at `index_hi`, the widest range, so the first reading can't
//! saturate regardless of ambient light.

use heapless::Vec;

use crate::constants::MAX_RESOLUTION_ENTRIES;
use crate::errors::{ConfigError, ConfigResult};
use crate::fixed_point::FixedPoint;

/// One gain/integration setting of a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolutionEntry {
    /// Lux per raw count at this setting
    pub resolution: FixedPoint,
    /// Largest lux value measurable at this setting
    pub max_range: FixedPoint,
    /// Supply current at this setting
    pub milliamp: FixedPoint,
    /// Shortest sampling period at this setting (integration time)
    pub delay_min_ms: u32,
}

impl ResolutionEntry {
    /// Build a table entry
    pub const fn new(
        resolution: FixedPoint,
        max_range: FixedPoint,
        milliamp: FixedPoint,
        delay_min_ms: u32,
    ) -> Self {
        Self { resolution, max_range, milliamp, delay_min_ms }
    }
}

/// Ordered resolution table with its legal index range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTable {
    entries: Vec<ResolutionEntry, MAX_RESOLUTION_ENTRIES>,
    index_lo: usize,
    index_hi: usize,
}

impl ResolutionTable {
    /// Build a table and validate the index limits against it
    ///
    /// Fails when the table is empty or too large, when `index_hi < index_lo`
    /// or when `index_hi` points past the last entry.
    pub fn new(entries: &[ResolutionEntry], index_lo: u32, index_hi: u32) -> ConfigResult<Self> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        let entries = Vec::from_slice(entries).map_err(|_| ConfigError::TableFull {
            capacity: MAX_RESOLUTION_ENTRIES,
        })?;

        if index_hi < index_lo {
            log_warn!("Resolution index limits inverted: {} > {}", index_lo, index_hi);
            return Err(ConfigError::InvertedLimits { lo: index_lo, hi: index_hi });
        }

        if index_hi as usize >= entries.len() {
            log_warn!(
                "Resolution index limit {} outside table of {}",
                index_hi,
                entries.len()
            );
            return Err(ConfigError::IndexOutOfTable {
                index: index_hi,
                len: entries.len(),
            });
        }

        Ok(Self {
            entries,
            index_lo: index_lo as usize,
            index_hi: index_hi as usize,
        })
    }

    /// Build a table that may use every entry
    pub fn full_range(entries: &[ResolutionEntry]) -> ConfigResult<Self> {
        let hi = entries.len().saturating_sub(1) as u32;
        Self::new(entries, 0, hi)
    }

    /// All entries, including those outside the legal range
    pub fn entries(&self) -> &[ResolutionEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&ResolutionEntry> {
        self.entries.get(index)
    }

    /// Lowest legal index (highest gain in use)
    pub fn index_lo(&self) -> usize {
        self.index_lo
    }

    /// Highest legal index (widest range in use); the starting point
    pub fn index_hi(&self) -> usize {
        self.index_hi
    }

    /// Next index to try when the reading is saturated high
    pub fn step_up(&self, index: usize) -> Option<usize> {
        (index < self.index_hi).then(|| index + 1)
    }

    /// Next index to try when the reading is saturated low
    pub fn step_down(&self, index: usize) -> Option<usize> {
        (index > self.index_lo).then(|| index - 1)
    }
}

//! Configuration Errors
//!
//! ## Design Philosophy
//!
//! The sample path (`AmbientLight::read`) cannot fail: every numeric case is
//! defined for the full input domain and the one divide-by-zero case is
//! guarded. Errors therefore only come out of setup, when the static
//! configuration is assembled from device properties or a JSON file.
//!
//! Like everything else in this crate, errors are:
//!
//! 1. **Small and Copy**: no String, only `&'static str` and integers.
//! 2. **Heap-free**: usable on targets without an allocator.
//! 3. **Actionable**: each variant names the offending value.
//!
//! ## Handling
//!
//! ```rust
//! use als_core::{ConfigError, ResolutionEntry, ResolutionTable, FixedPoint};
//!
//! let entries = [ResolutionEntry::new(FixedPoint::from_int(1), FixedPoint::from_int(65535), FixedPoint::new(0, 90_000_000), 100)];
//! match ResolutionTable::new(&entries, 0, 3) {
//!     Ok(_) => {}
//!     Err(ConfigError::IndexOutOfTable { index, len }) => {
//!         // DT limit points past the end of the driver's table
//!         assert_eq!((index, len), (3, 1));
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which end of the dynamic resolution index range a property describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitBound {
    /// `<dev>_dynamic_resolution_index_limit_low`
    Low,
    /// `<dev>_dynamic_resolution_index_limit_high`
    High,
}

impl LimitBound {
    /// Property name suffix for this bound
    pub const fn suffix(&self) -> &'static str {
        match self {
            LimitBound::Low => "low",
            LimitBound::High => "high",
        }
    }
}

impl core::fmt::Display for LimitBound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Setup-time configuration errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A required resolution index limit property was not found
    #[error("Missing dynamic resolution index limit ({bound})")]
    MissingLimit {
        /// Which limit is missing
        bound: LimitBound,
    },

    /// High index limit is below the low index limit
    #[error("Dynamic resolution index limits inverted: low {lo} > high {hi}")]
    InvertedLimits {
        /// Configured low index
        lo: u32,
        /// Configured high index
        hi: u32,
    },

    /// Index limit points outside the resolution table
    #[error("Resolution index {index} outside table of {len} entries")]
    IndexOutOfTable {
        /// Offending index
        index: u32,
        /// Number of table entries
        len: usize,
    },

    /// Resolution table has no entries
    #[error("Resolution table is empty")]
    EmptyTable,

    /// Resolution table larger than the fixed capacity
    #[error("Resolution table exceeds capacity of {capacity} entries")]
    TableFull {
        /// Maximum number of entries
        capacity: usize,
    },

    /// Device name too long to build a property name from
    #[error("Device name too long for property lookup")]
    NameTooLong,

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What went wrong
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::MissingLimit { bound } =>
                defmt::write!(fmt, "Missing index limit ({})", bound.suffix()),
            Self::InvertedLimits { lo, hi } =>
                defmt::write!(fmt, "Index limits inverted: {} > {}", lo, hi),
            Self::IndexOutOfTable { index, len } =>
                defmt::write!(fmt, "Index {} outside table of {}", index, len),
            Self::EmptyTable =>
                defmt::write!(fmt, "Empty resolution table"),
            Self::TableFull { capacity } =>
                defmt::write!(fmt, "Table exceeds {} entries", capacity),
            Self::NameTooLong =>
                defmt::write!(fmt, "Device name too long"),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid configuration: {}", reason),
        }
    }
}

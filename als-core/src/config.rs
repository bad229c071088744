//! Static sensor configuration
//!
//! Everything here is decided before the sensor is enabled and only read by
//! the sample path, with one exception: selecting a resolution table entry
//! copies that entry's resolution, range, current and minimum delay into
//! the active [`LightConfig`].
//!
//! ## Loading
//!
//! Drivers normally fill [`LightConfig`] from board properties. On hosts
//! (simulators, bring-up tools, tests) the whole setup can be loaded from
//! JSON instead:
//!
//! ```json
//! {
//!   "hw_mask": 65535,
//!   "config": {
//!     "scale": { "ival": 0, "fval": 10000000 },
//!     "thresh_lo": 50, "thresh_hi": 50, "report_n": 1,
//!     "uncal_lo": 0, "uncal_hi": 0, "cal_lo": 0, "cal_hi": 0
//!   },
//!   "table": {
//!     "entries": [
//!       { "resolution": { "fval": 5000000 }, "max_range": { "ival": 327 },
//!         "milliamp": { "fval": 120000000 }, "delay_min_ms": 400 }
//!     ],
//!     "limits": { "lo": 0, "hi": 0 }
//!   }
//! }
//! ```
//!
//! Missing numeric fields default to zero.

use heapless::Vec;

use crate::calibration::CalibrationPoints;
use crate::constants::{MAX_RESOLUTION_ENTRIES, US_PER_MS};
use crate::errors::{ConfigError, ConfigResult};
use crate::fixed_point::FixedPoint;
use crate::light::AmbientLight;
use crate::limits::IndexLimits;
use crate::resolution::{ResolutionEntry, ResolutionTable};

/// Calibration model and reporting policy of one sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightConfig {
    /// Lux per raw count
    pub resolution: FixedPoint,
    /// Largest measurable value at the active resolution
    pub max_range: FixedPoint,
    /// Supply current at the active resolution
    pub milliamp: FixedPoint,
    /// Scale applied downstream; `(1, 0)` enables calibration mode
    pub scale: FixedPoint,
    /// Offset applied downstream
    pub offset: FixedPoint,
    /// Linear value measured at the low calibration point
    pub uncal_lo: i32,
    /// Linear value measured at the high calibration point
    pub uncal_hi: i32,
    /// Reference lux at the low calibration point
    pub cal_lo: i32,
    /// Reference lux at the high calibration point
    pub cal_hi: i32,
    /// Raw counts below the last report that trigger a new one
    pub thresh_lo: u32,
    /// Raw counts above the last report that trigger a new one
    pub thresh_hi: u32,
    /// Samples reported after each trigger (0 behaves as 1)
    pub report_n: u32,
    /// Shortest poll delay in microseconds
    pub delay_us_min: u32,
}

impl LightConfig {
    /// Calibration anchors as a unit
    pub fn calibration_points(&self) -> CalibrationPoints {
        CalibrationPoints {
            uncal_lo: self.uncal_lo,
            uncal_hi: self.uncal_hi,
            cal_lo: self.cal_lo,
            cal_hi: self.cal_hi,
        }
    }

    /// True when `scale` is the calibration-mode sentinel
    pub fn calibration_scale(&self) -> bool {
        self.scale.is_one()
    }

    /// Make a resolution table entry the active setting
    pub fn apply_entry(&mut self, entry: &ResolutionEntry) {
        self.resolution = entry.resolution;
        self.max_range = entry.max_range;
        self.milliamp = entry.milliamp;
        self.delay_us_min = entry.delay_min_ms.saturating_mul(US_PER_MS);
    }
}

/// Resolution table as stored in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSetup {
    /// Table entries, highest gain first
    pub entries: Vec<ResolutionEntry, MAX_RESOLUTION_ENTRIES>,
    /// Legal index range
    pub limits: IndexLimits,
}

impl TableSetup {
    /// Validate and build the runtime table
    pub fn build(&self) -> ConfigResult<ResolutionTable> {
        self.limits.table(&self.entries)
    }
}

/// Complete static setup of one sensor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSetup {
    /// Largest raw value the hardware produces
    pub hw_mask: u32,
    /// Calibration and reporting policy
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: LightConfig,
    /// Dynamic resolution table, for sensors with gain ranging
    #[cfg_attr(feature = "serde", serde(default))]
    pub table: Option<TableSetup>,
}

impl SensorSetup {
    /// Setup without dynamic resolution
    pub fn new(hw_mask: u32, config: LightConfig) -> Self {
        Self { hw_mask, config, table: None }
    }

    /// Check the setup without building anything
    pub fn validate(&self) -> ConfigResult<()> {
        if self.hw_mask == 0 {
            log_warn!("Sensor setup rejected: hw_mask is zero");
            return Err(ConfigError::InvalidConfig { reason: "hw_mask must be non-zero" });
        }
        if !self.config.scale.is_normalized() {
            log_warn!(
                "Sensor setup rejected: scale ({}, {}) not normalized",
                self.config.scale.ival,
                self.config.scale.fval
            );
            return Err(ConfigError::InvalidConfig { reason: "scale fraction out of range" });
        }
        if let Some(table) = &self.table {
            table.build()?;
        }
        Ok(())
    }

    /// Build the runtime state for this setup
    ///
    /// The returned sensor still has to be enabled before sampling.
    pub fn build(&self) -> ConfigResult<AmbientLight> {
        self.validate()?;
        let light = match &self.table {
            Some(table) => AmbientLight::with_table(self.config, self.hw_mask, table.build()?),
            None => AmbientLight::new(self.config, self.hw_mask),
        };
        Ok(light)
    }

    /// Parse and validate a JSON setup
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let setup: Self = serde_json::from_str(json).map_err(|_e| {
            log_warn!("Malformed sensor setup: {}", _e);
            ConfigError::InvalidConfig { reason: "malformed JSON setup" }
        })?;
        setup.validate()?;
        Ok(setup)
    }

    /// Read, parse and validate a JSON setup file
    #[cfg(all(feature = "std", feature = "json"))]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|_e| {
            log_warn!("Can't read sensor setup {}: {}", path.as_ref().display(), _e);
            ConfigError::InvalidConfig { reason: "unreadable setup file" }
        })?;
        Self::from_json(&json)
    }

    /// Serialize to JSON
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> ConfigResult<alloc::string::String> {
        serde_json::to_string(self)
            .map_err(|_| ConfigError::InvalidConfig { reason: "setup not serializable" })
    }
}

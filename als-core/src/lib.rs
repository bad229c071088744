//! Sample-processing core for ambient light sensor (ALS) drivers
//!
//! Chip-specific drivers read the hardware register and hand the raw value
//! to this crate. Everything after that lives here:
//! - raw value to calibrated lux (fixed-point, no floats)
//! - report rate limiting and report bursts
//! - interrupt threshold windows around the last reported value
//! - dynamic resolution (gain ranging) for sensors that support it
//! - the next poll delay
//!
//! Key constraints:
//! - No heap allocation in the sample path
//! - One owned state per physical sensor, no globals
//! - Bit-for-bit compatible thresholds and calibration math
//!
//! ```no_run
//! use als_core::{AmbientLight, Disposition, LightConfig, FixedPoint};
//!
//! let config = LightConfig {
//!     resolution: FixedPoint::new(0, 10_000_000),
//!     scale: FixedPoint::new(0, 10_000_000),
//!     thresh_lo: 50,
//!     thresh_hi: 50,
//!     ..LightConfig::default()
//! };
//! let mut light = AmbientLight::new(config, 0xFFFF);
//! light.enable();
//!
//! // Driver interrupt/poll path
//! light.sample(1234, 1_000_000_000);
//! match light.read(&mut |_lux: u32, _ts: u64| { /* push to sysfs, input, ... */ }) {
//!     Disposition::UpdateThresholds => { /* program light.hw_thresh_lo/hi */ }
//!     Disposition::PollNext => { /* re-arm timer with light.poll_delay_ms */ }
//!     Disposition::NoChange => {}
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Optional logging, compiled out when the `log` feature is off
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub mod calibration;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fixed_point;
pub mod light;
pub mod limits;
pub mod resolution;
pub mod time;
pub mod traits;

// Public API
pub use calibration::{interpolate, CalibrationPoints};
pub use config::{LightConfig, SensorSetup, TableSetup};
pub use errors::{ConfigError, ConfigResult, LimitBound};
pub use fixed_point::FixedPoint;
pub use light::{AmbientLight, Disposition};
pub use limits::{read_index_limits, IndexLimits, PropertySource};
pub use resolution::{ResolutionEntry, ResolutionTable};
pub use time::Timestamp;
pub use traits::LuxReporter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

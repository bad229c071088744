//! Constants for the ALS core
//!
//! Numeric values shared by the calibration math, the sample processor and
//! the configuration loaders live here, grouped by domain:
//! - **Light**: fixed-point significance, threshold sentinels, table sizes
//! - **Time**: unit conversions for the nanosecond clock and µs/ms delays
//!
//! Values that must match existing device configurations bit-for-bit
//! (significance, sentinels) are not tunable.

/// Fixed-point, threshold and table constants.
pub mod light;

/// Time unit conversions.
pub mod time;

pub use light::{
    SCALE_SIGNIFICANCE, HW_THRESH_LO_DISABLED, HW_THRESH_HI_DISABLED,
    DEFAULT_DEVICE_NAME, MAX_RESOLUTION_ENTRIES, MAX_PROPERTY_NAME,
};

pub use time::{NS_PER_US, US_PER_MS};

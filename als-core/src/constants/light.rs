//! Light Sensor Constants
//!
//! Fixed-point format, hardware threshold sentinels and storage limits.

// ===== FIXED-POINT FORMAT =====

/// Significance of the fractional part of a [`FixedPoint`](crate::FixedPoint).
///
/// A value is `ival + fval / SCALE_SIGNIFICANCE`, so `fval` counts
/// nano-units. Device configurations are tuned against this exact
/// constant; changing it changes every calibrated value.
pub const SCALE_SIGNIFICANCE: i64 = 1_000_000_000;

// ===== HARDWARE THRESHOLDS =====

/// Low interrupt threshold that no reading can fall below.
///
/// Programmed at enable so the first sample is always outside the window.
pub const HW_THRESH_LO_DISABLED: u32 = u32::MAX;

/// High interrupt threshold that every non-zero reading exceeds.
pub const HW_THRESH_HI_DISABLED: u32 = 0;

// ===== CONFIGURATION =====

/// Device name used to build limit property names when none is given.
///
/// Gives `light_dynamic_resolution_index_limit_low` and `..._high`.
pub const DEFAULT_DEVICE_NAME: &str = "light";

/// Maximum number of dynamic resolution table entries.
///
/// Real parts ship between 2 and 8 gain/integration settings.
pub const MAX_RESOLUTION_ENTRIES: usize = 16;

/// Maximum length of a generated property name.
pub const MAX_PROPERTY_NAME: usize = 64;

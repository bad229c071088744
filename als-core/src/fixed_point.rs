//! Integer + fraction fixed-point values
//!
//! Device configurations express every non-integer quantity (resolution,
//! scale, offset, max range, current draw) as a pair of integers:
//!
//! ```text
//! value = ival + fval / SCALE_SIGNIFICANCE        (SCALE_SIGNIFICANCE = 10^9)
//!
//! 0.0125  → ival = 0, fval = 12_500_000
//! 1.5     → ival = 1, fval = 500_000_000
//! ```
//!
//! Floating point is never used: calibrations tuned against the integer
//! math on one platform must reproduce exactly on every other.

use crate::constants::SCALE_SIGNIFICANCE;

/// Fixed-point value with a decimal fraction in nano-units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPoint {
    /// Integer part
    #[cfg_attr(feature = "serde", serde(default))]
    pub ival: i32,
    /// Fractional part in units of `1 / SCALE_SIGNIFICANCE`
    #[cfg_attr(feature = "serde", serde(default))]
    pub fval: i32,
}

impl FixedPoint {
    /// Zero
    pub const ZERO: Self = Self::new(0, 0);

    /// Exactly one; as a scale it switches on calibration mode
    pub const ONE: Self = Self::new(1, 0);

    /// Build from integer and fractional parts
    pub const fn new(ival: i32, fval: i32) -> Self {
        Self { ival, fval }
    }

    /// Build an integer value
    pub const fn from_int(ival: i32) -> Self {
        Self { ival, fval: 0 }
    }

    /// True when both parts are zero
    pub const fn is_zero(&self) -> bool {
        self.ival == 0 && self.fval == 0
    }

    /// True for exactly `1.0` with no fraction
    pub const fn is_one(&self) -> bool {
        self.ival == 1 && self.fval == 0
    }

    /// True when `fval` is a proper fraction of `ival`
    ///
    /// Values with an integer part need `0 <= fval < SCALE_SIGNIFICANCE`.
    /// Pure fractions (`ival == 0`) may carry the sign in `fval`.
    pub const fn is_normalized(&self) -> bool {
        self.ival == 0 || (self.fval >= 0 && (self.fval as i64) < SCALE_SIGNIFICANCE)
    }

    /// Whole value in nano-units
    pub const fn to_nano(&self) -> i64 {
        self.ival as i64 * SCALE_SIGNIFICANCE + self.fval as i64
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FixedPoint {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "({}, {})", self.ival, self.fval)
    }
}

//! Raw-to-lux conversion
//!
//! ## Pipeline
//!
//! A raw count becomes lux in two steps:
//!
//! ```text
//! hw ──(× resolution ÷ scale)──► linear value ──(2-point interpolation)──► lux
//! ```
//!
//! ### Linear Value
//!
//! The downstream framework multiplies whatever we report by `scale` (and
//! adds `offset`). To keep every significant digit through that step we
//! report `hw × resolution ÷ scale`, so that `reported × scale` lands back
//! on `hw × resolution`. The integer and fractional halves of `resolution`
//! are scaled separately and summed:
//!
//! ```text
//! calc_i = (SCALE_SIGNIFICANCE / scale.fval) × hw × resolution.ival
//! calc_f = hw × resolution.fval / scale.fval
//! ```
//!
//! The quotient `SCALE_SIGNIFICANCE / scale.fval` is truncated before the
//! multiply. Existing device calibrations were tuned against that
//! truncation, so it is kept for sub-unit scales. Scales of one or more
//! (calibration mode included) divide by the full nano-unit scale instead,
//! and a scale whose value is zero counts as `1.0`.
//!
//! ### Interpolation
//!
//! Two anchor points measured against a reference meter correct for glass,
//! IR leakage and part-to-part spread:
//!
//! ```text
//!          cal_hi ┤            ●
//!                 │          ╱
//!   lux           │        ╱
//!                 │      ╱
//!          cal_lo ┤    ●
//!                 └────┬───────┬──────
//!                  uncal_lo  uncal_hi      linear value
//! ```
//!
//! The line through both anchors is extended beyond them on either side.
//! With `uncal_lo == uncal_hi` (nothing configured) the linear value passes
//! straight through. Lux is never negative.

use crate::constants::SCALE_SIGNIFICANCE;
use crate::fixed_point::FixedPoint;

/// Clamp a signed intermediate into the unsigned output range
#[inline]
fn clamp_to_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Linear interpolation through `(x1, y1)` and `(x3, y3)` evaluated at `x2`
///
/// `y2 = y1 + (x2 - x1) × (y3 - y1) / (x3 - x1)` in 64-bit signed math with
/// truncating division. A degenerate range (`x1 == x3`) returns `x2`.
/// Results are clamped into `0..=u32::MAX`.
pub fn interpolate(x1: i32, x2: i64, x3: i32, y1: i32, y3: i32) -> u32 {
    let divisor = i64::from(x3) - i64::from(x1);
    if divisor == 0 {
        return clamp_to_u32(x2);
    }

    let dividend = x2
        .saturating_sub(i64::from(x1))
        .saturating_mul(i64::from(y3) - i64::from(y1));
    clamp_to_u32((dividend / divisor).saturating_add(i64::from(y1)))
}

/// `hw × resolution ÷ scale`, see the module docs for the exact rounding
pub fn linear_value(hw: u32, resolution: FixedPoint, scale: FixedPoint) -> i64 {
    let hw = i64::from(hw);

    if scale.ival == 0 && scale.fval != 0 {
        let divisor = i64::from(scale.fval);
        let calc_f = if resolution.fval != 0 {
            hw.saturating_mul(i64::from(resolution.fval)) / divisor
        } else {
            0
        };
        let calc_i = if resolution.ival != 0 {
            (SCALE_SIGNIFICANCE / divisor).saturating_mul(hw.saturating_mul(i64::from(resolution.ival)))
        } else {
            0
        };
        return calc_i.saturating_add(calc_f);
    }

    let divisor = match scale.to_nano() {
        0 => i128::from(SCALE_SIGNIFICANCE),
        nano => i128::from(nano),
    };
    let hw = i128::from(hw);
    let calc_i = hw * i128::from(resolution.ival) * i128::from(SCALE_SIGNIFICANCE) / divisor;
    let calc_f = hw * i128::from(resolution.fval) / divisor;
    (calc_i + calc_f).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Two-point calibration anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalibrationPoints {
    /// Linear value read at the low reference
    pub uncal_lo: i32,
    /// Linear value read at the high reference
    pub uncal_hi: i32,
    /// True lux at the low reference
    pub cal_lo: i32,
    /// True lux at the high reference
    pub cal_hi: i32,
}

impl CalibrationPoints {
    /// Anchors that leave values untouched
    pub const IDENTITY: Self = Self { uncal_lo: 0, uncal_hi: 0, cal_lo: 0, cal_hi: 0 };

    /// True when no usable calibration range is configured
    pub fn is_identity(&self) -> bool {
        self.uncal_lo == self.uncal_hi
    }

    /// Map a linear value onto the calibrated line
    pub fn apply(&self, linear: i64) -> u32 {
        interpolate(self.uncal_lo, linear, self.uncal_hi, self.cal_lo, self.cal_hi)
    }
}

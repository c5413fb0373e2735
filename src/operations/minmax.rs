//! Max/min kernels
//!
//! `Real::max`/`Real::min` leave the sign of a zero result unspecified,
//! which would let the scalar and lane paths disagree on `max(+0, -0)`.
//! These are written as a compare-and-select that the lane evaluator
//! reproduces exactly:
//!
//! - `max(a, b)` is `a` when `a > b` or `b` is NaN, otherwise `b`
//! - `min(a, b)` is `a` when `a < b` or `b` is NaN, otherwise `b`
//!
//! A single NaN operand is ignored (the other operand wins), matching C `fmax`.
//!
//! Author: Moroya Sakamoto

use crate::Real;

/// Maximum of two values
#[inline(always)]
pub fn op_max(a: Real, b: Real) -> Real {
    if a > b || b.is_nan() {
        a
    } else {
        b
    }
}

/// Minimum of two values
#[inline(always)]
pub fn op_min(a: Real, b: Real) -> Real {
    if a < b || b.is_nan() {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_min() {
        assert_eq!(op_max(1.0, 2.0), 2.0);
        assert_eq!(op_max(2.0, 1.0), 2.0);
        assert_eq!(op_min(1.0, 2.0), 1.0);
        assert_eq!(op_min(2.0, 1.0), 1.0);
    }

    #[test]
    fn test_nan_operand_is_ignored() {
        assert_eq!(op_max(Real::NAN, 1.0), 1.0);
        assert_eq!(op_max(1.0, Real::NAN), 1.0);
        assert_eq!(op_min(Real::NAN, 1.0), 1.0);
        assert_eq!(op_min(1.0, Real::NAN), 1.0);
        assert!(op_max(Real::NAN, Real::NAN).is_nan());
    }

    #[test]
    fn test_signed_zero_picks_second() {
        assert!(op_max(0.0, -0.0).is_sign_negative());
        assert!(op_min(-0.0, 0.0).is_sign_positive());
    }
}

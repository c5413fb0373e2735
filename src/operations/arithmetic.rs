//! Arithmetic kernels
//!
//! Author: Moroya Sakamoto

use crate::Real;

/// `a + b`
#[inline(always)]
pub fn op_add(a: Real, b: Real) -> Real {
    a + b
}

/// `a - b`
#[inline(always)]
pub fn op_sub(a: Real, b: Real) -> Real {
    a - b
}

/// `a * b`
#[inline(always)]
pub fn op_mul(a: Real, b: Real) -> Real {
    a * b
}

/// Sign-bit flip, so `-(+0.0)` is `-0.0` and NaN payloads are preserved
#[inline(always)]
pub fn op_neg(a: Real) -> Real {
    -a
}

/// Self-multiply (not `powi`, which may round differently)
#[inline(always)]
pub fn op_square(a: Real) -> Real {
    a * a
}

/// Host square root. Negative input yields NaN.
#[inline(always)]
pub fn op_sqrt(a: Real) -> Real {
    a.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(op_add(2.0, 3.0), 5.0);
        assert_eq!(op_sub(2.0, 3.0), -1.0);
        assert_eq!(op_mul(2.0, 3.0), 6.0);
        assert_eq!(op_square(-3.0), 9.0);
        assert_eq!(op_sqrt(16.0), 4.0);
    }

    #[test]
    fn test_neg_flips_sign_of_zero() {
        assert!(op_neg(0.0).is_sign_negative());
        assert!(op_neg(-0.0).is_sign_positive());
    }

    #[test]
    fn test_sqrt_negative_is_nan() {
        assert!(op_sqrt(-1.0).is_nan());
    }
}

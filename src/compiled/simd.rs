//! SIMD type definitions for 4-wide evaluation
//!
//! `Realx4` packs one register's value for four lanes, so a register file
//! of `Realx4` is the interleaved layout `[r0l0, r0l1, r0l2, r0l3, r1l0, ...]`:
//! register `r`, lane `l` lives at scalar cell `4r + l`.
//!
//! The lane kernels here must agree bit for bit with
//! [`crate::operations`]; see that module for the max/min convention.
//!
//! Author: Moroya Sakamoto

use wide::{CmpGt, CmpLt};

/// Four lanes of [`crate::Real`]
#[cfg(not(feature = "single-precision"))]
pub type Realx4 = wide::f64x4;

/// Four lanes of [`crate::Real`]
#[cfg(feature = "single-precision")]
pub type Realx4 = wide::f32x4;

/// Number of lanes evaluated per instruction pass
pub const LANES: usize = 4;

/// Lane-wise sign-bit flip (matches scalar `-a`, including `-(+0.0) == -0.0`)
#[inline(always)]
pub fn lane_neg(a: Realx4) -> Realx4 {
    a ^ Realx4::splat(-0.0)
}

/// Lane-wise `a * a`
#[inline(always)]
pub fn lane_square(a: Realx4) -> Realx4 {
    a * a
}

/// Lane-wise square root
#[inline(always)]
pub fn lane_sqrt(a: Realx4) -> Realx4 {
    a.sqrt()
}

/// Lane-wise max: `a` where `a > b` or `b` is NaN, else `b`
#[inline(always)]
pub fn lane_max(a: Realx4, b: Realx4) -> Realx4 {
    (a.cmp_gt(b) | b.is_nan()).blend(a, b)
}

/// Lane-wise min: `a` where `a < b` or `b` is NaN, else `b`
#[inline(always)]
pub fn lane_min(a: Realx4, b: Realx4) -> Realx4 {
    (a.cmp_lt(b) | b.is_nan()).blend(a, b)
}

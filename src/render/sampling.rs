//! Sample lattice construction
//!
//! Author: Moroya Sakamoto

use crate::Real;

/// `size` evenly spaced samples starting at -1 with step `2 / size`
///
/// The last sample is `1 - step`, so the lattice tiles `[-1, 1)` with one
/// sample at the low edge of each pixel. Samples are accumulated
/// (`s[i] = s[i - 1] + step`) rather than computed as `-1 + i * step`,
/// which keeps output identical to the reference renderer.
pub fn linspace(size: usize) -> Vec<Real> {
    if size == 0 {
        return Vec::new();
    }

    let step = 2.0 / size as Real;
    let mut out = Vec::with_capacity(size);
    let mut value: Real = -1.0;
    for _ in 0..size {
        out.push(value);
        value += step;
    }
    out
}

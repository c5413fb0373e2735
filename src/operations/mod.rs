//! Scalar operator kernels
//!
//! One definition per opcode, shared by the constant folder and the scalar
//! evaluator so that a folded constant is exactly the value the evaluator
//! would have computed. The 4-lane kernels in [`crate::compiled::Realx4`]
//! mirror these bit for bit.
//!
//! Author: Moroya Sakamoto

mod arithmetic;
mod minmax;

pub use arithmetic::{op_add, op_mul, op_neg, op_sqrt, op_square, op_sub};
pub use minmax::{op_max, op_min};

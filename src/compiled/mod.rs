//! Compiled tapes: register-machine evaluation
//!
//! A tape is a straight-line SSA program: every instruction writes one
//! register and reads only registers written before it. This module holds
//! the instruction representation and the two evaluators that execute it.
//!
//! # Performance Characteristics
//!
//! | Aspect | Scalar | 4-Lane |
//! |--------|--------|--------|
//! | Samples per pass | 1 | 4 (shared x) |
//! | Register file | `register_count` cells | `4 × register_count` cells |
//! | Constant loads | first pass only | first pass only |
//!
//! # Usage
//!
//! ```rust
//! use alice_raster::compiled::{Instruction, Program, ScalarEvaluator, LaneEvaluator};
//! use alice_raster::optimize::eliminate_const_loads;
//!
//! let mut program = Program::new(vec![
//!     Instruction::var_x(0),
//!     Instruction::var_y(1),
//!     Instruction::constant(2, 0.5),
//!     Instruction::add(3, 0, 1),
//!     Instruction::sub(4, 3, 2),
//! ]).unwrap();
//! eliminate_const_loads(&mut program);
//!
//! // Scratch is allocated once and reused for every sample
//! let mut scalar = ScalarEvaluator::new(&program);
//! assert_eq!(scalar.eval(1.0, 1.0), 1.5);
//! assert_eq!(scalar.eval(0.0, 0.0), -0.5);
//!
//! // Four samples sharing one x
//! let mut lanes = LaneEvaluator::new(&program);
//! assert_eq!(lanes.eval(1.0, [0.0, 1.0, 2.0, 3.0]), [0.5, 1.5, 2.5, 3.5]);
//! ```
//!
//! # Architecture
//!
//! - **Register file**: flat `Vec` indexed by register number, sized from
//!   the program, owned by exactly one evaluator
//! - **Cache state**: `Uninitialized` until the first full pass, then
//!   `Initialized`; initialized buffers run the constant-free tape
//! - **Instruction array**: `Copy` records with opcode, destination,
//!   operand registers and literal
//!
//! Author: Moroya Sakamoto

mod eval;
mod eval_simd;
mod instruction;
mod opcode;
mod program;
mod scratch;
mod simd;

pub use eval::{eval_compiled, eval_compiled_batch, ScalarEvaluator};
pub use eval_simd::{eval_compiled_x4, LaneEvaluator};
pub use instruction::{Instruction, Reg};
pub use opcode::{OpCode, UnknownOpCode};
pub use program::{Program, ProgramError, MAX_REGISTERS};
pub use scratch::{CacheState, Scratch};
pub use simd::{lane_max, lane_min, lane_neg, lane_sqrt, lane_square, Realx4, LANES};

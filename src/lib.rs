//! # ALICE-Raster
//!
//! **A register-machine evaluator for SDF "tapes"**
//!
//! Evaluates a straight-line, SSA-style arithmetic program (a signed
//! distance function in the `.vm` tape format) at every pixel of a square
//! image and rasterizes the sign of the result to a bitmap.
//!
//! ## Features
//!
//! - **Program IR**: flat instruction array addressed by register index
//! - **Optimizer**: constant folding and constant-load elimination
//! - **Evaluation**: scalar and 4-lane SIMD evaluators with bit-identical output
//! - **Scratch caching**: constant loads only run on the first pass through a buffer
//! - **Rendering**: row-major chunk partitioning over a fixed worker pool
//! - **File I/O**: `.vm` tape parser and binary PGM (`P5`) writer
//!
//! ## Example
//!
//! ```rust
//! use alice_raster::prelude::*;
//!
//! // Unit circle: x^2 + y^2 - 1
//! let parsed = parse_program(
//!     "_0 var-x\n_1 var-y\n_2 square _0\n_3 square _1\n_4 add _2 _3\n_5 const 1\n_6 sub _4 _5\n",
//! );
//! let mut program = Program::new(parsed.instructions).unwrap();
//! optimize(&mut program, &OptimizeConfig::default());
//!
//! // Evaluate a single point
//! let d = eval_compiled(&program, Point::new(0.0, 0.0));
//! assert_eq!(d, -1.0);
//!
//! // Rasterize
//! let image = render(&program, &RenderConfig { size: 64, workers: 2 }).unwrap();
//! assert!(image.inside_count() > 0);
//! ```
//!
//! ## Precision
//!
//! Values are `f64` by default. Enable the `single-precision` feature to
//! evaluate in `f32` instead.
//!
//! Author: Moroya Sakamoto

#![warn(missing_docs)]

pub mod compiled;
pub mod io;
pub mod operations;
pub mod optimize;
pub mod render;

/// Scalar type every register holds
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

/// Scalar type every register holds
#[cfg(feature = "single-precision")]
pub type Real = f32;

/// A 2D sample coordinate
#[cfg(not(feature = "single-precision"))]
pub type Point = glam::DVec2;

/// A 2D sample coordinate
#[cfg(feature = "single-precision")]
pub type Point = glam::Vec2;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::compiled::{
        eval_compiled, eval_compiled_x4, CacheState, Instruction, LaneEvaluator, OpCode,
        Program, ProgramError, Realx4, Reg, ScalarEvaluator, LANES,
    };
    pub use crate::io::{
        encode_ppm, load_program, parse_line, parse_program, write_ppm, IoError, ParseError,
        ParsedProgram,
    };
    pub use crate::optimize::{
        eliminate_const_loads, fold_constants, optimize, OptimizeConfig, OptimizeStats,
    };
    pub use crate::render::{
        linspace, partition, render, render_with_lattice, Image, RenderConfig, RenderError,
    };
    pub use crate::{Point, Real};
}

// Re-exports for convenience
pub use compiled::Program;
pub use io::load_program;
pub use optimize::optimize;
pub use render::render;

//! File I/O for tapes and images
//!
//! - `.vm`: line-oriented tape text, parsed with skip-and-report
//! - `.ppm`: binary `P5` grayscale output
//!
//! Images are written through a `BufWriter`.
//!
//! Author: Moroya Sakamoto

mod ppm;
mod vm;

pub use ppm::{encode_ppm, write_ppm, MAX_VALUE};
pub use vm::{parse_line, parse_program, ParseError, ParsedProgram, SkippedLine};

use crate::compiled::{Program, ProgramError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// File I/O errors
#[derive(Error, Debug)]
pub enum IoError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The parsed instructions do not form a valid program
    #[error("invalid program: {0}")]
    Program(#[from] ProgramError),
}

/// Load and validate a `.vm` tape.
///
/// Malformed lines are logged and skipped. The remaining instructions must
/// still form a valid program, otherwise [`IoError::Program`] is returned.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, IoError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let parsed = parse_program(&source);

    info!(
        path = %path.display(),
        instructions = parsed.instructions.len(),
        skipped = parsed.skipped.len(),
        "loaded tape"
    );

    Ok(Program::new(parsed.instructions)?)
}

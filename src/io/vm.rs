//! `.vm` tape parser
//!
//! One instruction per line:
//!
//! ```text
//! # comment
//! _0 var-x
//! _1 var-y
//! _2 const 0.5
//! _3 square _0
//! _4 add _3 _2
//! ```
//!
//! Registers are hexadecimal ids prefixed with `_`. Blank lines and lines
//! starting with `#` are ignored. A malformed line is reported and skipped;
//! it never aborts the parse.
//!
//! Author: Moroya Sakamoto

use crate::compiled::{Instruction, OpCode, Reg};
use crate::Real;
use thiserror::Error;
use tracing::warn;

/// Why a single line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line has a register but no mnemonic
    #[error("missing operation")]
    MissingOpcode,

    /// Register token is not `_` followed by hex digits
    #[error("invalid register `{0}`")]
    InvalidRegister(String),

    /// Mnemonic names no known operation
    #[error("unknown operation `{0}`")]
    UnknownOpcode(String),

    /// Fewer operands than the operation needs
    #[error("`{opcode}` expects {expected} operand(s), found {found}")]
    MissingOperand {
        /// Operation being parsed
        opcode: OpCode,
        /// Operands required
        expected: usize,
        /// Operands present
        found: usize,
    },

    /// Constant literal is not a number
    #[error("invalid constant `{0}`")]
    InvalidConstant(String),

    /// Tokens left over after a complete instruction
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

/// A line the parser skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    /// Line contents
    pub text: String,
    /// What was wrong with it
    pub error: ParseError,
}

/// Parser output: the instructions that parsed, plus the lines that did not
#[derive(Debug, Clone, Default)]
pub struct ParsedProgram {
    /// Instructions in source order
    pub instructions: Vec<Instruction>,
    /// Malformed lines, in source order
    pub skipped: Vec<SkippedLine>,
}

fn parse_register(token: &str) -> Result<Reg, ParseError> {
    token
        .strip_prefix('_')
        .filter(|hex| !hex.is_empty())
        .and_then(|hex| Reg::from_str_radix(hex, 16).ok())
        .ok_or_else(|| ParseError::InvalidRegister(token.to_string()))
}

/// Parse one line.
///
/// # Returns
/// `Ok(None)` for blank and comment lines, `Ok(Some(_))` for an instruction
pub fn parse_line(line: &str) -> Result<Option<Instruction>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = line.split_whitespace();
    // Non-empty after trim, so there is a first token
    let reg = parse_register(tokens.next().unwrap_or_default())?;
    let name = tokens.next().ok_or(ParseError::MissingOpcode)?;
    let opcode: OpCode = name
        .parse()
        .map_err(|_| ParseError::UnknownOpcode(name.to_string()))?;

    let args: Vec<&str> = tokens.collect();
    let expected = if opcode == OpCode::Const { 1 } else { opcode.arity() };
    if args.len() < expected {
        return Err(ParseError::MissingOperand {
            opcode,
            expected,
            found: args.len(),
        });
    }
    if args.len() > expected {
        return Err(ParseError::TrailingInput(args[expected..].join(" ")));
    }

    let inst = match opcode {
        OpCode::VarX => Instruction::var_x(reg),
        OpCode::VarY => Instruction::var_y(reg),
        OpCode::Const => {
            let value: Real = args[0]
                .parse()
                .map_err(|_| ParseError::InvalidConstant(args[0].to_string()))?;
            Instruction::constant(reg, value)
        }
        op if op.is_unary_op() => Instruction::unary(op, reg, parse_register(args[0])?),
        op => Instruction::binary(op, reg, parse_register(args[0])?, parse_register(args[1])?),
    };

    Ok(Some(inst))
}

/// Parse a whole tape, skipping and reporting malformed lines.
pub fn parse_program(source: &str) -> ParsedProgram {
    let mut parsed = ParsedProgram::default();

    for (index, text) in source.lines().enumerate() {
        match parse_line(text) {
            Ok(Some(inst)) => parsed.instructions.push(inst),
            Ok(None) => {}
            Err(error) => {
                warn!(line = index + 1, %error, text, "skipping malformed instruction");
                parsed.skipped.push(SkippedLine {
                    line: index + 1,
                    text: text.to_string(),
                    error,
                });
            }
        }
    }

    parsed
}

//! OpCode definitions for the tape VM
//!
//! Author: Moroya Sakamoto

use std::fmt;
use std::str::FromStr;

/// Operation codes for the register machine
///
/// Every opcode writes exactly one destination register. Inputs
/// (`VarX`, `VarY`) and `Const` read nothing; the others read one or
/// two previously written registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // === Inputs (no operands) ===
    /// Sample x coordinate
    VarX = 0,
    /// Sample y coordinate
    VarY = 1,
    /// Literal value
    Const = 2,

    // === Binary (two operands) ===
    /// a + b
    Add = 16,
    /// a - b
    Sub = 17,
    /// a * b
    Mul = 18,
    /// max(a, b)
    Max = 19,
    /// min(a, b)
    Min = 20,

    // === Unary (one operand) ===
    /// -a
    Neg = 32,
    /// a * a
    Square = 33,
    /// sqrt(a)
    Sqrt = 34,
}

impl OpCode {
    /// All opcodes in declaration order
    pub const ALL: [OpCode; 11] = [
        OpCode::VarX,
        OpCode::VarY,
        OpCode::Const,
        OpCode::Add,
        OpCode::Sub,
        OpCode::Mul,
        OpCode::Max,
        OpCode::Min,
        OpCode::Neg,
        OpCode::Square,
        OpCode::Sqrt,
    ];

    /// Returns true for opcodes that read no registers
    #[inline]
    pub fn is_input(self) -> bool {
        (self as u8) < 16
    }

    /// Returns true if this opcode is a binary operation
    #[inline]
    pub fn is_binary_op(self) -> bool {
        let v = self as u8;
        (16..32).contains(&v)
    }

    /// Returns true if this opcode is a unary operation
    #[inline]
    pub fn is_unary_op(self) -> bool {
        (self as u8) >= 32
    }

    /// Number of register operands
    #[inline]
    pub fn arity(self) -> usize {
        if self.is_binary_op() {
            2
        } else if self.is_unary_op() {
            1
        } else {
            0
        }
    }

    /// Tape mnemonic (`var-x`, `add`, ...)
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::VarX => "var-x",
            OpCode::VarY => "var-y",
            OpCode::Const => "const",
            OpCode::Add => "add",
            OpCode::Sub => "sub",
            OpCode::Mul => "mul",
            OpCode::Max => "max",
            OpCode::Min => "min",
            OpCode::Neg => "neg",
            OpCode::Square => "square",
            OpCode::Sqrt => "sqrt",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Returned when a mnemonic names no known opcode
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode `{0}`")]
pub struct UnknownOpCode(pub String);

impl FromStr for OpCode {
    type Err = UnknownOpCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpCode::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| UnknownOpCode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_categories() {
        assert!(OpCode::VarX.is_input());
        assert!(OpCode::Const.is_input());
        assert!(!OpCode::Add.is_input());

        assert!(OpCode::Add.is_binary_op());
        assert!(OpCode::Min.is_binary_op());
        assert!(!OpCode::Neg.is_binary_op());

        assert!(OpCode::Neg.is_unary_op());
        assert!(OpCode::Sqrt.is_unary_op());
        assert!(!OpCode::Max.is_unary_op());
    }

    #[test]
    fn test_arity() {
        assert_eq!(OpCode::VarY.arity(), 0);
        assert_eq!(OpCode::Const.arity(), 0);
        assert_eq!(OpCode::Square.arity(), 1);
        assert_eq!(OpCode::Sub.arity(), 2);
    }

    #[test]
    fn test_mnemonic_round_trip() {
        for op in OpCode::ALL {
            assert_eq!(op.mnemonic().parse::<OpCode>(), Ok(op));
        }
        assert_eq!(
            "pow".parse::<OpCode>(),
            Err(UnknownOpCode("pow".to_string()))
        );
    }
}

//! Instruction structure for the tape VM
//!
//! Author: Moroya Sakamoto

use super::opcode::OpCode;
use crate::Real;
use std::fmt;

/// Register index
///
/// Indices come straight from the tape and address the scratch register
/// file directly; they need not match an instruction's position.
pub type Reg = u32;

/// A single instruction in the tape
///
/// Flat and `Copy`: no pointers or indirection, so a program is one
/// contiguous array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instruction {
    /// Literal for `Const`, 0.0 otherwise
    pub value: Real,
    /// Destination register
    pub reg: Reg,
    /// First operand register (unary and binary ops)
    pub a: Reg,
    /// Second operand register (binary ops)
    pub b: Reg,
    /// The operation code
    pub opcode: OpCode,
}

impl Instruction {
    #[inline]
    fn new(opcode: OpCode, reg: Reg, a: Reg, b: Reg) -> Self {
        Instruction {
            value: 0.0,
            reg,
            a,
            b,
            opcode,
        }
    }

    /// Create a `var-x` instruction
    #[inline]
    pub fn var_x(reg: Reg) -> Self {
        Self::new(OpCode::VarX, reg, 0, 0)
    }

    /// Create a `var-y` instruction
    #[inline]
    pub fn var_y(reg: Reg) -> Self {
        Self::new(OpCode::VarY, reg, 0, 0)
    }

    /// Create a constant load
    #[inline]
    pub fn constant(reg: Reg, value: Real) -> Self {
        let mut inst = Self::new(OpCode::Const, reg, 0, 0);
        inst.value = value;
        inst
    }

    /// Create a unary instruction (`Neg`, `Square`, `Sqrt`)
    #[inline]
    pub fn unary(opcode: OpCode, reg: Reg, a: Reg) -> Self {
        debug_assert!(opcode.is_unary_op(), "{opcode} is not unary");
        Self::new(opcode, reg, a, 0)
    }

    /// Create a binary instruction (`Add`, `Sub`, `Mul`, `Max`, `Min`)
    #[inline]
    pub fn binary(opcode: OpCode, reg: Reg, a: Reg, b: Reg) -> Self {
        debug_assert!(opcode.is_binary_op(), "{opcode} is not binary");
        Self::new(opcode, reg, a, b)
    }

    /// `reg = -a`
    #[inline]
    pub fn neg(reg: Reg, a: Reg) -> Self {
        Self::unary(OpCode::Neg, reg, a)
    }

    /// `reg = a * a`
    #[inline]
    pub fn square(reg: Reg, a: Reg) -> Self {
        Self::unary(OpCode::Square, reg, a)
    }

    /// `reg = sqrt(a)`
    #[inline]
    pub fn sqrt(reg: Reg, a: Reg) -> Self {
        Self::unary(OpCode::Sqrt, reg, a)
    }

    /// `reg = a + b`
    #[inline]
    pub fn add(reg: Reg, a: Reg, b: Reg) -> Self {
        Self::binary(OpCode::Add, reg, a, b)
    }

    /// `reg = a - b`
    #[inline]
    pub fn sub(reg: Reg, a: Reg, b: Reg) -> Self {
        Self::binary(OpCode::Sub, reg, a, b)
    }

    /// `reg = a * b`
    #[inline]
    pub fn mul(reg: Reg, a: Reg, b: Reg) -> Self {
        Self::binary(OpCode::Mul, reg, a, b)
    }

    /// `reg = max(a, b)`
    #[inline]
    pub fn max(reg: Reg, a: Reg, b: Reg) -> Self {
        Self::binary(OpCode::Max, reg, a, b)
    }

    /// `reg = min(a, b)`
    #[inline]
    pub fn min(reg: Reg, a: Reg, b: Reg) -> Self {
        Self::binary(OpCode::Min, reg, a, b)
    }

    /// Returns true if this is a constant load
    #[inline]
    pub fn is_const(&self) -> bool {
        self.opcode == OpCode::Const
    }

    /// Operand registers actually read by this instruction
    #[inline]
    pub fn operands(&self) -> impl Iterator<Item = Reg> {
        [self.a, self.b].into_iter().take(self.opcode.arity())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{:x} {}", self.reg, self.opcode)?;
        match self.opcode.arity() {
            0 if self.is_const() => write!(f, " {}", self.value),
            0 => Ok(()),
            1 => write!(f, " _{:x}", self.a),
            _ => write!(f, " _{:x} _{:x}", self.a, self.b),
        }
    }
}

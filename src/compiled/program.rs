//! Program: validated tape of instructions
//!
//! A `Program` owns the instruction array, the size of the register file
//! the tape needs, and (after constant-load elimination) a second, shorter
//! array with every `Const` stripped out.
//!
//! Author: Moroya Sakamoto

use super::instruction::{Instruction, Reg};

/// Largest register file a program may request (cells per buffer)
pub const MAX_REGISTERS: usize = 1 << 24;

/// Error type for programs that violate the SSA tape invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    /// The tape has no instructions, so there is no output register.
    #[error("program has no instructions")]
    Empty,

    /// An operand reads a register no earlier instruction wrote.
    #[error("instruction {index} reads register _{reg:x} before it is written")]
    UndefinedRegister {
        /// Position of the offending instruction
        index: usize,
        /// Register that was read
        reg: Reg,
    },

    /// Two instructions write the same register.
    #[error("instruction {index} writes register _{reg:x}, already written by instruction {first}")]
    DuplicateRegister {
        /// Position of the second write
        index: usize,
        /// Position of the first write
        first: usize,
        /// Register written twice
        reg: Reg,
    },

    /// A register index would need an unreasonably large register file.
    #[error("register _{reg:x} exceeds the register file limit of {limit} cells")]
    RegisterTooLarge {
        /// Offending register
        reg: Reg,
        /// Maximum allowed cell count
        limit: usize,
    },
}

/// Validated tape
///
/// Invariants (checked by [`Program::new`]):
/// - at least one instruction
/// - every operand names a register written by an earlier instruction
/// - no register is written twice
///
/// Evaluators index the register file with these registers directly, so a
/// buffer sized by [`Program::register_count`] is always large enough.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
    const_free: Option<Vec<Instruction>>,
    register_count: usize,
}

impl Program {
    /// Validate an instruction list and wrap it as a program.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, ProgramError> {
        if instructions.is_empty() {
            return Err(ProgramError::Empty);
        }

        // writer[r] = position of the instruction that wrote register r
        let mut writer: Vec<Option<usize>> = Vec::new();

        for (index, inst) in instructions.iter().enumerate() {
            for reg in inst.operands() {
                let written = writer.get(reg as usize).copied().flatten();
                if written.is_none() {
                    return Err(ProgramError::UndefinedRegister { index, reg });
                }
            }

            let slot = inst.reg as usize;
            if slot >= MAX_REGISTERS {
                return Err(ProgramError::RegisterTooLarge {
                    reg: inst.reg,
                    limit: MAX_REGISTERS,
                });
            }
            if slot >= writer.len() {
                writer.resize(slot + 1, None);
            }
            if let Some(first) = writer[slot] {
                return Err(ProgramError::DuplicateRegister {
                    index,
                    first,
                    reg: inst.reg,
                });
            }
            writer[slot] = Some(index);
        }

        let register_count = writer.len().max(instructions.len());

        Ok(Program {
            instructions,
            const_free: None,
            register_count,
        })
    }

    /// The full instruction list
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The constant-free instruction list, if elimination has run
    #[inline]
    pub fn const_free(&self) -> Option<&[Instruction]> {
        self.const_free.as_deref()
    }

    /// Get the number of instructions
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Length of the constant-free list (equals `len()` before elimination)
    #[inline]
    pub fn const_free_len(&self) -> usize {
        self.const_free.as_ref().map_or(self.len(), Vec::len)
    }

    /// Number of `Const` instructions in the full list
    pub fn const_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_const()).count()
    }

    /// Cells a scalar register file needs for this program
    #[inline]
    pub fn register_count(&self) -> usize {
        self.register_count
    }

    /// Register holding the result: the destination of the final instruction
    #[inline]
    pub fn output_register(&self) -> Reg {
        // Non-empty by construction
        self.instructions[self.instructions.len() - 1].reg
    }

    /// Get memory usage of the instruction lists in bytes
    pub fn memory_size(&self) -> usize {
        let full = self.instructions.len();
        let cut = self.const_free.as_ref().map_or(0, Vec::len);
        (full + cut) * std::mem::size_of::<Instruction>()
    }

    /// Mutable access for rewriting passes.
    ///
    /// Any derived constant-free list is dropped, since it may no longer
    /// match. Callers must keep the SSA invariants: only opcodes and
    /// literals may change, never destination registers.
    pub(crate) fn instructions_mut(&mut self) -> &mut [Instruction] {
        self.const_free = None;
        &mut self.instructions
    }

    pub(crate) fn set_const_free(&mut self, const_free: Vec<Instruction>) {
        self.const_free = Some(const_free);
    }
}

//! Tape optimization passes
//!
//! Two passes run once, before any evaluation:
//!
//! - **Constant folding**: an instruction whose operands are all constants
//!   becomes a constant load of the precomputed value. Chains collapse,
//!   since an operand folded earlier counts as a constant for later readers.
//! - **Constant-load elimination**: derives a second tape with every `Const`
//!   instruction removed. Evaluators run it on every pass after the first,
//!   when the register file already holds the constants.
//!
//! Neither pass renumbers registers or removes unused instructions, and
//! neither changes any evaluated value: folding uses the same kernels as the
//! evaluator ([`crate::operations`]).
//!
//! Author: Moroya Sakamoto

use crate::compiled::{Instruction, OpCode, Program};
use crate::operations::*;
use crate::Real;
use tracing::debug;

/// Which passes [`optimize`] runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimizeConfig {
    /// Rewrite all-constant operations into constant loads
    pub fold_constants: bool,
    /// Derive the constant-free tape for cached evaluation
    pub eliminate_const_loads: bool,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        OptimizeConfig {
            fold_constants: true,
            eliminate_const_loads: true,
        }
    }
}

/// What [`optimize`] did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    /// Instructions converted to constant loads
    pub folded: usize,
    /// Constant loads left out of the constant-free tape
    pub removed: usize,
}

/// Run the enabled passes in order: folding, then elimination.
pub fn optimize(program: &mut Program, config: &OptimizeConfig) -> OptimizeStats {
    let mut stats = OptimizeStats::default();
    if config.fold_constants {
        stats.folded = fold_constants(program);
    }
    if config.eliminate_const_loads {
        stats.removed = eliminate_const_loads(program);
    }
    stats
}

/// Compute the value of an instruction whose operands are known constants.
///
/// Returns `None` for inputs (`VarX`, `VarY`), which never fold, and for
/// any operand without a known value.
#[inline]
fn fold_value(inst: &Instruction, known: &[Option<Real>]) -> Option<Real> {
    let a = || known[inst.a as usize];
    let b = || known[inst.b as usize];

    match inst.opcode {
        OpCode::VarX | OpCode::VarY => None,
        OpCode::Const => Some(inst.value),
        OpCode::Neg => a().map(op_neg),
        OpCode::Square => a().map(op_square),
        OpCode::Sqrt => a().map(op_sqrt),
        OpCode::Add => Some(op_add(a()?, b()?)),
        OpCode::Sub => Some(op_sub(a()?, b()?)),
        OpCode::Mul => Some(op_mul(a()?, b()?)),
        OpCode::Max => Some(op_max(a()?, b()?)),
        OpCode::Min => Some(op_min(a()?, b()?)),
    }
}

/// Fold constant subexpressions into constant loads, in place.
///
/// Operands always precede their readers, so a single forward pass sees
/// every operand already folded. `known[r]` memoizes the constant value of
/// register `r`, making the pass linear however heavily registers are shared.
///
/// Any constant-free tape derived earlier is dropped; run
/// [`eliminate_const_loads`] afterwards.
///
/// # Returns
/// Number of instructions converted to constant loads
pub fn fold_constants(program: &mut Program) -> usize {
    let mut known: Vec<Option<Real>> = vec![None; program.register_count()];
    let mut folded = 0;

    for inst in program.instructions_mut() {
        let Some(value) = fold_value(inst, &known) else {
            continue;
        };
        if !inst.is_const() {
            *inst = Instruction::constant(inst.reg, value);
            folded += 1;
        }
        known[inst.reg as usize] = Some(value);
    }

    debug!(folded, "constant folding");
    folded
}

/// Derive the constant-free tape: every non-`Const` instruction, in order.
///
/// The derived tape is only valid against a register file whose constant
/// registers were populated by a full pass; the evaluators guarantee this
/// through their cache state.
///
/// # Returns
/// Number of constant loads removed
pub fn eliminate_const_loads(program: &mut Program) -> usize {
    let const_free: Vec<Instruction> = program
        .instructions()
        .iter()
        .filter(|inst| !inst.is_const())
        .copied()
        .collect();

    let removed = program.len() - const_free.len();
    program.set_const_free(const_free);

    debug!(removed, remaining = program.const_free_len(), "constant-load elimination");
    removed
}

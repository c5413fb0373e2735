//! SIMD-accelerated tape evaluation (4 samples at once)
//!
//! Same tape, same state machine as the scalar evaluator, but every
//! register holds four lanes. `var-x` broadcasts one x to all lanes and
//! `var-y` loads four independent y values, so one pass over the tape
//! evaluates four samples that share a column.
//!
//! Results are bit-identical to [`super::eval`] lane for lane.
//!
//! Author: Moroya Sakamoto

use super::instruction::Instruction;
use super::opcode::OpCode;
use super::program::Program;
use super::scratch::{CacheState, Scratch};
use super::simd::{lane_max, lane_min, lane_neg, lane_sqrt, lane_square, Realx4, LANES};
use crate::Real;

/// Run a tape over a 4-lane register file
#[inline]
fn run_tape_x4(tape: &[Instruction], regs: &mut [Realx4], x: Realx4, y: Realx4) {
    for inst in tape {
        let value = match inst.opcode {
            OpCode::VarX => x,
            OpCode::VarY => y,
            OpCode::Const => Realx4::splat(inst.value),
            OpCode::Neg => lane_neg(regs[inst.a as usize]),
            OpCode::Square => lane_square(regs[inst.a as usize]),
            OpCode::Sqrt => lane_sqrt(regs[inst.a as usize]),
            OpCode::Add => regs[inst.a as usize] + regs[inst.b as usize],
            OpCode::Sub => regs[inst.a as usize] - regs[inst.b as usize],
            OpCode::Mul => regs[inst.a as usize] * regs[inst.b as usize],
            OpCode::Max => lane_max(regs[inst.a as usize], regs[inst.b as usize]),
            OpCode::Min => lane_min(regs[inst.a as usize], regs[inst.b as usize]),
        };
        regs[inst.reg as usize] = value;
    }
}

/// 4-lane evaluator bound to one program
///
/// The register file holds one `Realx4` per register, i.e. `4 × register_count`
/// scalars in interleaved order.
#[derive(Clone, Debug)]
pub struct LaneEvaluator<'p> {
    program: &'p Program,
    scratch: Scratch<Realx4>,
}

impl<'p> LaneEvaluator<'p> {
    /// Create an evaluator with a fresh register file
    pub fn new(program: &'p Program) -> Self {
        LaneEvaluator {
            program,
            scratch: Scratch::for_program(program),
        }
    }

    /// Evaluate at one x and four y values
    ///
    /// # Returns
    /// One result per lane, in the order of `ys`
    #[inline]
    pub fn eval(&mut self, x: Real, ys: [Real; LANES]) -> [Real; LANES] {
        let (tape, regs) = self.scratch.begin_pass(self.program);
        run_tape_x4(tape, regs, Realx4::splat(x), Realx4::new(ys));
        self.scratch.get(self.program.output_register()).to_array()
    }

    /// Cache state of the register file
    #[inline]
    pub fn state(&self) -> CacheState {
        self.scratch.state()
    }

    /// Force the next call to run the full tape
    #[inline]
    pub fn reset(&mut self) {
        self.scratch.reset();
    }

    /// The program this evaluator runs
    #[inline]
    pub fn program(&self) -> &'p Program {
        self.program
    }
}

/// Evaluate a program at one x and four y values with a fresh register file
#[inline]
pub fn eval_compiled_x4(program: &Program, x: Real, ys: [Real; LANES]) -> [Real; LANES] {
    LaneEvaluator::new(program).eval(x, ys)
}

//! Scalar register-machine evaluation
//!
//! Executes the tape one instruction at a time against a register file.
//! There is no control flow: every instruction runs exactly once per pass
//! and writes exactly one register.
//!
//! Author: Moroya Sakamoto

use super::instruction::Instruction;
use super::opcode::OpCode;
use super::program::Program;
use super::scratch::{CacheState, Scratch};
use crate::operations::*;
use crate::{Point, Real};

/// Run a tape over a register file for one sample
#[inline]
fn run_tape(tape: &[Instruction], regs: &mut [Real], x: Real, y: Real) {
    for inst in tape {
        let value = match inst.opcode {
            OpCode::VarX => x,
            OpCode::VarY => y,
            OpCode::Const => inst.value,
            OpCode::Neg => op_neg(regs[inst.a as usize]),
            OpCode::Square => op_square(regs[inst.a as usize]),
            OpCode::Sqrt => op_sqrt(regs[inst.a as usize]),
            OpCode::Add => op_add(regs[inst.a as usize], regs[inst.b as usize]),
            OpCode::Sub => op_sub(regs[inst.a as usize], regs[inst.b as usize]),
            OpCode::Mul => op_mul(regs[inst.a as usize], regs[inst.b as usize]),
            OpCode::Max => op_max(regs[inst.a as usize], regs[inst.b as usize]),
            OpCode::Min => op_min(regs[inst.a as usize], regs[inst.b as usize]),
        };
        regs[inst.reg as usize] = value;
    }
}

/// Scalar evaluator bound to one program
///
/// Owns its register file, so the buffer always fits the program and its
/// cached constants can only have come from this program.
///
/// The first call runs the full tape. If constant-load elimination has run
/// on the program, later calls run the shorter constant-free tape and read
/// the constants left in the register file by the first pass.
#[derive(Clone, Debug)]
pub struct ScalarEvaluator<'p> {
    program: &'p Program,
    scratch: Scratch<Real>,
}

impl<'p> ScalarEvaluator<'p> {
    /// Create an evaluator with a fresh register file
    pub fn new(program: &'p Program) -> Self {
        ScalarEvaluator {
            program,
            scratch: Scratch::for_program(program),
        }
    }

    /// Evaluate the program at `(x, y)`
    #[inline]
    pub fn eval(&mut self, x: Real, y: Real) -> Real {
        let (tape, regs) = self.scratch.begin_pass(self.program);
        run_tape(tape, regs, x, y);
        self.scratch.get(self.program.output_register())
    }

    /// Evaluate the program at a point
    #[inline]
    pub fn eval_point(&mut self, point: Point) -> Real {
        self.eval(point.x, point.y)
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

/// Evaluate a program at a point with a fresh register file
///
/// Convenient for one-off queries; for many samples keep a
/// [`ScalarEvaluator`] so constant loads are skipped after the first pass.
#[inline]
pub fn eval_compiled(program: &Program, point: Point) -> Real {
    ScalarEvaluator::new(program).eval_point(point)
}

/// Evaluate a program at many points, reusing one register file
pub fn eval_compiled_batch(program: &Program, points: &[Point]) -> Vec<Real> {
    let mut evaluator = ScalarEvaluator::new(program);
    points.iter().map(|&p| evaluator.eval_point(p)).collect()
}

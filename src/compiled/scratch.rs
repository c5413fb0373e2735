//! Scratch register files
//!
//! A scratch buffer is the register file one evaluator writes into. It is
//! allocated once, reused for every sample that evaluator processes, and
//! remembers whether its constant registers have been populated yet.
//!
//! Author: Moroya Sakamoto

use super::instruction::Instruction;
use super::program::Program;

/// Whether a buffer's constant registers already hold their literals
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheState {
    /// Fresh buffer: the next pass must run the full tape
    #[default]
    Uninitialized,
    /// A full pass has run: constant loads may be skipped
    Initialized,
}

/// A register file plus its cache state
///
/// Only ever owned by one evaluator. Constants written by a full pass are
/// never overwritten by the constant-free tape, so they stay valid for
/// every later pass over the same buffer.
#[derive(Clone, Debug)]
pub struct Scratch<T> {
    regs: Vec<T>,
    state: CacheState,
}

impl<T: Copy + Default> Scratch<T> {
    /// Allocate a register file sized for `program`
    pub fn for_program(program: &Program) -> Self {
        Scratch {
            regs: vec![T::default(); program.register_count()],
            state: CacheState::Uninitialized,
        }
    }

    /// Current cache state
    #[inline]
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Forget cached constants; the next pass runs the full tape
    #[inline]
    pub fn reset(&mut self) {
        self.state = CacheState::Uninitialized;
    }

    /// Number of register cells
    #[inline]
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// True if the register file has no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Pick the tape for the next pass and mark the buffer initialized.
    ///
    /// Returns the constant-free tape only when the buffer already holds the
    /// constants and the program has one.
    #[inline]
    pub(crate) fn begin_pass<'p>(&mut self, program: &'p Program) -> (&'p [Instruction], &mut [T]) {
        let tape = match (self.state, program.const_free()) {
            (CacheState::Initialized, Some(cut)) => cut,
            _ => program.instructions(),
        };
        self.state = CacheState::Initialized;
        (tape, &mut self.regs)
    }

    /// Read a register
    #[inline]
    pub(crate) fn get(&self, reg: u32) -> T {
        self.regs[reg as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::eliminate_const_loads;
    use crate::Real;

    fn program() -> Program {
        Program::new(vec![
            Instruction::var_x(0),
            Instruction::constant(7, 2.0),
            Instruction::add(3, 0, 7),
        ])
        .unwrap()
    }

    #[test]
    fn test_sized_from_program() {
        let scratch = Scratch::<Real>::for_program(&program());
        assert_eq!(scratch.len(), 8);
        assert_eq!(scratch.state(), CacheState::Uninitialized);
    }

    #[test]
    fn test_first_pass_runs_full_tape() {
        let mut p = program();
        eliminate_const_loads(&mut p);
        let mut scratch = Scratch::<Real>::for_program(&p);

        let (tape, _) = scratch.begin_pass(&p);
        assert_eq!(tape.len(), 3);
        assert_eq!(scratch.state(), CacheState::Initialized);

        let (tape, _) = scratch.begin_pass(&p);
        assert_eq!(tape.len(), 2);

        scratch.reset();
        let (tape, _) = scratch.begin_pass(&p);
        assert_eq!(tape.len(), 3);
    }

    #[test]
    fn test_no_cut_without_elimination() {
        let p = program();
        let mut scratch = Scratch::<Real>::for_program(&p);
        scratch.begin_pass(&p);
        let (tape, _) = scratch.begin_pass(&p);
        assert_eq!(tape.len(), 3);
    }
}

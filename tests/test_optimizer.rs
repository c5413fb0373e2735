//! Integration tests: Optimizer passes
//!
//! Folding and constant-load elimination never change an evaluated value.
//!
//! Author: Moroya Sakamoto

use alice_raster::prelude::*;
use proptest::prelude::*;

mod common;
use common::*;

#[test]
fn clipped_pair_stats() {
    let mut program = program_from(CLIPPED_PAIR_VM);
    let stats = optimize(&mut program, &OptimizeConfig::default());

    // 0.25 * 2 folds; const loads are _2, _c, _d and the folded _e
    assert_eq!(stats, OptimizeStats { folded: 1, removed: 4 });
    assert_eq!(program.const_count(), 4);
    assert_eq!(program.const_free_len(), program.len() - 4);
}

#[test]
fn optimizing_twice_changes_nothing() {
    let mut program = optimized(CLIPPED_PAIR_VM);
    let once = program.clone();
    let stats = optimize(&mut program, &OptimizeConfig::default());
    assert_eq!(stats.folded, 0);
    assert_eq!(program, once);
}

#[test]
fn circle_has_nothing_to_fold() {
    let mut program = program_from(CIRCLE_VM);
    assert_eq!(fold_constants(&mut program), 0);
    assert_eq!(eliminate_const_loads(&mut program), 1);
    assert_eq!(program.const_free_len(), 7);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn optimization_preserves_values(
        program in arb_program(),
        x in arb_coord(),
        y in arb_coord(),
    ) {
        let before = eval_compiled(&program, Point::new(x, y));

        let mut folded = program.clone();
        fold_constants(&mut folded);
        prop_assert!(same_value(eval_compiled(&folded, Point::new(x, y)), before));

        let mut full = program.clone();
        optimize(&mut full, &OptimizeConfig::default());
        let mut scalar = ScalarEvaluator::new(&full);
        prop_assert!(same_value(scalar.eval(x, y), before));
        prop_assert!(same_value(scalar.eval(x, y), before));
    }

    #[test]
    fn folding_is_idempotent(program in arb_program()) {
        let mut once = program;
        fold_constants(&mut once);
        let mut twice = once.clone();
        prop_assert_eq!(fold_constants(&mut twice), 0);
        prop_assert!(same_tape(twice.instructions(), once.instructions()));
    }

    #[test]
    fn const_free_tape_has_no_loads(program in arb_program()) {
        let mut program = program;
        let removed = eliminate_const_loads(&mut program);
        let tape = program.const_free().expect("elimination ran");
        prop_assert!(tape.iter().all(|inst| !inst.is_const()));
        prop_assert_eq!(tape.len() + removed, program.len());
    }
}

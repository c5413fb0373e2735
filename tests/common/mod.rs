//! Common test helpers for ALICE-Raster integration tests
//!
//! Author: Moroya Sakamoto

#![allow(dead_code)]

use alice_raster::prelude::*;
use proptest::prelude::*;

// ============================================================================
// Standard test tapes
// ============================================================================

/// Unit circle: sqrt(x^2 + y^2) - 1
pub const CIRCLE_VM: &str = "\
# unit circle
_0 var-x
_1 var-y
_2 square _0
_3 square _1
_4 add _2 _3
_5 sqrt _4
_6 const 1
_7 sub _5 _6
";

/// Two circles joined with min, then clipped by a half-plane with max.
/// Contains a constant subexpression (0.25 * 2) that folds.
pub const CLIPPED_PAIR_VM: &str = "\
_0 var-x
_1 var-y
_2 const 0.5
_3 sub _0 _2
_4 add _0 _2
_5 square _3
_6 square _4
_7 square _1
_8 add _5 _7
_9 add _6 _7
_a sqrt _8
_b sqrt _9
_c const 0.25
_d const 2
_e mul _c _d
_f sub _a _e
_10 sub _b _e
_11 min _f _10
_12 neg _1
_13 max _11 _12
";

/// Tape with registers out of numeric order
pub const SHUFFLED_VM: &str = "\
_40 var-y
_7 var-x
_12 const 0.3
_3 mul _7 _40
_ff sub _3 _12
";

/// Parse a tape that must be well-formed
pub fn program_from(source: &str) -> Program {
    let parsed = parse_program(source);
    assert!(parsed.skipped.is_empty(), "malformed test tape: {:?}", parsed.skipped);
    Program::new(parsed.instructions).expect("invalid test tape")
}

/// Fully optimized copy of a tape
pub fn optimized(source: &str) -> Program {
    let mut program = program_from(source);
    optimize(&mut program, &OptimizeConfig::default());
    program
}

// ============================================================================
// Standard test points
// ============================================================================

/// Canonical sample points (origin, axes, diagonals, outside, negative zero)
pub fn test_points() -> Vec<(Real, Real)> {
    vec![
        (0.0, 0.0),
        (1.0, 0.0),
        (0.0, 1.0),
        (-1.0, 0.0),
        (0.5, -0.5),
        (0.7071, 0.7071),
        (2.0, 0.0),
        (-0.0, -0.0),
        (-0.9, 0.95),
    ]
}

/// Compare two values bit-for-bit, treating any two NaNs as equal
pub fn same_value(a: Real, b: Real) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

// ============================================================================
// Random programs
// ============================================================================

const RANDOM_OPS: [OpCode; 9] = [
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

/// Build a valid program from raw draws.
///
/// Registers 0 and 1 hold x and y; instruction `i` writes register `i` and
/// reads two earlier registers picked from `(pick_a, pick_b) % i`.
pub fn build_random_program(draws: &[(usize, usize, usize, i32)]) -> Program {
    let mut instructions = vec![Instruction::var_x(0), Instruction::var_y(1)];
    for (offset, &(op, pick_a, pick_b, literal)) in draws.iter().enumerate() {
        let i = offset + 2;
        let reg = i as Reg;
        let a = (pick_a % i) as Reg;
        let b = (pick_b % i) as Reg;
        let opcode = RANDOM_OPS[op % RANDOM_OPS.len()];
        let inst = match opcode {
            OpCode::Const => Instruction::constant(reg, literal as Real / 8.0),
            op if op.is_unary_op() => Instruction::unary(op, reg, a),
            op => Instruction::binary(op, reg, a, b),
        };
        instructions.push(inst);
    }
    Program::new(instructions).expect("random program is valid by construction")
}

/// Strategy producing random valid programs
pub fn arb_program() -> impl Strategy<Value = Program> {
    proptest::collection::vec(
        (0usize..64, any::<usize>(), any::<usize>(), -32i32..32),
        1..48,
    )
    .prop_map(|draws| build_random_program(&draws))
}

/// Strategy producing sample coordinates in [-1.5, 1.5]
pub fn arb_coord() -> impl Strategy<Value = Real> {
    (-1500i32..=1500).prop_map(|v| v as Real / 1000.0)
}

/// Compare two tapes, treating NaN constants as equal to each other
pub fn same_tape(a: &[Instruction], b: &[Instruction]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(p, q)| {
            (p.opcode, p.reg, p.a, p.b) == (q.opcode, q.reg, q.a, q.b)
                && same_value(p.value, q.value)
        })
}

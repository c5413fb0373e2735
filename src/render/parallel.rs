//! Parallel rasterization
//!
//! The flattened row-major pixel range is cut into one contiguous chunk per
//! worker. Each worker owns a disjoint slice of the output and its own
//! evaluators, so workers share nothing mutable and only meet at the final
//! join.
//!
//! # Chunk layout
//! Chunk bounds fall on pixel indices, not rows, so a chunk may begin or end
//! mid-row. A worker renders:
//! - the partial row at its start, if any, with the scalar evaluator
//! - whole rows four at a time with the lane evaluator (one pass per column,
//!   the four rows' y values in the lanes)
//! - leftover whole rows and the partial row at its end with the scalar evaluator
//!
//! Author: Moroya Sakamoto

use super::RenderError;
use crate::compiled::{LaneEvaluator, Program, ScalarEvaluator, LANES};
use crate::Real;
use std::ops::Range;
use tracing::debug;

/// Pixel value for samples with a negative distance
pub const INSIDE: u8 = 255;
/// Pixel value for everything else, including NaN
pub const OUTSIDE: u8 = 0;

/// Classify one evaluated value. NaN compares false, so it is outside.
#[inline(always)]
pub fn shade(value: Real) -> u8 {
    if value < 0.0 {
        INSIDE
    } else {
        OUTSIDE
    }
}

/// Split `0..total` into `workers` contiguous ranges.
///
/// Every range but the last has `total / workers` elements; the last also
/// takes the remainder. `workers == 0` is treated as one range.
pub fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    let n = workers.max(1);
    let chunk = total / n;
    (0..n)
        .map(|i| {
            let start = i * chunk;
            let end = if i + 1 == n { total } else { start + chunk };
            start..end
        })
        .collect()
}

/// One unit of work inside a chunk
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    /// Columns `cols` of a single row, scalar evaluator
    Scalar {
        /// Image row
        row: usize,
        /// Columns within the row
        cols: Range<usize>,
    },
    /// All columns of rows `first_row..first_row + 4`, lane evaluator
    Lanes {
        /// First of the four rows
        first_row: usize,
    },
}

/// Break a chunk of flat pixel indices into spans.
///
/// Every pixel of `range` is covered by exactly one span.
pub fn plan_chunk(range: Range<usize>, width: usize) -> Vec<Span> {
    let mut spans = Vec::new();
    if width == 0 || range.is_empty() {
        return spans;
    }

    let Range { start, end } = range;

    // First and one-past-last whole rows inside the chunk
    let full_start = start.div_ceil(width);
    let full_end = end / width;

    if full_start > full_end {
        // Chunk sits inside a single row
        spans.push(Span::Scalar {
            row: start / width,
            cols: start % width..end % width,
        });
        return spans;
    }

    if start % width != 0 {
        spans.push(Span::Scalar {
            row: start / width,
            cols: start % width..width,
        });
    }

    let mut row = full_start;
    while row + LANES <= full_end {
        spans.push(Span::Lanes { first_row: row });
        row += LANES;
    }
    while row < full_end {
        spans.push(Span::Scalar { row, cols: 0..width });
        row += 1;
    }

    if end % width != 0 {
        spans.push(Span::Scalar {
            row: full_end,
            cols: 0..end % width,
        });
    }

    spans
}

/// Render the pixels `range` of a `lattice.len()`-square image into `out`.
///
/// `out[i]` receives pixel `range.start + i`. Column `c` samples
/// `x = lattice[c]`; row `r` samples `y = -lattice[r]`.
pub fn render_chunk(program: &Program, lattice: &[Real], range: Range<usize>, out: &mut [u8]) {
    debug_assert_eq!(range.len(), out.len());

    let width = lattice.len();
    let base = range.start;
    let mut scalar = ScalarEvaluator::new(program);
    let mut lanes = LaneEvaluator::new(program);

    for span in plan_chunk(range, width) {
        match span {
            Span::Scalar { row, cols } => {
                let y = -lattice[row];
                for col in cols {
                    out[row * width + col - base] = shade(scalar.eval(lattice[col], y));
                }
            }
            Span::Lanes { first_row } => {
                let ys: [Real; LANES] = std::array::from_fn(|lane| -lattice[first_row + lane]);
                for (col, &x) in lattice.iter().enumerate() {
                    let values = lanes.eval(x, ys);
                    for (lane, &value) in values.iter().enumerate() {
                        out[(first_row + lane) * width + col - base] = shade(value);
                    }
                }
            }
        }
    }
}

/// Render every pixel of `pixels`, using `workers` threads (0 = inline).
pub(crate) fn render_pixels(
    program: &Program,
    lattice: &[Real],
    pixels: &mut [u8],
    workers: usize,
) -> Result<(), RenderError> {
    if workers == 0 {
        render_chunk(program, lattice, 0..pixels.len(), pixels);
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("alice-raster-{i}"))
        .build()?;

    let ranges = partition(pixels.len(), workers);
    pool.scope(|s| {
        let mut rest = pixels;
        for (worker, range) in ranges.into_iter().enumerate() {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            s.spawn(move |_| {
                debug!(worker, start = range.start, end = range.end, "chunk start");
                render_chunk(program, lattice, range, chunk);
            });
        }
    });

    Ok(())
}

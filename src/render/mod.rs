//! Rasterization of a tape over a square image
//!
//! Every pixel samples the program once and records the sign of the result:
//! 255 for a negative distance ("inside"), 0 otherwise.
//!
//! # Coordinates
//! For an image of side `size`, column `c` samples `x = linspace(size)[c]`
//! and row `r` samples `y = -linspace(size)[r]`, so row 0 is the top of the
//! `[-1, 1)` square.
//!
//! Author: Moroya Sakamoto

mod parallel;
mod sampling;

pub use parallel::{partition, plan_chunk, render_chunk, shade, Span, INSIDE, OUTSIDE};
pub use sampling::linspace;

use crate::compiled::Program;
use crate::Real;
use thiserror::Error;
use tracing::info;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The worker pool could not be created
    #[error("failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Rendering parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Image side length in pixels
    pub size: usize,
    /// Worker threads (0 = render on the calling thread)
    pub workers: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            size: 1024,
            workers: 0,
        }
    }
}

/// Single-channel 8-bit square image, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    size: usize,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap a row-major pixel buffer of `size * size` bytes
    ///
    /// # Panics
    /// Panics if `pixels.len() != size * size`.
    pub fn from_pixels(size: usize, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), size * size, "pixel buffer does not match image size");
        Image { size, pixels }
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.size
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.size
    }

    /// Pixel at column `col`, row `row`
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> u8 {
        self.pixels[row * self.size + col]
    }

    /// Row-major pixel bytes
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image, returning its pixel bytes
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of "inside" pixels
    pub fn inside_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p == INSIDE).count()
    }
}

/// Render `program` over a `config.size`-square image.
///
/// With `config.workers > 0` the image is split across that many worker
/// threads; failure to start them is returned as [`RenderError::ThreadPool`].
pub fn render(program: &Program, config: &RenderConfig) -> Result<Image, RenderError> {
    let lattice = linspace(config.size);
    render_with_lattice(program, &lattice, config.workers)
}

/// Render over a caller-supplied lattice (image side = `lattice.len()`).
pub fn render_with_lattice(
    program: &Program,
    lattice: &[Real],
    workers: usize,
) -> Result<Image, RenderError> {
    let size = lattice.len();
    let mut pixels = vec![OUTSIDE; size * size];

    info!(
        size,
        workers,
        instructions = program.len(),
        const_free = program.const_free_len(),
        "render start"
    );
    parallel::render_pixels(program, lattice, &mut pixels, workers)?;

    Ok(Image { size, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiled::{eval_compiled, Instruction};
    use crate::optimize::{optimize, OptimizeConfig};
    use crate::Point;

    fn circle(radius: Real) -> Program {
        let mut program = Program::new(vec![
            Instruction::var_x(0),
            Instruction::var_y(1),
            Instruction::square(2, 0),
            Instruction::square(3, 1),
            Instruction::add(4, 2, 3),
            Instruction::sqrt(5, 4),
            Instruction::constant(6, radius),
            Instruction::sub(7, 5, 6),
        ])
        .unwrap();
        optimize(&mut program, &OptimizeConfig::default());
        program
    }

    fn reference(program: &Program, size: usize) -> Vec<u8> {
        let lattice = linspace(size);
        let mut out = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let d = eval_compiled(program, Point::new(lattice[col], -lattice[row]));
                out.push(shade(d));
            }
        }
        out
    }

    #[test]
    fn test_render_matches_per_pixel_reference() {
        let program = circle(0.6);
        for size in [1, 3, 4, 7, 16, 21] {
            let image = render(&program, &RenderConfig { size, workers: 0 }).unwrap();
            assert_eq!(image.pixels(), &reference(&program, size)[..], "size {size}");
        }
    }

    #[test]
    fn test_worker_counts_agree() {
        let program = circle(0.75);
        let single = render(&program, &RenderConfig { size: 37, workers: 0 }).unwrap();
        for workers in [1, 2, 3, 5, 8, 64] {
            let multi = render(&program, &RenderConfig { size: 37, workers }).unwrap();
            assert_eq!(multi, single, "workers {workers}");
        }
    }

    #[test]
    fn test_image_orientation() {
        // Half-plane y > 0 is inside: top rows lit, bottom rows dark
        let program = Program::new(vec![Instruction::var_y(0), Instruction::neg(1, 0)]).unwrap();
        let image = render(&program, &RenderConfig { size: 8, workers: 2 }).unwrap();
        assert_eq!(image.get(3, 0), INSIDE);
        assert_eq!(image.get(3, 7), OUTSIDE);
    }

    #[test]
    fn test_empty_image() {
        let program = circle(0.5);
        let image = render(&program, &RenderConfig { size: 0, workers: 4 }).unwrap();
        assert!(image.pixels().is_empty());
        assert_eq!(image.inside_count(), 0);
    }
}

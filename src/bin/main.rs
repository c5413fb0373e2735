//! ALICE-Raster CLI
//!
//! Loads a `.vm` tape, optimizes it, rasterizes its sign over a square image
//! and writes the result as a binary PGM.
//!
//! Logging is controlled with `RUST_LOG` (default `alice_raster=info`).
//!
//! Author: Moroya Sakamoto

#[cfg(feature = "cli")]
use alice_raster::prelude::*;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use tracing::{error, info};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "alice-raster")]
#[command(author = "Moroya Sakamoto")]
#[command(version = alice_raster::VERSION)]
#[command(about = "ALICE-Raster: SDF tape evaluator and sign rasterizer", long_about = None)]
struct Cli {
    /// Input tape (.vm)
    #[arg(default_value = "prospero.vm")]
    input: PathBuf,

    /// Output image
    #[arg(short, long, default_value = "out.ppm")]
    output: PathBuf,

    /// Image side length in pixels
    #[arg(short, long, default_value = "1024")]
    size: usize,

    /// Worker threads (0 = render on the main thread)
    #[arg(short = 'j', long = "threads", default_value = "0")]
    threads: usize,

    /// Skip constant folding
    #[arg(long)]
    no_fold: bool,

    /// Skip constant-load elimination
    #[arg(long)]
    no_cut_const: bool,
}

#[cfg(feature = "cli")]
impl Cli {
    fn optimize_config(&self) -> OptimizeConfig {
        OptimizeConfig {
            fold_constants: !self.no_fold,
            eliminate_const_loads: !self.no_cut_const,
        }
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            size: self.size,
            workers: self.threads,
        }
    }
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("alice_raster=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut program = load_program(&cli.input)?;
    info!(elapsed_ms = start.elapsed().as_secs_f64() * 1e3, "parse");

    let start = Instant::now();
    let stats = optimize(&mut program, &cli.optimize_config());
    info!(
        folded = stats.folded,
        removed = stats.removed,
        instructions = program.len(),
        const_free = program.const_free_len(),
        registers = program.register_count(),
        memory_bytes = program.memory_size(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "optimize"
    );

    let start = Instant::now();
    let image = render(&program, &cli.render_config())?;
    info!(
        inside = image.inside_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "render"
    );

    let start = Instant::now();
    write_ppm(&cli.output, &image)?;
    info!(
        path = %cli.output.display(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "write"
    );

    Ok(())
}

#[cfg(feature = "cli")]
fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI not enabled. Build with --features cli");
    std::process::exit(1);
}

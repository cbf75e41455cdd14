//! FastScape CLI - stream-power landscape evolution.
//!
//! Simulates uplift against fluvial erosion on a square grid and writes
//! the final terrain as an ESRI ASCII raster.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

use fastscape::{write_ascii_grid, CumulativeTimer, Grid, ModelConfig, Simulation};

/// Stream-power landscape evolution on a regular grid.
#[derive(Parser)]
#[command(name = "fastscape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid dimension: both width and height, in cells.
    dimension: usize,

    /// Number of time steps to simulate.
    steps: usize,

    /// Path of the ASCII raster written after the run.
    output: PathBuf,

    /// Random seed for the initial terrain.
    seed: u64,
}

fn main() {
    let cli = Cli::parse();

    if cli.dimension < 5 {
        eprintln!("Error: dimension must be at least 5 (two boundary rings plus an interior)");
        process::exit(1);
    }

    println!("A FastScape RB+GPU");
    println!("C Richard Barnes TODO");
    println!("h git_hash    = {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("m Random seed = {}", cli.seed);

    let total = CumulativeTimer::started();

    let grid = Grid::square(cli.dimension);
    let mut sim = Simulation::new(grid, ModelConfig::default());
    sim.seed_random_terrain(cli.seed);
    sim.run(cli.steps, |step| println!("p Step = {}", step));

    sim.timers()
        .report(&mut io::stdout())
        .unwrap_or_else(|e| {
            eprintln!("Error writing timings: {}", e);
            process::exit(1);
        });
    println!(
        "t Total calculation time   = {:>15} microseconds",
        total.elapsed_micros()
    );

    write_ascii_grid(&cli.output, sim.grid(), sim.elevations()).unwrap_or_else(|e| {
        eprintln!("Error writing {}: {}", cli.output.display(), e);
        process::exit(1);
    });
}

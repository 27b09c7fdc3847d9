//! Layered Cube Solver
//!
//! Scrambles a 3x3x3 cube (or loads one from JSON), solves it layer by layer
//! and prints the solution as standard move notation together with a
//! coloured net of the cube.

mod visualization;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rubiks::{persistence, scramble, Cube, Rotation};

/// Number of quarter turns in a scramble when none is given.
const DEFAULT_SCRAMBLE_MOVES: usize = 25;

/// Scrambles and solves 3x3x3 cubes.
#[derive(Parser)]
#[command(name = "rubiks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a scrambled or saved cube and print the moves.
    Solve {
        /// Quarter turns in the scramble.
        #[arg(long, default_value_t = DEFAULT_SCRAMBLE_MOVES)]
        moves: usize,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Solve the cube saved in this JSON file instead of scrambling.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Scramble a solved cube and print or save it as JSON.
    Scramble {
        /// Quarter turns in the scramble.
        #[arg(long, default_value_t = DEFAULT_SCRAMBLE_MOVES)]
        moves: usize,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Write the cube here instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Render a saved cube.
    Show {
        /// JSON file to read.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let result = match cli.command {
        Some(Command::Solve {
            moves,
            seed,
            input,
        }) => run_solve(moves, seed, input),
        Some(Command::Scramble {
            moves,
            seed,
            output,
        }) => run_scramble(moves, seed, output),
        Some(Command::Show { input }) => run_show(input),
        // default: scramble, solve and display
        None => run_solve(DEFAULT_SCRAMBLE_MOVES, None, None),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds a scrambled cube, returning it with the turns used.
fn scrambled(moves: usize, seed: Option<u64>) -> (Cube, Vec<Rotation>) {
    let mut cube = Cube::solved();
    let turns = scramble::scramble(&mut cube, moves, &mut rng_for(seed));
    (cube, turns)
}

fn notation(rotations: &[Rotation]) -> String {
    let moves: Vec<String> = rotations.iter().map(Rotation::to_string).collect();
    moves.join(" ")
}

/// Solves a loaded or freshly scrambled cube and prints the result.
fn run_solve(moves: usize, seed: Option<u64>, input: Option<PathBuf>) -> CliResult {
    let mut cube = match input {
        Some(path) => {
            info!("Loading cube from {}", path.display());
            persistence::load(&path)?
        }
        None => {
            let (cube, turns) = scrambled(moves, seed);
            println!("Scramble ({} moves): {}", turns.len(), notation(&turns));
            cube
        }
    };

    println!("Scrambled cube:");
    visualization::display(&cube);

    let log = cube.solve()?;
    println!(
        "Solution ({} moves, {} before collapsing): {}",
        log.len(),
        log.issued(),
        log
    );
    println!("Solved cube:");
    visualization::display(&cube);
    Ok(())
}

/// Scrambles a cube and writes it out as JSON.
fn run_scramble(moves: usize, seed: Option<u64>, output: Option<PathBuf>) -> CliResult {
    let (cube, turns) = scrambled(moves, seed);
    info!("Scrambled with {}", notation(&turns));

    match output {
        Some(path) => {
            persistence::save(&cube, &path)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", persistence::to_json(&cube)?),
    }
    Ok(())
}

/// Loads and renders a saved cube.
fn run_show(input: PathBuf) -> CliResult {
    let cube = persistence::load(&input)?;
    visualization::display(&cube);
    if cube.is_solved() {
        println!("Cube is solved");
    }
    Ok(())
}

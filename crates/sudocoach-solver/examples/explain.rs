//! Example solving a puzzle and printing the explanation trail.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example explain -- \
//!     "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
//! ```
//!
//! Show only the placements:
//!
//! ```sh
//! cargo run --example explain -- --placements-only "<puzzle>"
//! ```

use std::process;

use clap::Parser;
use sudocoach_solver::{PropagationSolver, Trail, TrailEntry};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The puzzle as 81 cells; digits 1-9 are givens, `.`, `_`, or `0` are
    /// blanks. Whitespace is ignored.
    puzzle: String,

    /// Print only placements, skipping individual candidate eliminations.
    #[arg(long)]
    placements_only: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut solver = match PropagationSolver::from_source(args.puzzle.as_str(), Trail::new()) {
        Ok(solver) => solver,
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(1);
        }
    };

    let state = match solver.solve() {
        Ok(state) => state,
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(1);
        }
    };

    for entry in solver.sink().entries() {
        match entry {
            TrailEntry::Placement(placement) => println!("{placement}"),
            TrailEntry::Deduction(deduction) => {
                if !args.placements_only {
                    println!("  {deduction}");
                }
            }
        }
    }

    println!();
    println!("{:?} — {}", state, solver.grid().to_digit_grid());
}

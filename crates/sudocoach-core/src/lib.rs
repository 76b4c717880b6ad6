//! Core data structures for the sudocoach deduction engine.
//!
//! This crate provides the puzzle-domain types shared by the solver:
//!
//! - [`digit`]: type-safe sudoku digits 1-9
//! - [`position`]: board coordinates and peer relationships
//! - [`set9`]: the generic 9-bit set container underlying candidate sets
//! - [`digit_set`]: a cell's candidate digits
//! - [`house`]: rows, columns, and boxes — the 27 constraint units
//! - [`digit_grid`]: the puzzle input/output format (0 or `.` = blank)
//! - [`grid`]: the candidate grid, an arena of 81 shared candidate sets
//!
//! No solving logic lives here; the deduction rules and the propagation
//! driver are in the `sudocoach-solver` crate.
//!
//! # Examples
//!
//! ```
//! use sudocoach_core::{CandidateGrid, Digit, Position};
//!
//! let mut grid = CandidateGrid::new();
//! grid.settle(Position::new(4, 4), Digit::D5)?;
//!
//! // 5 is no longer a candidate anywhere in row 4, column 4, or box 4.
//! assert!(!grid.candidates_at(Position::new(4, 7)).contains(Digit::D5));
//! # Ok::<(), sudocoach_core::grid::ConsistencyError>(())
//! ```

pub mod digit;
pub mod digit_grid;
pub mod digit_set;
pub mod grid;
pub mod house;
pub mod position;
pub mod set9;

pub use self::{
    digit::Digit,
    digit_grid::DigitGrid,
    digit_set::DigitSet,
    grid::CandidateGrid,
    house::{House, HouseMask},
    position::Position,
};

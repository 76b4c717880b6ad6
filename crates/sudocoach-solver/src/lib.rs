//! Constraint-propagation sudoku solver with an explanation trail.
//!
//! This crate narrows per-cell candidate sets with classic deduction rules
//! until cells collapse to single values, recording a human-auditable trail
//! of every deduction along the way. It never searches or backtracks: when
//! propagation reaches a fixpoint with unsolved cells, the solve ends in a
//! [`Stalled`](SolveState::Stalled) state instead of guessing.
//!
//! # Overview
//!
//! - [`group`]: the 27 constraint units and the three elimination passes —
//!   naked subsets, hidden subsets, and pointing (box/line) reductions
//! - [`subset_forest`]: the generic subset-consolidation forest shared by
//!   the naked and hidden passes
//! - [`trail`]: deduction and placement events, and the [`ExplanationSink`]
//!   they are delivered to
//! - [`source`]: the [`PuzzleSource`] input seam
//! - [`propagation_solver`]: the worklist fixpoint driver
//!
//! # Examples
//!
//! ```
//! use sudocoach_solver::{PropagationSolver, SolveState, Trail};
//!
//! let puzzle = "
//!     .23 456 789
//!     456 789 123
//!     789 123 456
//!     234 .67 891
//!     567 891 234
//!     891 234 567
//!     345 678 912
//!     678 912 345
//!     912 345 67.
//! ";
//! let mut solver = PropagationSolver::from_source(puzzle, Trail::new())?;
//! let state = solver.solve()?;
//!
//! assert_eq!(state, SolveState::Done);
//! assert!(solver.solved());
//! for placement in solver.sink().placements() {
//!     println!("{placement}");
//! }
//! # Ok::<(), sudocoach_solver::SolverError>(())
//! ```

use derive_more::{Display, Error, From};
use sudocoach_core::{digit_grid::ParseGridError, grid::ConsistencyError};

pub mod group;
pub mod propagation_solver;
pub mod source;
pub mod subset_forest;
pub mod trail;

pub use self::{
    group::{Group, Groups, Neighbor},
    propagation_solver::{PropagationSolver, SolveState},
    source::PuzzleSource,
    subset_forest::SubsetForest,
    trail::{
        Deduction, EliminationRule, ExplanationSink, Placement, PlacementReason, Trail, TrailEntry,
    },
};

/// Errors surfaced by the solver.
///
/// A stalled solve is *not* an error; it is reported through
/// [`SolveState::Stalled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SolverError {
    /// The grid reached a contradiction: the puzzle is unsatisfiable or the
    /// input was conflicting.
    #[display("inconsistent grid: {_0}")]
    Inconsistent(ConsistencyError),
    /// The puzzle input was malformed and rejected before propagation.
    #[display("malformed puzzle: {_0}")]
    Malformed(ParseGridError),
}

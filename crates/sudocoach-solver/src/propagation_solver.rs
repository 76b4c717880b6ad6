//! The worklist fixpoint driver.
//!
//! [`PropagationSolver`] ties the elimination passes into a convergent solve
//! loop: a FIFO worklist of cells to revisit, the three passes run over each
//! dequeued cell's row, column, and box, and a placement scan that settles
//! forced and only-value cells between rounds. Candidate sets only ever
//! shrink, so the loop terminates; when no placement can be found the solve
//! ends in [`SolveState::Done`] or [`SolveState::Stalled`].
//!
//! Solving is resumable: [`next_placement`](PropagationSolver::next_placement)
//! yields one placement at a time and can be called again from exactly where
//! the consumer stopped.

use std::collections::VecDeque;

use log::{debug, trace};
use sudocoach_core::{
    CandidateGrid, Digit, DigitGrid, DigitSet, House, Position, grid::CandidateChange,
};

use crate::{
    SolverError,
    group::Groups,
    source::PuzzleSource,
    trail::{Deduction, EliminationRule, ExplanationSink, Placement, PlacementReason},
};

/// Where a solve currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    /// Constructed; no propagation has run yet.
    Pending,
    /// Propagation is under way (or paused between placements).
    Processing,
    /// All 81 cells are settled. Terminal.
    Done,
    /// Propagation reached a fixpoint with unsolved cells left. Terminal —
    /// finishing would require search, which this solver deliberately does
    /// not perform.
    Stalled,
}

/// Constraint-propagation solver with an explanation trail.
///
/// Owns the candidate grid, the 27 wired groups, and the
/// [`ExplanationSink`] handed in at construction. Deterministic: the same
/// puzzle always produces the same trail.
///
/// # Examples
///
/// Step-by-step solving:
///
/// ```
/// use sudocoach_solver::{PropagationSolver, Trail};
///
/// let puzzle = "
///     53. .7. ...
///     6.. 195 ...
///     .98 ... .6.
///     8.. .6. ..3
///     4.. 8.3 ..1
///     7.. .2. ..6
///     .6. ... 28.
///     ... 419 ..5
///     ... .8. .79
/// ";
/// let mut solver = PropagationSolver::from_source(puzzle, Trail::new())?;
/// while let Some(placement) = solver.next_placement()? {
///     println!("{placement}");
/// }
/// assert!(solver.solved());
/// # Ok::<(), sudocoach_solver::SolverError>(())
/// ```
#[derive(Debug)]
pub struct PropagationSolver<S> {
    grid: CandidateGrid,
    groups: Groups,
    worklist: VecDeque<Position>,
    queued: [bool; 81],
    pending: VecDeque<Placement>,
    state: SolveState,
    sink: S,
}

impl<S: ExplanationSink> PropagationSolver<S> {
    /// Creates a solver for a puzzle, settling every given digit and seeding
    /// the worklist with the blank cells.
    ///
    /// Peer eliminations performed while settling the givens are reported to
    /// the sink as [`EliminationRule::Direct`] deductions.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the givens conflict with
    /// each other.
    pub fn new(puzzle: &DigitGrid, sink: S) -> Result<Self, SolverError> {
        let mut solver = Self {
            grid: CandidateGrid::new(),
            groups: Groups::new(),
            worklist: VecDeque::new(),
            queued: [false; 81],
            pending: VecDeque::new(),
            state: SolveState::Pending,
            sink,
        };
        for (pos, digit) in puzzle.filled_cells() {
            let changes = solver.grid.settle(pos, digit)?;
            solver.emit_direct(pos, &changes);
        }
        for pos in Position::ROWS.into_iter().flatten() {
            if !solver.grid.is_settled(pos) {
                solver.enqueue(pos);
            }
        }
        Ok(solver)
    }

    /// Creates a solver from a [`PuzzleSource`].
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Malformed`] for malformed input and
    /// [`SolverError::Inconsistent`] for conflicting givens.
    pub fn from_source(mut source: impl PuzzleSource, sink: S) -> Result<Self, SolverError> {
        let puzzle = source.initial_grid()?;
        Self::new(&puzzle, sink)
    }

    /// Returns the candidate grid in its current state.
    #[must_use]
    pub fn grid(&self) -> &CandidateGrid {
        &self.grid
    }

    /// Returns the current solve state.
    #[must_use]
    pub fn state(&self) -> SolveState {
        self.state
    }

    /// Returns `true` if the solve finished with all cells settled.
    #[must_use]
    pub fn solved(&self) -> bool {
        self.state == SolveState::Done
    }

    /// Returns `true` if the solve reached a fixpoint with unsolved cells.
    #[must_use]
    pub fn stalled(&self) -> bool {
        self.state == SolveState::Stalled
    }

    /// Returns the explanation sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the solver and returns the explanation sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Advances the solve to its next placement and returns it.
    ///
    /// Placements found by one scan are settled one per call; once the batch
    /// drains, the worklist is reprocessed and the grid rescanned. Returns
    /// `None` when the solve has reached a terminal state — check
    /// [`solved`](Self::solved) or [`stalled`](Self::stalled) to see which.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if propagation uncovers a
    /// contradiction (the puzzle is unsatisfiable). Errors are fatal; the
    /// solver must not be stepped further afterwards.
    pub fn next_placement(&mut self) -> Result<Option<Placement>, SolverError> {
        loop {
            if let Some(placement) = self.pending.pop_front() {
                if self.grid.value_at(placement.pos) == Some(placement.digit) {
                    continue;
                }
                let changes = self.grid.settle(placement.pos, placement.digit)?;
                debug!("{placement}");
                self.sink.record_placement(placement);
                self.emit_direct(placement.pos, &changes);
                for peer in placement.pos.peers() {
                    if !self.grid.is_settled(peer) {
                        self.enqueue(peer);
                    }
                }
                return Ok(Some(placement));
            }

            if matches!(self.state, SolveState::Done | SolveState::Stalled) {
                return Ok(None);
            }
            self.state = SolveState::Processing;
            self.drain_worklist()?;
            self.scan_placements();
            if self.pending.is_empty() {
                self.state = if self.grid.is_solved() {
                    SolveState::Done
                } else {
                    SolveState::Stalled
                };
                debug!(
                    "fixpoint: {:?} with {} cells settled",
                    self.state,
                    self.grid.settled_count()
                );
                return Ok(None);
            }
        }
    }

    /// Runs the solve to its terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if propagation uncovers a
    /// contradiction.
    pub fn solve(&mut self) -> Result<SolveState, SolverError> {
        while self.next_placement()?.is_some() {}
        Ok(self.state)
    }

    /// Drains the worklist, running the three elimination passes over each
    /// dequeued cell's row, column, and box. Cells whose candidates shrink
    /// are re-enqueued; empty deltas never produce work.
    fn drain_worklist(&mut self) -> Result<(), SolverError> {
        while let Some(pos) = self.worklist.pop_front() {
            self.queued[pos.index()] = false;
            let houses = House::of(pos);
            for house in houses {
                let deductions = self.groups.group(house).naked_subsets(&mut self.grid)?;
                self.emit(deductions);
            }
            for house in houses {
                let deductions = self.groups.group(house).hidden_subsets(&mut self.grid)?;
                self.emit(deductions);
            }
            for house in houses {
                let deductions = self.groups.group(house).pointing_subsets(&mut self.grid)?;
                self.emit(deductions);
            }
        }
        Ok(())
    }

    /// Scans the grid in row-major order for settleable cells: forced
    /// singles first, then only-value slots per row, column, and box. Cells
    /// are collected, not settled — placement happens in
    /// [`next_placement`](Self::next_placement).
    fn scan_placements(&mut self) {
        for pos in Position::ROWS.into_iter().flatten() {
            if self.grid.is_settled(pos) {
                continue;
            }
            let candidates = self.grid.candidates_at(pos);
            if let Some(digit) = candidates.as_single() {
                self.pending.push_back(Placement {
                    pos,
                    digit,
                    reason: PlacementReason::Forced,
                });
                continue;
            }
            'candidates: for digit in candidates {
                let checks = [
                    (House::Row { y: pos.y() }, PlacementReason::OnlyValueInRow),
                    (
                        House::Column { x: pos.x() },
                        PlacementReason::OnlyValueInColumn,
                    ),
                    (
                        House::Box {
                            index: pos.box_index(),
                        },
                        PlacementReason::OnlyValueInSquare,
                    ),
                ];
                for (house, reason) in checks {
                    if self.slot_count(house, digit) == 1 {
                        self.pending.push_back(Placement { pos, digit, reason });
                        break 'candidates;
                    }
                }
            }
        }
    }

    /// Counts the cells of a house still allowing a digit.
    fn slot_count(&self, house: House, digit: Digit) -> usize {
        house
            .positions()
            .into_iter()
            .filter(|&pos| self.grid.candidates_at(pos).contains(digit))
            .count()
    }

    fn emit(&mut self, deductions: Vec<Deduction>) {
        for deduction in deductions {
            trace!("{deduction}");
            self.enqueue(deduction.pos);
            self.sink.record_deduction(deduction);
        }
    }

    /// Reports a placement's peer eliminations as direct deductions.
    fn emit_direct(&mut self, source: Position, changes: &[CandidateChange]) {
        let why_values = self
            .grid
            .value_at(source)
            .map_or(DigitSet::EMPTY, |digit| DigitSet::from_iter([digit]));
        for change in changes {
            let deduction = Deduction {
                pos: change.pos,
                before: change.before,
                after: change.after,
                rule: EliminationRule::Direct,
                group: shared_house(source, change.pos),
                why_cells: vec![source],
                why_values,
            };
            trace!("{deduction}");
            self.enqueue(change.pos);
            self.sink.record_deduction(deduction);
        }
    }

    fn enqueue(&mut self, pos: Position) {
        // Re-queuing an already-queued cell is harmless; the flag is purely
        // an efficiency dedup.
        if !self.queued[pos.index()] {
            self.queued[pos.index()] = true;
            self.worklist.push_back(pos);
        }
    }
}

/// Picks the house shared by two peer cells: row, then column, then box.
fn shared_house(a: Position, b: Position) -> House {
    if a.y() == b.y() {
        House::Row { y: a.y() }
    } else if a.x() == b.x() {
        House::Column { x: a.x() }
    } else {
        House::Box {
            index: a.box_index(),
        }
    }
}

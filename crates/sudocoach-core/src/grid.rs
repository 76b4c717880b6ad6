//! The candidate grid: 81 cells of shared candidate state.

use derive_more::{Display, Error};

use crate::{
    digit::Digit, digit_grid::DigitGrid, digit_set::DigitSet, position::Position,
};

/// Fatal contradiction detected while mutating the grid.
///
/// A contradiction means the puzzle is unsatisfiable (or the caller fed the
/// grid conflicting placements); it is distinct from a solver merely running
/// out of deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConsistencyError {
    /// A cell's candidate set would become empty while the cell is still
    /// unsettled.
    #[display("no candidates left at {pos}")]
    NoCandidates {
        /// The cell whose candidates ran out.
        pos: Position,
    },
    /// A placement conflicts with the cell's current state: the cell is
    /// already settled with a different digit, or the digit is not among its
    /// remaining candidates.
    #[display("cell {pos} cannot take {digit}")]
    ConflictingPlacement {
        /// The cell being placed into.
        pos: Position,
        /// The digit that cannot be placed.
        digit: Digit,
    },
}

/// One cell's candidate delta, recorded by [`CandidateGrid::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateChange {
    /// The cell whose candidates shrank.
    pub pos: Position,
    /// Candidates before the change.
    pub before: DigitSet,
    /// Candidates after the change.
    pub after: DigitSet,
}

/// The 81-cell candidate arena — the single source of truth for candidate
/// sets.
///
/// Each cell holds either a settled digit or a non-empty set of remaining
/// candidates. Rows, columns, and boxes address cells in this arena by
/// [`Position`], never by copy, so a mutation made while working on one
/// house is immediately visible to the other two houses covering the same
/// cell.
///
/// # Invariants
///
/// - A cell is settled *iff* its candidate set is empty.
/// - An unsettled cell always retains at least one candidate; an operation
///   that would empty one fails with [`ConsistencyError::NoCandidates`].
/// - A cell with exactly one candidate is *forced* but not settled;
///   [`settle`](Self::settle) is the explicit transition.
///
/// # Examples
///
/// ```
/// use sudocoach_core::{CandidateGrid, Digit, Position};
///
/// let mut grid = CandidateGrid::new();
/// let changes = grid.settle(Position::new(0, 0), Digit::D5)?;
///
/// // All 20 peers lost candidate 5.
/// assert_eq!(changes.len(), 20);
/// assert!(grid.is_settled(Position::new(0, 0)));
/// assert!(grid.candidates_at(Position::new(0, 0)).is_empty());
/// # Ok::<(), sudocoach_core::grid::ConsistencyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGrid {
    values: [Option<Digit>; 81],
    candidates: [DigitSet; 81],
}

impl Default for CandidateGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateGrid {
    /// Creates a grid with every cell blank and every candidate available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: [None; 81],
            candidates: [DigitSet::FULL; 81],
        }
    }

    /// Returns the settled digit at a position, or `None` if unsettled.
    #[must_use]
    pub fn value_at(&self, pos: Position) -> Option<Digit> {
        self.values[pos.index()]
    }

    /// Returns the candidate set at a position.
    ///
    /// Settled cells have an empty candidate set.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        self.candidates[pos.index()]
    }

    /// Returns `true` if the cell has a settled digit.
    #[must_use]
    pub fn is_settled(&self, pos: Position) -> bool {
        self.values[pos.index()].is_some()
    }

    /// Returns `true` if all 81 cells are settled.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Returns the number of settled cells.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// Returns the total number of candidates remaining across all cells.
    ///
    /// Every deduction strictly decreases this count, which is what bounds
    /// the solver's work.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.iter().map(DigitSet::len).sum()
    }

    /// Settles a digit into a cell.
    ///
    /// Records the value, empties the cell's own candidate set, and removes
    /// the digit from the candidate sets of all 20 peers. Returns the
    /// per-peer deltas, containing only peers that actually changed.
    ///
    /// Re-settling a cell with the digit it already holds is a no-op.
    ///
    /// # Errors
    ///
    /// - [`ConsistencyError::ConflictingPlacement`] if the cell is settled
    ///   with a different digit, or `digit` is not among its candidates.
    /// - [`ConsistencyError::NoCandidates`] if removing `digit` would empty
    ///   an unsettled peer. The grid is left partially updated; the error is
    ///   fatal to the solve, not a recoverable state.
    pub fn settle(
        &mut self,
        pos: Position,
        digit: Digit,
    ) -> Result<Vec<CandidateChange>, ConsistencyError> {
        if let Some(existing) = self.value_at(pos) {
            if existing == digit {
                return Ok(Vec::new());
            }
            return Err(ConsistencyError::ConflictingPlacement { pos, digit });
        }
        if !self.candidates_at(pos).contains(digit) {
            return Err(ConsistencyError::ConflictingPlacement { pos, digit });
        }

        self.values[pos.index()] = Some(digit);
        self.candidates[pos.index()] = DigitSet::EMPTY;

        let mut changes = Vec::new();
        for peer in pos.peers() {
            let before = self.candidates_at(peer);
            if !before.contains(digit) {
                continue;
            }
            let mut after = before;
            after.remove(digit);
            if after.is_empty() && !self.is_settled(peer) {
                return Err(ConsistencyError::NoCandidates { pos: peer });
            }
            self.candidates[peer.index()] = after;
            changes.push(CandidateChange { pos: peer, before, after });
        }
        Ok(changes)
    }

    /// Removes a single candidate from a cell.
    ///
    /// Idempotent: removing an already-absent candidate returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError::NoCandidates`] if the removal would empty
    /// an unsettled cell.
    pub fn remove_candidate(
        &mut self,
        pos: Position,
        digit: Digit,
    ) -> Result<bool, ConsistencyError> {
        let current = self.candidates_at(pos);
        if !current.contains(digit) {
            return Ok(false);
        }
        let mut after = current;
        after.remove(digit);
        if after.is_empty() && !self.is_settled(pos) {
            return Err(ConsistencyError::NoCandidates { pos });
        }
        self.candidates[pos.index()] = after;
        Ok(true)
    }

    /// Returns a digit grid containing the settled cells, blanks elsewhere.
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        let mut grid = DigitGrid::new();
        for (i, value) in self.values.iter().enumerate() {
            if value.is_some() {
                #[expect(clippy::cast_possible_truncation)]
                let pos = Position::new((i % 9) as u8, (i / 9) as u8);
                grid.set(pos, *value);
            }
        }
        grid
    }
}

//! Deduction and placement events, and the sink they are delivered to.
//!
//! Every elimination the solver performs is reported as a [`Deduction`] and
//! every settled cell as a [`Placement`], in emission order. Consumers see
//! the trail through the [`ExplanationSink`] trait, which is handed to the
//! solver at construction; the solver itself keeps no ambient log.
//!
//! Event order matters: a deduction's justification cells and values are
//! meaningful relative to the grid state at the moment it was emitted.

use std::fmt::{self, Display};

use sudocoach_core::{Digit, DigitSet, House, Position};

/// The rule that justified a candidate elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationRule {
    /// Peer elimination following a placement: a settled cell's digit cannot
    /// recur in its row, column, or box.
    Direct,
    /// Naked subset: N cells confined to exactly N shared candidate values,
    /// so those values are removed from the rest of the house.
    Naked,
    /// Hidden subset: N values confined to exactly N shared cells, so those
    /// cells keep only the confined values.
    Hidden,
    /// Pointing subset: values confined to a 3-cell box/line intersection,
    /// removed from the neighboring house outside the intersection.
    Pointing,
}

impl Display for EliminationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Direct => "direct",
            Self::Naked => "naked",
            Self::Hidden => "hidden",
            Self::Pointing => "pointing",
        };
        f.write_str(name)
    }
}

/// A single candidate elimination, with its justification.
///
/// Emitted only when `after` differs from `before`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    /// The cell whose candidates shrank.
    pub pos: Position,
    /// Candidates before the elimination.
    pub before: DigitSet,
    /// Candidates after the elimination.
    pub after: DigitSet,
    /// The rule that justified the elimination.
    pub rule: EliminationRule,
    /// The house the rule was evaluated in.
    pub group: House,
    /// The cells whose candidate structure justified the rule.
    pub why_cells: Vec<Position>,
    /// The values the justifying cells confined.
    pub why_values: DigitSet,
}

impl Display for Deduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {:?} -> {:?} ({:?} in {})",
            self.rule, self.pos, self.before, self.after, self.why_values, self.group,
        )
    }
}

/// Why a cell was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementReason {
    /// The cell had exactly one remaining candidate.
    Forced,
    /// The value had exactly one remaining slot in the cell's row.
    OnlyValueInRow,
    /// The value had exactly one remaining slot in the cell's column.
    OnlyValueInColumn,
    /// The value had exactly one remaining slot in the cell's box.
    OnlyValueInSquare,
}

impl Display for PlacementReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Forced => "forced",
            Self::OnlyValueInRow => "only_value_in_row",
            Self::OnlyValueInColumn => "only_value_in_col",
            Self::OnlyValueInSquare => "only_value_in_square",
        };
        f.write_str(name)
    }
}

/// A settled cell, with the reason it could be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The settled cell.
    pub pos: Position,
    /// The digit placed there.
    pub digit: Digit,
    /// The trigger that allowed the placement.
    pub reason: PlacementReason,
}

impl Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "place {} at {} ({})", self.digit, self.pos, self.reason)
    }
}

/// Receiver for the ordered stream of solver events.
///
/// The sink is append-only; implementations must preserve emission order.
pub trait ExplanationSink {
    /// Records one candidate elimination.
    fn record_deduction(&mut self, deduction: Deduction);

    /// Records one settled cell.
    fn record_placement(&mut self, placement: Placement);
}

/// Discards all events.
impl ExplanationSink for () {
    fn record_deduction(&mut self, _deduction: Deduction) {}

    fn record_placement(&mut self, _placement: Placement) {}
}

impl<S: ExplanationSink + ?Sized> ExplanationSink for &mut S {
    fn record_deduction(&mut self, deduction: Deduction) {
        (**self).record_deduction(deduction);
    }

    fn record_placement(&mut self, placement: Placement) {
        (**self).record_placement(placement);
    }
}

/// One entry of a recorded trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailEntry {
    /// A candidate elimination.
    Deduction(Deduction),
    /// A settled cell.
    Placement(Placement),
}

/// An in-memory [`ExplanationSink`] preserving emission order.
///
/// # Examples
///
/// ```
/// use sudocoach_solver::{PropagationSolver, Trail};
///
/// let puzzle = format!("5{}", ".".repeat(80));
/// let mut solver = PropagationSolver::from_source(puzzle.as_str(), Trail::new())?;
/// solver.solve()?;
/// assert!(solver.sink().deductions().count() > 0);
/// # Ok::<(), sudocoach_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// Returns the deductions in emission order.
    pub fn deductions(&self) -> impl Iterator<Item = &Deduction> {
        self.entries.iter().filter_map(|entry| match entry {
            TrailEntry::Deduction(deduction) => Some(deduction),
            TrailEntry::Placement(_) => None,
        })
    }

    /// Returns the placements in emission order.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.entries.iter().filter_map(|entry| match entry {
            TrailEntry::Placement(placement) => Some(placement),
            TrailEntry::Deduction(_) => None,
        })
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl ExplanationSink for Trail {
    fn record_deduction(&mut self, deduction: Deduction) {
        self.entries.push(TrailEntry::Deduction(deduction));
    }

    fn record_placement(&mut self, placement: Placement) {
        self.entries.push(TrailEntry::Placement(placement));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deduction() -> Deduction {
        Deduction {
            pos: Position::new(3, 0),
            before: DigitSet::from_iter([Digit::D3, Digit::D5, Digit::D9]),
            after: DigitSet::from_iter([Digit::D3, Digit::D5]),
            rule: EliminationRule::Naked,
            group: House::Row { y: 0 },
            why_cells: vec![Position::new(0, 0), Position::new(2, 0)],
            why_values: DigitSet::from_iter([Digit::D7, Digit::D8, Digit::D9]),
        }
    }

    #[test]
    fn test_trail_preserves_order() {
        let mut trail = Trail::new();
        trail.record_deduction(sample_deduction());
        trail.record_placement(Placement {
            pos: Position::new(3, 0),
            digit: Digit::D3,
            reason: PlacementReason::Forced,
        });
        trail.record_deduction(sample_deduction());

        assert_eq!(trail.len(), 3);
        assert!(matches!(trail.entries()[0], TrailEntry::Deduction(_)));
        assert!(matches!(trail.entries()[1], TrailEntry::Placement(_)));
        assert!(matches!(trail.entries()[2], TrailEntry::Deduction(_)));
        assert_eq!(trail.deductions().count(), 2);
        assert_eq!(trail.placements().count(), 1);
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(PlacementReason::Forced.to_string(), "forced");
        assert_eq!(
            PlacementReason::OnlyValueInRow.to_string(),
            "only_value_in_row"
        );
        assert_eq!(
            PlacementReason::OnlyValueInColumn.to_string(),
            "only_value_in_col"
        );
        assert_eq!(
            PlacementReason::OnlyValueInSquare.to_string(),
            "only_value_in_square"
        );
    }

    #[test]
    fn test_rule_labels() {
        assert_eq!(EliminationRule::Direct.to_string(), "direct");
        assert_eq!(EliminationRule::Naked.to_string(), "naked");
        assert_eq!(EliminationRule::Hidden.to_string(), "hidden");
        assert_eq!(EliminationRule::Pointing.to_string(), "pointing");
    }
}

//! The 27 constraint groups and their elimination passes.
//!
//! A [`Group`] wraps one house of the shared candidate grid and exposes the
//! three subset eliminations: naked subsets, hidden subsets, and pointing
//! (box/line) reductions. Groups do not copy candidate state; every pass
//! reads and mutates the [`CandidateGrid`] arena directly, so work done
//! through one group is immediately visible to the overlapping groups.
//!
//! [`Groups`] owns all 27 groups and wires the box/line neighbor triples
//! once at construction.

use std::collections::BTreeMap;

use sudocoach_core::{
    CandidateGrid, Digit, DigitSet, House, HouseMask, Position, digit_set::DigitSemantics,
    grid::ConsistencyError, house::CellIndexSemantics,
};

use crate::{
    subset_forest::SubsetForest,
    trail::{Deduction, EliminationRule},
};

/// A 3-cell intersection shared with another house.
///
/// Registration is symmetric: a box holds one neighbor per intersecting row
/// and column segment, and each of those rows and columns holds the same
/// segment pointing back at the box.
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// The three shared cells.
    pub cells: [Position; 3],
    /// The house on the other side of the intersection.
    pub house: House,
}

impl Neighbor {
    fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.cells.iter().any(|pos| other.contains(*pos))
    }
}

/// One constraint group: a house plus its registered neighbor segments.
#[derive(Debug, Clone)]
pub struct Group {
    house: House,
    neighbors: Vec<Neighbor>,
}

impl Group {
    /// Returns the house this group constrains.
    #[must_use]
    pub fn house(&self) -> House {
        self.house
    }

    /// Returns the registered neighbor segments.
    #[must_use]
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// Runs naked-subset elimination over this group.
    ///
    /// Cells are keyed by their exact candidate set; whenever N candidate
    /// values are confined to exactly N cells, those values are removed from
    /// every other cell of the group. Subset consolidation handles all sizes
    /// at once — see [`SubsetForest`].
    ///
    /// Returns the eliminations performed, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if an elimination empties an unsettled
    /// cell — the puzzle is unsatisfiable.
    pub fn naked_subsets(
        &self,
        grid: &mut CandidateGrid,
    ) -> Result<Vec<Deduction>, ConsistencyError> {
        let members = self.house.positions();

        let mut by_candidates = BTreeMap::<DigitSet, HouseMask>::new();
        for (i, pos) in (0..).zip(members) {
            let candidates = grid.candidates_at(pos);
            if candidates.len() <= 1 {
                continue;
            }
            by_candidates.entry(candidates).or_default().insert(i);
        }

        let mut entries: Vec<_> = by_candidates.into_iter().collect();
        entries.sort_by_key(|&(id, _)| (id.len(), id));
        let mut forest = SubsetForest::<DigitSemantics, CellIndexSemantics>::new();
        for (id, data) in entries {
            forest.insert(id, data);
        }

        let mut deductions = Vec::new();
        for (values, cell_mask) in collect_exact(&forest) {
            for (i, pos) in (0..).zip(members) {
                if cell_mask.contains(i) {
                    continue;
                }
                let before = grid.candidates_at(pos);
                if before.is_empty() {
                    continue;
                }
                for digit in values {
                    grid.remove_candidate(pos, digit)?;
                }
                let after = grid.candidates_at(pos);
                if after != before {
                    deductions.push(Deduction {
                        pos,
                        before,
                        after,
                        rule: EliminationRule::Naked,
                        group: self.house,
                        why_cells: mask_positions(cell_mask, &members),
                        why_values: values,
                    });
                }
            }
        }
        Ok(deductions)
    }

    /// Runs hidden-subset elimination over this group.
    ///
    /// Values are keyed by the exact set of cells still allowing them;
    /// whenever N values are confined to exactly N cells, those cells keep
    /// only the confined values. The symmetric twin of
    /// [`naked_subsets`](Self::naked_subsets), using the same forest with
    /// the id/data roles swapped.
    ///
    /// Returns the eliminations performed, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if an elimination empties an unsettled
    /// cell.
    pub fn hidden_subsets(
        &self,
        grid: &mut CandidateGrid,
    ) -> Result<Vec<Deduction>, ConsistencyError> {
        let members = self.house.positions();

        let mut by_cells = BTreeMap::<HouseMask, DigitSet>::new();
        for digit in Digit::ALL {
            let mut mask = HouseMask::new();
            for (i, pos) in (0..).zip(members) {
                if grid.candidates_at(pos).contains(digit) {
                    mask.insert(i);
                }
            }
            if !mask.is_empty() {
                by_cells.entry(mask).or_default().insert(digit);
            }
        }

        let mut entries: Vec<_> = by_cells.into_iter().collect();
        entries.sort_by_key(|&(id, _)| (id.len(), id));
        let mut forest = SubsetForest::<CellIndexSemantics, DigitSemantics>::new();
        for (id, data) in entries {
            forest.insert(id, data);
        }

        let mut deductions = Vec::new();
        for (cell_mask, values) in collect_exact(&forest) {
            for i in cell_mask {
                let pos = members[usize::from(i)];
                let before = grid.candidates_at(pos);
                let after = before.intersection(values);
                if after == before {
                    continue;
                }
                for digit in before.difference(values) {
                    grid.remove_candidate(pos, digit)?;
                }
                deductions.push(Deduction {
                    pos,
                    before,
                    after,
                    rule: EliminationRule::Hidden,
                    group: self.house,
                    why_cells: mask_positions(cell_mask, &members),
                    why_values: values,
                });
            }
        }
        Ok(deductions)
    }

    /// Runs pointing-subset (box/line) reduction over this group.
    ///
    /// For each registered neighbor segment N, any value present in N but in
    /// none of this group's other disjoint segments is confined to N within
    /// this group — so it is removed from every cell of the neighboring
    /// house outside N. Covers both pointing (box into line) and claiming
    /// (line into box), evaluated independently per segment.
    ///
    /// Returns the eliminations performed, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if an elimination empties an unsettled
    /// cell.
    pub fn pointing_subsets(
        &self,
        grid: &mut CandidateGrid,
    ) -> Result<Vec<Deduction>, ConsistencyError> {
        let mut deductions = Vec::new();
        for (n_ix, neighbor) in self.neighbors.iter().enumerate() {
            let mut exclusive = DigitSet::EMPTY;
            for &pos in &neighbor.cells {
                exclusive |= grid.candidates_at(pos);
            }
            for (o_ix, other) in self.neighbors.iter().enumerate() {
                if o_ix == n_ix || other.overlaps(neighbor) {
                    continue;
                }
                for &pos in &other.cells {
                    exclusive = exclusive.difference(grid.candidates_at(pos));
                }
            }
            if exclusive.is_empty() {
                continue;
            }

            for pos in neighbor.house.positions() {
                if neighbor.contains(pos) {
                    continue;
                }
                let before = grid.candidates_at(pos);
                if before.is_empty() {
                    continue;
                }
                for digit in exclusive {
                    grid.remove_candidate(pos, digit)?;
                }
                let after = grid.candidates_at(pos);
                if after != before {
                    deductions.push(Deduction {
                        pos,
                        before,
                        after,
                        rule: EliminationRule::Pointing,
                        group: self.house,
                        why_cells: neighbor.cells.to_vec(),
                        why_values: exclusive,
                    });
                }
            }
        }
        Ok(deductions)
    }
}

/// Collects the satisfied nodes of a forest in visit order.
fn collect_exact<IdS, DataS>(
    forest: &SubsetForest<IdS, DataS>,
) -> Vec<(
    sudocoach_core::set9::BitSet9<IdS>,
    sudocoach_core::set9::BitSet9<DataS>,
)> {
    let mut exact = Vec::new();
    forest.visit_exact(|id, data| exact.push((id, data)));
    exact
}

fn mask_positions(mask: HouseMask, members: &[Position; 9]) -> Vec<Position> {
    mask.iter().map(|i| members[usize::from(i)]).collect()
}

/// All 27 groups, with box/line neighbor segments wired symmetrically.
///
/// Built once per solve; the groups are never destroyed or re-wired while
/// the solve runs.
#[derive(Debug, Clone)]
pub struct Groups {
    groups: [Group; 27],
}

impl Default for Groups {
    fn default() -> Self {
        Self::new()
    }
}

fn house_slot(house: House) -> usize {
    match house {
        House::Row { y } => usize::from(y),
        House::Column { x } => 9 + usize::from(x),
        House::Box { index } => 18 + usize::from(index),
    }
}

impl Groups {
    /// Builds the 27 groups and registers every box/line segment on both of
    /// its sides.
    #[must_use]
    pub fn new() -> Self {
        let mut groups: [Group; 27] = std::array::from_fn(|i| Group {
            house: House::ALL[i],
            neighbors: Vec::new(),
        });

        let mut register = |a: House, b: House, cells: [Position; 3]| {
            groups[house_slot(a)].neighbors.push(Neighbor { cells, house: b });
            groups[house_slot(b)].neighbors.push(Neighbor { cells, house: a });
        };

        for index in 0..9 {
            let box_ = House::Box { index };
            let origin = Position::box_origin(index);
            for k in 0..3 {
                let y = origin.y() + k;
                let row_cells = [
                    Position::new(origin.x(), y),
                    Position::new(origin.x() + 1, y),
                    Position::new(origin.x() + 2, y),
                ];
                register(box_, House::Row { y }, row_cells);

                let x = origin.x() + k;
                let column_cells = [
                    Position::new(x, origin.y()),
                    Position::new(x, origin.y() + 1),
                    Position::new(x, origin.y() + 2),
                ];
                register(box_, House::Column { x }, column_cells);
            }
        }
        Self { groups }
    }

    /// Returns the group for a house.
    #[must_use]
    pub fn group(&self, house: House) -> &Group {
        &self.groups[house_slot(house)]
    }

    /// Returns the group for a row.
    #[must_use]
    pub fn row(&self, y: u8) -> &Group {
        self.group(House::Row { y })
    }

    /// Returns the group for a column.
    #[must_use]
    pub fn column(&self, x: u8) -> &Group {
        self.group(House::Column { x })
    }

    /// Returns the group for a box.
    #[must_use]
    pub fn box_group(&self, index: u8) -> &Group {
        self.group(House::Box { index })
    }

    /// Returns the three groups covering a position.
    #[must_use]
    pub fn of(&self, pos: Position) -> [&Group; 3] {
        House::of(pos).map(|house| self.group(house))
    }
}

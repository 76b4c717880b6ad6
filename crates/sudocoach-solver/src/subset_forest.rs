//! The subset-consolidation forest behind naked and hidden elimination.
//!
//! Both subset rules reduce to the same shape: a family of "subset of
//! identifiers → associated payload" pairs, where a pair *fires* once its
//! identifier set and payload set reach the same size. For the naked rule
//! the identifiers are candidate values and the payload is the cells
//! carrying them; for the hidden rule the roles are swapped. One generic
//! forest serves both, so neither rule re-derives the consolidation logic
//! per subset size.
//!
//! Consolidation works by subset inclusion: entries are inserted in
//! ascending size order, and each new node attaches beneath every deepest
//! existing node whose identifier set it contains, absorbing that node's
//! payload. A confirmed pair is thereby folded into every larger candidate
//! subset that contains it, so the larger subset cannot fire spuriously at
//! size N+1 with the pair's members counted twice.

use sudocoach_core::set9::BitSet9;
use tinyvec::ArrayVec;

struct Node<IdS, DataS> {
    id: BitSet9<IdS>,
    data: BitSet9<DataS>,
    children: ArrayVec<[u16; 8]>,
}

/// A forest of id-subset → data-subset nodes, merged by subset inclusion.
///
/// `IdS` and `DataS` are the two [`Index9Semantics`] instantiations of the
/// node sets; the naked and hidden passes use them with swapped roles.
///
/// Callers must insert nodes in ascending `(len, contents)` order of the
/// id-subset — the [`Ord`] on [`BitSet9`] provides the deterministic
/// contents tie-break — so that smaller subsets are in place before any
/// superset arrives.
///
/// [`Index9Semantics`]: sudocoach_core::set9::Index9Semantics
///
/// # Examples
///
/// ```
/// use sudocoach_core::{Digit, DigitSet, HouseMask};
/// use sudocoach_core::{digit_set::DigitSemantics, house::CellIndexSemantics};
/// use sudocoach_solver::SubsetForest;
///
/// // Two cells holding exactly {1, 2}: a naked pair.
/// let mut forest = SubsetForest::<DigitSemantics, CellIndexSemantics>::new();
/// forest.insert(
///     DigitSet::from_iter([Digit::D1, Digit::D2]),
///     HouseMask::from_iter([0, 4]),
/// );
///
/// let mut fired = Vec::new();
/// forest.visit_exact(|id, data| fired.push((id, data)));
/// assert_eq!(fired.len(), 1);
/// ```
pub struct SubsetForest<IdS, DataS> {
    nodes: Vec<Node<IdS, DataS>>,
    roots: Vec<u16>,
}

impl<IdS, DataS> Default for SubsetForest<IdS, DataS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<IdS, DataS> SubsetForest<IdS, DataS> {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Inserts an id-subset with its associated data-subset.
    ///
    /// The node is attached beneath every deepest existing node whose
    /// id-subset is contained in the new id-subset, absorbing each such
    /// ancestor's data-subset (data-subsets only grow as you descend). A
    /// node contained in no existing id-subset becomes a new root.
    ///
    /// # Panics
    ///
    /// Panics if more than `u16::MAX` nodes are inserted. Forests built per
    /// house hold at most nine nodes.
    pub fn insert(&mut self, id: BitSet9<IdS>, data: BitSet9<DataS>) {
        let ix = u16::try_from(self.nodes.len()).expect("forest node count overflow");
        self.nodes.push(Node {
            id,
            data,
            children: ArrayVec::new(),
        });
        let mut found = false;
        for i in 0..self.roots.len() {
            found |= self.attach(self.roots[i], ix);
        }
        if !found {
            self.roots.push(ix);
        }
    }

    /// Attaches `ix` at the deepest matching point of `parent`'s subtree.
    ///
    /// Returns `true` if `parent`'s id-subset is contained in `ix`'s, i.e.
    /// the node belongs somewhere in this subtree. A node reached through a
    /// second root may encounter itself; "already here" counts as found and
    /// is never self-attached.
    fn attach(&mut self, parent: u16, ix: u16) -> bool {
        if parent == ix {
            return true;
        }
        if !self.nodes[parent as usize]
            .id
            .is_subset(self.nodes[ix as usize].id)
        {
            return false;
        }
        let children = self.nodes[parent as usize].children.clone();
        let mut found = false;
        for child in children {
            found |= self.attach(child, ix);
        }
        if !found {
            let inherited = self.nodes[parent as usize].data;
            self.nodes[ix as usize].data |= inherited;
            self.nodes[parent as usize].children.push(ix);
        }
        true
    }

    /// Visits every satisfied node: the shallowest nodes on each path where
    /// the id-subset and data-subset have equal size.
    ///
    /// Descendants of a satisfied node are already implied by it and are not
    /// visited. A node shared between subtrees may be visited once per
    /// subtree; the eliminations derived from a visit are idempotent.
    pub fn visit_exact(&self, mut f: impl FnMut(BitSet9<IdS>, BitSet9<DataS>)) {
        for &root in &self.roots {
            self.visit_node(root, &mut f);
        }
    }

    fn visit_node(&self, ix: u16, f: &mut impl FnMut(BitSet9<IdS>, BitSet9<DataS>)) {
        let node = &self.nodes[ix as usize];
        if node.id.len() == node.data.len() {
            f(node.id, node.data);
            return;
        }
        for &child in node.children.iter() {
            self.visit_node(child, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use sudocoach_core::{
        Digit::*, DigitSet, HouseMask, digit_set::DigitSemantics, house::CellIndexSemantics,
    };

    use super::*;

    type NakedForest = SubsetForest<DigitSemantics, CellIndexSemantics>;

    fn digits(digits: impl IntoIterator<Item = sudocoach_core::Digit>) -> DigitSet {
        DigitSet::from_iter(digits)
    }

    fn cells(cells: impl IntoIterator<Item = u8>) -> HouseMask {
        HouseMask::from_iter(cells)
    }

    fn fired(forest: &NakedForest) -> Vec<(DigitSet, HouseMask)> {
        let mut out = Vec::new();
        forest.visit_exact(|id, data| out.push((id, data)));
        out
    }

    #[test]
    fn test_exact_pair_fires() {
        let mut forest = NakedForest::new();
        forest.insert(digits([D1, D2]), cells([0, 4]));

        assert_eq!(fired(&forest), vec![(digits([D1, D2]), cells([0, 4]))]);
    }

    #[test]
    fn test_unsatisfied_node_does_not_fire() {
        let mut forest = NakedForest::new();
        forest.insert(digits([D1, D2, D3]), cells([0, 4]));

        assert_eq!(fired(&forest), vec![]);
    }

    #[test]
    fn test_superset_absorbs_ancestor_data() {
        // A pair confined to one cell each way cannot fire, but a triple
        // that contains it inherits its cell and completes.
        let mut forest = NakedForest::new();
        forest.insert(digits([D1, D2]), cells([0]));
        forest.insert(digits([D1, D2, D3]), cells([3, 5]));

        assert_eq!(
            fired(&forest),
            vec![(digits([D1, D2, D3]), cells([0, 3, 5]))]
        );
    }

    #[test]
    fn test_satisfied_node_masks_descendants() {
        // The pair fires; the quad beneath it must not be visited even
        // though it also ends up satisfied by absorption.
        let mut forest = NakedForest::new();
        forest.insert(digits([D1, D2]), cells([0, 1]));
        forest.insert(digits([D1, D2, D3, D4]), cells([2, 3]));

        assert_eq!(fired(&forest), vec![(digits([D1, D2]), cells([0, 1]))]);
    }

    #[test]
    fn test_node_shared_between_roots_absorbs_both() {
        // {7,8} and {7,9} are incomparable roots; {7,8,9} descends from
        // both and must absorb both cell sets.
        let mut forest = NakedForest::new();
        forest.insert(digits([D7, D8]), cells([2]));
        forest.insert(digits([D7, D9]), cells([6]));
        forest.insert(digits([D7, D8, D9]), cells([0]));

        assert_eq!(
            fired(&forest),
            vec![
                (digits([D7, D8, D9]), cells([0, 2, 6])),
                (digits([D7, D8, D9]), cells([0, 2, 6])),
            ]
        );
    }

    #[test]
    fn test_deep_shared_structure_terminates() {
        // A large superset reachable through several roots; the insertion
        // walk re-encounters it through the shared {7,8,9} node and must
        // neither loop nor double-attach.
        let mut forest = NakedForest::new();
        forest.insert(digits([D7, D8]), cells([2]));
        forest.insert(digits([D7, D9]), cells([6]));
        forest.insert(digits([D3, D5, D9]), cells([3]));
        forest.insert(digits([D7, D8, D9]), cells([0]));
        forest.insert(digits([D5, D6, D8, D9]), cells([5]));
        forest.insert(digits([D3, D5, D6, D7, D8, D9]), cells([8]));

        let all = fired(&forest);
        // The triple {7,8,9} over cells {0,2,6} fires (visited through both
        // of its parents); nothing else reaches exact size.
        assert!(!all.is_empty());
        for (id, data) in &all {
            assert!(
                *id == digits([D7, D8, D9]) && *data == cells([0, 2, 6])
                    || id.len() == 6 && data.len() == 6
            );
        }
    }
}

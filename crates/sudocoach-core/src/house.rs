//! Houses: rows, columns, and 3×3 boxes.

use std::fmt::{self, Display};

use crate::{
    position::Position,
    set9::{BitSet9, Index9, Index9Semantics},
};

/// A sudoku house (row, column, or 3×3 box) — one of the 27 units that must
/// contain each digit exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its y coordinate (0-8).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its x coordinate (0-8).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl House {
    /// Array containing all rows (0-8).
    pub const ROWS: [Self; 9] = {
        let mut rows = [Self::Row { y: 0 }; 9];
        let mut i = 0;
        while i < 9 {
            rows[i as usize] = Self::Row { y: i };
            i += 1;
        }
        rows
    };

    /// Array containing all columns (0-8).
    pub const COLUMNS: [Self; 9] = {
        let mut columns = [Self::Column { x: 0 }; 9];
        let mut i = 0;
        while i < 9 {
            columns[i as usize] = Self::Column { x: i };
            i += 1;
        }
        columns
    };

    /// Array containing all boxes (0-8).
    pub const BOXES: [Self; 9] = {
        let mut boxes = [Self::Box { index: 0 }; 9];
        let mut i = 0;
        while i < 9 {
            boxes[i as usize] = Self::Box { index: i };
            i += 1;
        }
        boxes
    };

    /// Array containing all houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        while i < 9 {
            all[i as usize] = Self::ROWS[i as usize];
            all[i as usize + 9] = Self::COLUMNS[i as usize];
            all[i as usize + 18] = Self::BOXES[i as usize];
            i += 1;
        }
        all
    };

    /// Returns the three houses containing a position: its row, column, and
    /// box.
    #[must_use]
    pub const fn of(pos: Position) -> [Self; 3] {
        [
            Self::Row { y: pos.y() },
            Self::Column { x: pos.x() },
            Self::Box {
                index: pos.box_index(),
            },
        ]
    }

    /// Returns all nine positions of this house, in cell-index order.
    #[must_use]
    pub fn positions(self) -> [Position; 9] {
        match self {
            Self::Row { y } => Position::ROWS[usize::from(y)],
            Self::Column { x } => Position::COLUMNS[usize::from(x)],
            Self::Box { index } => Position::BOXES[usize::from(index)],
        }
    }

    /// Converts a cell index within the house (0-8) into an absolute
    /// [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    pub fn position_from_cell_index(self, i: u8) -> Position {
        assert!(i < 9);
        match self {
            Self::Row { y } => Position::new(i, y),
            Self::Column { x } => Position::new(x, i),
            Self::Box { index } => Position::from_box(index, i),
        }
    }

    /// Returns the cell index (0-8) of a position within this house, or
    /// `None` if the position is not a member.
    #[must_use]
    pub fn cell_index_of(self, pos: Position) -> Option<u8> {
        match self {
            Self::Row { y } => (pos.y() == y).then_some(pos.x()),
            Self::Column { x } => (pos.x() == x).then_some(pos.y()),
            Self::Box { index } => {
                (pos.box_index() == index).then(|| pos.y() % 3 * 3 + pos.x() % 3)
            }
        }
    }

    /// Returns `true` if the position is a member of this house.
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        self.cell_index_of(pos).is_some()
    }
}

impl Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row { y } => write!(f, "row {y}"),
            Self::Column { x } => write!(f, "column {x}"),
            Self::Box { index } => write!(f, "box {index}"),
        }
    }
}

/// Semantics for cell indices (0-8) within a house.
#[derive(Debug)]
pub struct CellIndexSemantics;

impl Index9Semantics for CellIndexSemantics {
    type Value = u8;

    fn to_index(value: u8) -> Index9 {
        Index9::new(value)
    }

    fn from_index(index: Index9) -> u8 {
        index.index()
    }
}

/// A set of cell indices (0-8) within a single house.
///
/// Used by the solver to name subsets of a house's cells without copying
/// their positions around.
pub type HouseMask = BitSet9<CellIndexSemantics>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_houses_count() {
        assert_eq!(House::ALL.len(), 27);
        assert_eq!(House::ALL[0], House::Row { y: 0 });
        assert_eq!(House::ALL[9], House::Column { x: 0 });
        assert_eq!(House::ALL[26], House::Box { index: 8 });
    }

    #[test]
    fn test_positions_membership() {
        for house in House::ALL {
            let positions = house.positions();
            assert_eq!(positions.len(), 9);
            for (i, pos) in (0..).zip(positions) {
                assert_eq!(house.position_from_cell_index(i), pos);
                assert_eq!(house.cell_index_of(pos), Some(i));
                assert!(house.contains(pos));
            }
        }
    }

    #[test]
    fn test_cell_index_of_non_member() {
        assert_eq!(House::Row { y: 0 }.cell_index_of(Position::new(0, 1)), None);
        assert_eq!(
            House::Box { index: 0 }.cell_index_of(Position::new(3, 0)),
            None
        );
    }

    #[test]
    fn test_of_covers_position() {
        let pos = Position::new(5, 7);
        let [row, column, box_] = House::of(pos);
        assert_eq!(row, House::Row { y: 7 });
        assert_eq!(column, House::Column { x: 5 });
        assert_eq!(box_, House::Box { index: 7 });
    }

    #[test]
    fn test_house_mask() {
        let mask = HouseMask::from_iter([0, 4, 8]);
        assert_eq!(mask.len(), 3);
        assert!(mask.contains(4));
        assert!(!mask.contains(1));
    }
}

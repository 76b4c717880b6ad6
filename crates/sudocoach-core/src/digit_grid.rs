//! The puzzle input/output format: a 9×9 grid of optional digits.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};

use crate::{digit::Digit, position::Position};

/// Error produced when rejecting malformed puzzle input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParseGridError {
    /// The input does not contain exactly 81 cells.
    #[display("expected 81 cells, found {len}")]
    BadLength {
        /// Number of cells found.
        len: usize,
    },
    /// The input contains a character that is not a digit or a blank marker.
    #[display("unexpected character {ch:?} at cell {index}")]
    BadCharacter {
        /// Row-major index of the offending cell.
        index: usize,
        /// The offending character.
        ch: char,
    },
    /// A cell value is outside the range 0-9.
    #[display("value {value} at {pos} is outside the range 0-9")]
    BadDigit {
        /// Position of the offending cell.
        pos: Position,
        /// The offending value.
        value: u8,
    },
}

/// A 9×9 grid of settled digits, with blanks for unsolved cells.
///
/// This is the interchange format between puzzle sources and the solver:
/// it carries no candidate information, only given or solved digits.
///
/// # Examples
///
/// ```
/// use sudocoach_core::{Digit, DigitGrid, Position};
///
/// let grid: DigitGrid = "
///     53. .7. ...
///     6.. 195 ...
///     .98 ... .6.
///     8.. .6. ..3
///     4.. 8.3 ..1
///     7.. .2. ..6
///     .6. ... 28.
///     ... 419 ..5
///     ... .8. .79
/// "
/// .parse()?;
///
/// assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
/// assert_eq!(grid.get(Position::new(2, 0)), None);
/// # Ok::<(), sudocoach_core::digit_grid::ParseGridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitGrid {
    cells: [Option<Digit>; 81],
}

impl Default for DigitGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self { cells: [None; 81] }
    }

    /// Builds a grid from 9 rows of 9 values, with 0 meaning blank.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError::BadDigit`] if any value is greater than 9.
    pub fn from_rows(rows: &[[u8; 9]; 9]) -> Result<Self, ParseGridError> {
        let mut grid = Self::new();
        for (y, row) in (0..).zip(rows) {
            for (x, &value) in (0..).zip(row) {
                let pos = Position::new(x, y);
                match value {
                    0 => {}
                    1..=9 => grid.set(pos, Some(Digit::from_value(value))),
                    _ => return Err(ParseGridError::BadDigit { pos, value }),
                }
            }
        }
        Ok(grid)
    }

    /// Returns the digit at a position, or `None` if the cell is blank.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Sets or clears the digit at a position.
    pub fn set(&mut self, pos: Position, digit: Option<Digit>) {
        self.cells[pos.index()] = digit;
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns an iterator over the filled cells.
    pub fn filled_cells(&self) -> impl Iterator<Item = (Position, Digit)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|digit| (position_from_index(i), digit)))
    }
}

#[expect(clippy::cast_possible_truncation)]
fn position_from_index(i: usize) -> Position {
    Position::new((i % 9) as u8, (i / 9) as u8)
}

impl FromStr for DigitGrid {
    type Err = ParseGridError;

    /// Parses an 81-cell grid string.
    ///
    /// Digits 1-9 are filled cells; `.`, `_`, or `0` are blanks. Whitespace
    /// is ignored, so grids may be laid out one row per line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut count = 0;
        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            let digit = match ch {
                '.' | '_' | '0' => None,
                '1'..='9' => Some(Digit::from_value(ch as u8 - b'0')),
                _ => return Err(ParseGridError::BadCharacter { index: count, ch }),
            };
            if count < 81 {
                grid.cells[count] = digit;
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseGridError::BadLength { len: count });
        }
        Ok(grid)
    }
}

impl fmt::Display for DigitGrid {
    /// Formats the grid as 81 characters in row-major order, `.` for blanks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        let text =
            "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let grid: DigitGrid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
        assert_eq!(grid.filled_count(), 30);
        assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(grid.get(Position::new(4, 0)), Some(Digit::D7));
        assert_eq!(grid.get(Position::new(8, 8)), Some(Digit::D9));
    }

    #[test]
    fn test_parse_accepts_blank_markers_and_whitespace() {
        let grid: DigitGrid = "
            1__ 000 ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ...
            ... ... ..2
        "
        .parse()
        .unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D1));
        assert_eq!(grid.get(Position::new(8, 8)), Some(Digit::D2));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert_eq!(
            "123".parse::<DigitGrid>(),
            Err(ParseGridError::BadLength { len: 3 })
        );
        let long = "1".repeat(82);
        assert_eq!(
            long.parse::<DigitGrid>(),
            Err(ParseGridError::BadLength { len: 82 })
        );
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let text = "x".repeat(81);
        assert_eq!(
            text.parse::<DigitGrid>(),
            Err(ParseGridError::BadCharacter { index: 0, ch: 'x' })
        );
    }

    #[test]
    fn test_from_rows() {
        let mut rows = [[0_u8; 9]; 9];
        rows[2][7] = 8;
        let grid = DigitGrid::from_rows(&rows).unwrap();
        assert_eq!(grid.get(Position::new(7, 2)), Some(Digit::D8));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_from_rows_rejects_out_of_range() {
        let mut rows = [[0_u8; 9]; 9];
        rows[0][0] = 10;
        assert_eq!(
            DigitGrid::from_rows(&rows),
            Err(ParseGridError::BadDigit {
                pos: Position::new(0, 0),
                value: 10
            })
        );
    }

    #[test]
    fn test_filled_cells_iteration() {
        let mut grid = DigitGrid::new();
        grid.set(Position::new(3, 1), Some(Digit::D4));
        grid.set(Position::new(0, 0), Some(Digit::D9));
        let filled: Vec<_> = grid.filled_cells().collect();
        assert_eq!(
            filled,
            vec![
                (Position::new(0, 0), Digit::D9),
                (Position::new(3, 1), Digit::D4),
            ]
        );
    }
}

//! The puzzle input seam.
//!
//! Where a puzzle comes from — a file, a request body, a test literal — is
//! none of the solver's business; it only needs a 9×9 grid of given digits.
//! [`PuzzleSource`] is that seam, with implementations for the common input
//! shapes.

use sudocoach_core::DigitGrid;

use crate::SolverError;

/// Supplies the initial puzzle grid.
///
/// Malformed input (wrong shape, out-of-range digits) is rejected here,
/// before any propagation begins.
pub trait PuzzleSource {
    /// Produces the initial grid of given digits.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Malformed`] for inputs that do not describe a
    /// 9×9 grid of digits 0-9 (0 meaning blank).
    fn initial_grid(&mut self) -> Result<DigitGrid, SolverError>;
}

impl PuzzleSource for DigitGrid {
    fn initial_grid(&mut self) -> Result<DigitGrid, SolverError> {
        Ok(self.clone())
    }
}

/// An 81-cell grid string; see [`DigitGrid`]'s `FromStr` for the format.
impl PuzzleSource for &str {
    fn initial_grid(&mut self) -> Result<DigitGrid, SolverError> {
        Ok(self.parse::<DigitGrid>()?)
    }
}

/// Nine rows of nine values in 0-9, with 0 meaning blank.
impl PuzzleSource for [[u8; 9]; 9] {
    fn initial_grid(&mut self) -> Result<DigitGrid, SolverError> {
        Ok(DigitGrid::from_rows(self)?)
    }
}

#[cfg(test)]
mod tests {
    use sudocoach_core::{Digit, Position, digit_grid::ParseGridError};

    use super::*;

    #[test]
    fn test_str_source() {
        let text = format!("..3{}", ".".repeat(78));
        let mut source = text.as_str();
        let grid = source.initial_grid().unwrap();
        assert_eq!(grid.get(Position::new(2, 0)), Some(Digit::D3));
    }

    #[test]
    fn test_str_source_rejects_malformed() {
        let mut source = "123";
        assert_eq!(
            source.initial_grid(),
            Err(SolverError::Malformed(ParseGridError::BadLength { len: 3 }))
        );
    }

    #[test]
    fn test_rows_source_rejects_out_of_range() {
        let mut rows = [[0_u8; 9]; 9];
        rows[4][4] = 12;
        assert!(matches!(
            rows.initial_grid(),
            Err(SolverError::Malformed(ParseGridError::BadDigit { .. }))
        ));
    }
}

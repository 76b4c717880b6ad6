//! Candidate digits (1-9) for a single cell.

use crate::{
    digit::Digit,
    set9::{BitSet9, Index9, Index9Semantics},
};

/// Semantics mapping digits 1-9 to bit indices 0-8.
#[derive(Debug)]
pub struct DigitSemantics;

impl Index9Semantics for DigitSemantics {
    type Value = Digit;

    fn to_index(value: Digit) -> Index9 {
        Index9::new(value.value() - 1)
    }

    fn from_index(index: Index9) -> Digit {
        Digit::from_value(index.index() + 1)
    }
}

/// A set of candidate digits (1-9) for a single cell.
///
/// The central working type of the deduction engine: every unsettled cell
/// carries one of these, and every elimination pass shrinks them.
///
/// # Examples
///
/// ```
/// use sudocoach_core::{Digit, DigitSet};
///
/// let mut candidates = DigitSet::FULL;
/// candidates.remove(Digit::D5);
/// candidates.remove(Digit::D7);
///
/// assert_eq!(candidates.len(), 7);
/// assert!(!candidates.contains(Digit::D5));
/// assert!(candidates.contains(Digit::D1));
/// ```
pub type DigitSet = BitSet9<DigitSemantics>;

//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [CandidateSet] used for
//! storing the candidate digits of unsolved cells.

use crate::SIZE;
use crate::error::{SudokuError, SudokuResult};

const FULL_MASK: u16 = ((1u16 << SIZE) - 1) << 1;

/// A set of digits in the range 1 to 9 that is implemented as a bit mask.
/// Each digit is represented by one bit in a `u16`, so the set is `Copy` and
/// all operations are cheap. It is used to track the candidate values of
/// unsolved cells, but can also be constructed directly, most conveniently
/// with the [candidates](crate::candidates) macro.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CandidateSet {
    mask: u16
}

/// An iterator over the digits contained in a [CandidateSet] in ascending
/// order.
pub struct CandidateSetIter {
    mask: u16
}

impl Iterator for CandidateSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.mask == 0 {
            None
        }
        else {
            let digit = self.mask.trailing_zeros() as usize;
            self.mask &= self.mask - 1;
            Some(digit)
        }
    }
}

impl CandidateSet {

    /// Creates a new, empty `CandidateSet`.
    pub fn empty() -> CandidateSet {
        CandidateSet {
            mask: 0
        }
    }

    /// Creates a new `CandidateSet` that contains every digit from 1 to 9.
    pub fn full() -> CandidateSet {
        CandidateSet {
            mask: FULL_MASK
        }
    }

    fn compute_mask(digit: usize) -> SudokuResult<u16> {
        if digit < 1 || digit > SIZE {
            Err(SudokuError::InvalidNumber)
        }
        else {
            Ok(1u16 << digit)
        }
    }

    /// Indicates whether this set contains the given digit, in which case
    /// this method returns `true`. If it is not contained or outside the
    /// range 1 to 9, `false` will be returned.
    pub fn contains(&self, digit: usize) -> bool {
        if let Ok(mask) = CandidateSet::compute_mask(digit) {
            self.mask & mask > 0
        }
        else {
            false
        }
    }

    /// Inserts the given digit into this set, such that
    /// [CandidateSet::contains] returns `true` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// not present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `digit` is less than 1 or greater than 9. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn insert(&mut self, digit: usize) -> SudokuResult<bool> {
        let mask = CandidateSet::compute_mask(digit)?;

        if self.mask & mask == 0 {
            self.mask |= mask;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Removes the given digit from this set, such that
    /// [CandidateSet::contains] returns `false` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `digit` is less than 1 or greater than 9. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn remove(&mut self, digit: usize) -> SudokuResult<bool> {
        let mask = CandidateSet::compute_mask(digit)?;

        if self.mask & mask > 0 {
            self.mask &= !mask;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Removes all digits from this set, such that [CandidateSet::contains]
    /// will return `false` for all inputs and [CandidateSet::is_empty] will
    /// return `true`.
    pub fn clear(&mut self) {
        self.mask = 0;
    }

    /// Returns an iterator over the digits contained in this set in
    /// ascending order.
    pub fn iter(&self) -> CandidateSetIter {
        CandidateSetIter {
            mask: self.mask
        }
    }

    /// Indicates whether this set is empty, i.e. contains no digits. If this
    /// method returns `true`, [CandidateSet::contains] will return `false`
    /// for all inputs.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Returns the number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Returns the smallest digit contained in this set, or `None` if it is
    /// empty.
    pub fn min(&self) -> Option<usize> {
        if self.mask == 0 {
            None
        }
        else {
            Some(self.mask.trailing_zeros() as usize)
        }
    }
}

impl IntoIterator for CandidateSet {
    type Item = usize;
    type IntoIter = CandidateSetIter;

    fn into_iter(self) -> CandidateSetIter {
        self.iter()
    }
}

impl IntoIterator for &CandidateSet {
    type Item = usize;
    type IntoIter = CandidateSetIter;

    fn into_iter(self) -> CandidateSetIter {
        self.iter()
    }
}

/// Creates a new [CandidateSet](crate::util::CandidateSet) that contains the
/// specified digits, provided as a comma-separated list. For empty sets,
/// [CandidateSet::empty](crate::util::CandidateSet::empty) can be used.
///
/// An example usage of this macro looks as follows:
///
/// ```
/// use sudoku_deduction::candidates;
/// use sudoku_deduction::util::CandidateSet;
///
/// let set = candidates!(2, 4);
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// assert_eq!(2, set.len());
/// ```
#[macro_export]
macro_rules! candidates {
    ($set:expr; $e:expr) => {
        ($set).insert($e).unwrap()
    };

    ($set:expr; $e:expr, $($es:expr),+) => {
        candidates!($set; $e);
        candidates!($set; $($es),+)
    };

    ($($es:expr),+) => {
        {
            let mut set = CandidateSet::empty();
            candidates!(set; $($es),+);
            set
        }
    };
}

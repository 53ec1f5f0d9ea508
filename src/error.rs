//! This module contains some error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html) and on the solver. This does not exclude
/// errors that occur when parsing grids, see
/// [SudokuParseError](enum.SudokuParseError.html) for that.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the raw input grid does not consist of exactly 9 rows.
    WrongNumberOfRows,

    /// Indicates that some row of the raw input grid does not consist of
    /// exactly 9 cells.
    WrongNumberOfColumns,

    /// Indicates that some number is invalid for a 9 by 9 grid. This is the
    /// case if it is less than 1 or greater than 9 in contexts that require a
    /// digit, or greater than 9 in contexts where 0 denotes a blank cell.
    InvalidNumber,

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the grid. This is the case if either of them is greater than or equal
    /// to 9.
    OutOfBounds,

    /// An error that is raised whenever the solver proves that the given
    /// puzzle has no solution. No partially solved grid is available in this
    /// case.
    UnsolvablePuzzle
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::WrongNumberOfRows =>
                write!(f, "wrong number of rows"),
            SudokuError::WrongNumberOfColumns =>
                write!(f, "wrong number of columns"),
            SudokuError::InvalidNumber =>
                write!(f, "invalid number"),
            SudokuError::OutOfBounds =>
                write!(f, "coordinates out of bounds"),
            SudokuError::UnsolvablePuzzle =>
                write!(f, "puzzle has no solution"),
        }
    }
}

impl std::error::Error for SudokuError { }

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a `Grid`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SudokuParseError {

    /// Indicates that the number of cells (which are separated by commas)
    /// does not equal 81.
    WrongNumberOfCells,

    /// Indicates that one of the cell entries could not be parsed as a
    /// number.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid number (more than 9;
    /// 0 and the empty entry both denote a blank cell).
    InvalidNumber
}

impl Display for SudokuParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuParseError::WrongNumberOfCells =>
                write!(f, "wrong number of cells"),
            SudokuParseError::NumberFormatError =>
                write!(f, "number format error"),
            SudokuParseError::InvalidNumber =>
                write!(f, "invalid number"),
        }
    }
}

impl std::error::Error for SudokuParseError { }

impl From<ParseIntError> for SudokuParseError {
    fn from(_: ParseIntError) -> Self {
        SudokuParseError::NumberFormatError
    }
}

/// Syntactic sugar for `Result<V, SudokuParseError>`.
pub type SudokuParseResult<V> = Result<V, SudokuParseError>;

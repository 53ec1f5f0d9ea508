// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(missing_crate_level_docs)]
#![warn(invalid_codeblock_attributes)]

//! This crate implements an easy-to-follow, deterministic Sudoku solving
//! engine based on constraint propagation. It supports the following key
//! features:
//!
//! * Parsing and printing Sudoku grids
//! * Solving Sudoku with human-style deductions (naked and hidden singles),
//! backed by exhaustive backtracking over guesses where deduction alone does
//! not suffice
//! * Observing the solve one cell at a time, including which rule derived
//! each digit and which guesses turned out to be wrong
//!
//! # Parsing and printing Sudoku
//!
//! See [Grid::parse] for the exact format of a Sudoku code.
//!
//! Codes can be used to exchange Sudoku, while pretty prints can be used to
//! display a Sudoku in a clearer manner. An example of how to parse and
//! display a Sudoku grid is provided below.
//!
//! ```
//! use sudoku_deduction::Grid;
//!
//! let grid = Grid::parse("\
//!     1, , , , , , , , ,\
//!      ,2, , , , , , , ,\
//!      , ,3, , , , , , ,\
//!      , , ,4, , , , , ,\
//!      , , , ,5, , , , ,\
//!      , , , , ,6, , , ,\
//!      , , , , , ,7, , ,\
//!      , , , , , , ,8, ,\
//!      , , , , , , , ,9").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Solving Sudoku
//!
//! [solver::solve] takes a puzzle and returns the completed grid, or an
//! error if the puzzle cannot be solved at all.
//!
//! ```
//! use sudoku_deduction::Grid;
//! use sudoku_deduction::solver;
//!
//! let puzzle = Grid::parse("\
//!      , , , ,8,1, , , ,\
//!      , ,2, , ,7,8, , ,\
//!      ,5,3, , , ,1,7, ,\
//!     3,7, , , , , , , ,\
//!     6, , , , , , , ,3,\
//!      , , , , , , ,2,4,\
//!      ,6,9, , , ,2,3, ,\
//!      , ,5,9, , ,4, , ,\
//!      , , ,6,5, , , , ").unwrap();
//! let solution = solver::solve(&puzzle).unwrap();
//!
//! assert!(solution.is_full());
//! ```
//!
//! # Observing individual steps
//!
//! For applications that want to display or analyze the solution process,
//! the [SolverEngine](solver::SolverEngine) advances a
//! [Board](board::Board) one cell per call and reports what it did.
//!
//! ```
//! use sudoku_deduction::Grid;
//! use sudoku_deduction::board::Board;
//! use sudoku_deduction::solver::{SolverEngine, StepResult};
//!
//! let puzzle = Grid::parse("\
//!      , , , ,8,1, , , ,\
//!      , ,2, , ,7,8, , ,\
//!      ,5,3, , , ,1,7, ,\
//!     3,7, , , , , , , ,\
//!     6, , , , , , , ,3,\
//!      , , , , , , ,2,4,\
//!      ,6,9, , , ,2,3, ,\
//!      , ,5,9, , ,4, , ,\
//!      , , ,6,5, , , , ").unwrap();
//! let mut board = Board::new(&puzzle);
//!
//! loop {
//!     match SolverEngine.solve_next_cell(&mut board).unwrap() {
//!         StepResult::Assigned { column, row, value, .. } =>
//!             println!("{} goes into column {}, row {}.",
//!                 value, column, row),
//!         StepResult::Backtracked { column, row, value } =>
//!             println!("{} was wrong in column {}, row {}.",
//!                 value, column, row),
//!         StepResult::Solved => break
//!     }
//! }
//!
//! assert!(board.is_solved());
//! ```
//!
//! Note that digits assigned while a guess is open (see
//! [Board::has_open_guess](board::Board::has_open_guess)) are provisional
//! and may still be reverted by backtracking. Callers that read individual
//! values mid-solve should only trust them once that method returns `false`
//! or the board is fully solved.

pub mod board;
pub mod error;
pub mod solver;
pub mod util;

#[cfg(test)]
mod solve_tests;

use error::{SudokuError, SudokuParseError, SudokuParseResult, SudokuResult};

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// The number of columns and rows of a [Grid], which is also the highest
/// digit that can be entered.
pub const SIZE: usize = 9;

pub(crate) const BLOCK_SIZE: usize = 3;
pub(crate) const CELL_COUNT: usize = SIZE * SIZE;

/// A 9 by 9 Sudoku grid, where each cell is either empty or holds a digit
/// from 1 to 9. This type only stores the numbers; solving machinery is
/// found in the [board] and [solver] modules.
///
/// Grids can be parsed from and printed to the comma-separated code format
/// described in [Grid::parse], and pretty-printed via `Display`. With serde,
/// a grid (de)serializes as a list of 9 rows of 9 numbers each, where 0
/// stands for an empty cell, so malformed input is rejected during
/// deserialization with the same checks as [Grid::from_rows].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "Vec<Vec<usize>>")]
#[serde(try_from = "Vec<Vec<usize>>")]
pub struct Grid {
    cells: Vec<Option<usize>>
}

fn to_char(cell: Option<usize>) -> char {
    if let Some(n) = cell {
        ('0' as u8 + n as u8) as char
    }
    else {
        ' '
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char,
        newline: bool) -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &Grid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.get_cell(x, y).unwrap()), ' ', '║',
        true)
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let top_row = top_row();
        let thin_separator_line = thin_separator_line();
        let thick_separator_line = thick_separator_line();
        let bottom_row = bottom_row();

        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row.as_str())?;
            }
            else if y % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row.as_str())?;
        Ok(())
    }
}

fn to_string(cell: &Option<usize>) -> String {
    if let Some(number) = cell {
        number.to_string()
    }
    else {
        String::from("")
    }
}

pub(crate) fn index(column: usize, row: usize) -> usize {
    row * SIZE + column
}

impl Grid {

    /// Creates a new, empty 9 by 9 grid.
    pub fn new() -> Grid {
        Grid {
            cells: vec![None; CELL_COUNT]
        }
    }

    /// Creates a grid from a list of 9 rows of 9 numbers each, where 0
    /// stands for an empty cell. The rows are ordered top-to-bottom and
    /// their entries left-to-right.
    ///
    /// # Errors
    ///
    /// * `SudokuError::WrongNumberOfRows` If `rows` does not contain exactly
    /// 9 rows.
    /// * `SudokuError::WrongNumberOfColumns` If some row does not contain
    /// exactly 9 numbers.
    /// * `SudokuError::InvalidNumber` If some number is greater than 9.
    pub fn from_rows(rows: Vec<Vec<usize>>) -> SudokuResult<Grid> {
        if rows.len() != SIZE {
            return Err(SudokuError::WrongNumberOfRows);
        }

        let mut cells = Vec::with_capacity(CELL_COUNT);

        for row in rows {
            if row.len() != SIZE {
                return Err(SudokuError::WrongNumberOfColumns);
            }

            for number in row {
                if number > SIZE {
                    return Err(SudokuError::InvalidNumber);
                }

                if number == 0 {
                    cells.push(None);
                }
                else {
                    cells.push(Some(number));
                }
            }
        }

        Ok(Grid { cells })
    }

    /// Parses a code encoding a Sudoku grid. The code is a comma-separated
    /// list of 81 entries, which are either empty, a `0`, or a digit from 1
    /// to 9, where the former two stand for an empty cell. The entries are
    /// assigned left-to-right, top-to-bottom, where each row is completed
    /// before the next one is started. Whitespace in the entries is ignored
    /// to allow for more intuitive formatting.
    ///
    /// As an example, the code
    /// `1,2,3,4,5,6,7,8,9` followed by 72 empty entries will parse to the
    /// following grid:
    ///
    /// ```text
    /// ╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗
    /// ║ 1 │ 2 │ 3 ║ 4 │ 5 │ 6 ║ 7 │ 8 │ 9 ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║   │   │   ║   │   │   ║   │   │   ║
    /// ╚═══╧═══╧═══╩═══╧═══╧═══╩═══╧═══╧═══╝
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of `SudokuParseError` (see that documentation).
    pub fn parse(code: &str) -> SudokuParseResult<Grid> {
        let numbers: Vec<&str> = code.split(',').collect();

        if numbers.len() != CELL_COUNT {
            return Err(SudokuParseError::WrongNumberOfCells);
        }

        let mut grid = Grid::new();

        for (i, number_str) in numbers.iter().enumerate() {
            let number_str = number_str.trim();

            if number_str.is_empty() {
                continue;
            }

            let number = number_str.parse::<usize>()?;

            if number > SIZE {
                return Err(SudokuParseError::InvalidNumber);
            }

            if number != 0 {
                grid.cells[i] = Some(number);
            }
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [Grid::parse]. That is, a grid that is converted to a string and
    /// parsed again will not change, as is illustrated below.
    ///
    /// ```
    /// use sudoku_deduction::Grid;
    ///
    /// let mut grid = Grid::new();
    ///
    /// // Just some arbitrary changes to create some content.
    /// grid.set_cell(1, 1, 4).unwrap();
    /// grid.set_cell(1, 2, 5).unwrap();
    ///
    /// let grid_str = grid.to_parseable_string();
    /// let grid_parsed = Grid::parse(grid_str.as_str()).unwrap();
    /// assert_eq!(grid, grid_parsed);
    /// ```
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Gets the content of the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn get_cell(&self, column: usize, row: usize)
            -> SudokuResult<Option<usize>> {
        if column >= SIZE || row >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(self.cells[index(column, row)])
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// number. If the cell was not empty, the old number will be
    /// overwritten.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be
    /// in the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 9[`.
    /// * `number`: The number to assign to the specified cell. Must be in
    /// the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` If `number` is not in the specified
    /// range.
    pub fn set_cell(&mut self, column: usize, row: usize, number: usize)
            -> SudokuResult<()> {
        if column >= SIZE || row >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        if number == 0 || number > SIZE {
            return Err(SudokuError::InvalidNumber);
        }

        self.cells[index(column, row)] = Some(number);
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is,
    /// if it contains a number, that number is removed. If the cell is
    /// already empty, it will be left that way.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the cleared cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the cleared cell. Must be in the
    /// range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, column: usize, row: usize)
            -> SudokuResult<()> {
        if column >= SIZE || row >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        self.cells[index(column, row)] = None;
        Ok(())
    }

    /// Converts this grid into a list of 9 rows of 9 numbers each, where 0
    /// stands for an empty cell. This is the inverse of [Grid::from_rows].
    pub fn rows(&self) -> Vec<Vec<usize>> {
        let mut rows = Vec::with_capacity(SIZE);

        for row in 0..SIZE {
            let mut numbers = Vec::with_capacity(SIZE);

            for column in 0..SIZE {
                numbers.push(self.cells[index(column, row)].unwrap_or(0));
            }

            rows.push(numbers);
        }

        rows
    }

    /// Counts the number of clues given by this grid. This is the number of
    /// non-empty cells. While on average Sudoku with less clues are harder,
    /// this is *not* a reliable measure of difficulty.
    pub fn count_clues(&self) -> usize {
        self.cells.iter()
            .filter(|c| c.is_some())
            .count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with
    /// a number. In this case, [Grid::count_clues] returns 81.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| c == &None)
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// number. In this case, [Grid::count_clues] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c == &None)
    }

    /// Gets a reference to the vector which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &Vec<Option<usize>> {
        &self.cells
    }

    pub(crate) fn from_cells(cells: Vec<Option<usize>>) -> Grid {
        Grid { cells }
    }
}

impl From<Grid> for Vec<Vec<usize>> {
    fn from(grid: Grid) -> Vec<Vec<usize>> {
        grid.rows()
    }
}

impl TryFrom<Vec<Vec<usize>>> for Grid {
    type Error = SudokuError;

    fn try_from(rows: Vec<Vec<usize>>) -> Result<Grid, SudokuError> {
        Grid::from_rows(rows)
    }
}

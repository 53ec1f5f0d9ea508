//! This module contains the in-solve representation of a puzzle. A [Board]
//! holds an arena of 81 [Cell]s together with the 27 groupings (rows,
//! columns and boxes, stored as index lists into the arena), the set of
//! unsolved cells in insertion order and the undo log that makes guesses
//! reversible. Boards are constructed from a [Grid](crate::Grid) and mutated
//! exclusively by the [solver](crate::solver) module.

use crate::{BLOCK_SIZE, CELL_COUNT, Grid, SIZE, index};
use crate::error::{SudokuError, SudokuResult};
use crate::util::CandidateSet;

/// The result of removing a candidate digit from a [Cell]. Emptying the
/// candidate set of an unsolved cell is a contradiction in the surrounding
/// assignment and is reported as the distinguished [Removal::Emptied] value
/// rather than being resolved by the cell itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Removal {

    /// The digit was not a candidate, so the cell is unchanged.
    NotPresent,

    /// The digit was removed and the cell still has at least one candidate
    /// left (or is solved).
    Removed,

    /// The digit was removed and the unsolved cell now has no candidates
    /// left. The caller must treat this as a contradiction signal.
    Emptied
}

/// A single cell of a [Board]. A cell is always in exactly one of two
/// states: solved, with a solution digit and an empty candidate set, or
/// unsolved, with no solution and a non-empty set of candidate digits. An
/// unsolved cell whose candidate set becomes empty signals a contradiction
/// and is never a valid resting state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    column: usize,
    row: usize,
    solution: Option<usize>,
    candidates: CandidateSet,
    guessed: bool
}

impl Cell {

    fn new(column: usize, row: usize, solution: Option<usize>) -> Cell {
        let candidates = if solution.is_some() {
            CandidateSet::empty()
        }
        else {
            CandidateSet::full()
        };

        Cell {
            column,
            row,
            solution,
            candidates,
            guessed: false
        }
    }

    /// Gets the column (x-coordinate) of this cell.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Gets the row (y-coordinate) of this cell.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Gets the digit this cell is solved with, or `None` if it is still
    /// unsolved.
    pub fn solution(&self) -> Option<usize> {
        self.solution
    }

    /// Gets the set of digits that are still possible for this cell. For
    /// solved cells, this set is empty.
    pub fn candidates(&self) -> CandidateSet {
        self.candidates
    }

    /// Indicates whether this cell is solved.
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Indicates whether this cell's solution was assigned by a guess rather
    /// than forced deduction. Guessed values may later be reverted by the
    /// solver as long as the board has an open guess.
    pub fn is_guess(&self) -> bool {
        self.guessed
    }

    /// Solves this cell with the given digit, emptying its candidate set.
    /// Propagation to peers is the caller's responsibility.
    pub(crate) fn assign(&mut self, digit: usize, guessed: bool) {
        self.solution = Some(digit);
        self.candidates.clear();
        self.guessed = guessed;
    }

    /// Removes the given digit from this cell's candidates and reports the
    /// effect, in particular the contradiction signal [Removal::Emptied].
    pub(crate) fn remove_candidate(&mut self, digit: usize)
            -> SudokuResult<Removal> {
        if !self.candidates.remove(digit)? {
            Ok(Removal::NotPresent)
        }
        else if self.solution.is_none() && self.candidates.is_empty() {
            Ok(Removal::Emptied)
        }
        else {
            Ok(Removal::Removed)
        }
    }

    /// Takes a full-value snapshot of this cell for the undo log.
    pub(crate) fn snapshot(&self) -> Cell {
        self.clone()
    }

    /// Resets this cell to a previously taken snapshot.
    pub(crate) fn restore(&mut self, snapshot: Cell) {
        *self = snapshot;
    }
}

/// An ordered list of the 9 cell indices that form one uniqueness
/// constraint. Once all 9 members are solved, their solutions form a
/// permutation of the digits 1 to 9.
pub(crate) type Grouping = [usize; SIZE];

fn row_groupings() -> Vec<Grouping> {
    let mut groupings = Vec::new();

    for row in 0..SIZE {
        let mut grouping = [0usize; SIZE];

        for column in 0..SIZE {
            grouping[column] = index(column, row);
        }

        groupings.push(grouping);
    }

    groupings
}

fn column_groupings() -> Vec<Grouping> {
    let mut groupings = Vec::new();

    for column in 0..SIZE {
        let mut grouping = [0usize; SIZE];

        for row in 0..SIZE {
            grouping[row] = index(column, row);
        }

        groupings.push(grouping);
    }

    groupings
}

fn box_groupings() -> Vec<Grouping> {
    let mut groupings = Vec::new();

    for box_row in 0..BLOCK_SIZE {
        let base_row = box_row * BLOCK_SIZE;

        for box_column in 0..BLOCK_SIZE {
            let base_column = box_column * BLOCK_SIZE;
            let mut grouping = [0usize; SIZE];
            let mut i = 0;

            for sub_row in 0..BLOCK_SIZE {
                for sub_column in 0..BLOCK_SIZE {
                    grouping[i] =
                        index(base_column + sub_column, base_row + sub_row);
                    i += 1;
                }
            }

            groupings.push(grouping);
        }
    }

    groupings
}

fn build_groupings() -> Vec<Grouping> {
    let mut groupings = row_groupings();
    groupings.append(&mut column_groupings());
    groupings.append(&mut box_groupings());
    groupings
}

fn build_peers(groupings: &[Grouping]) -> Vec<Vec<usize>> {
    let mut peers = vec![Vec::new(); CELL_COUNT];

    for (cell, cell_peers) in peers.iter_mut().enumerate() {
        let mut seen = [false; CELL_COUNT];

        for grouping in groupings {
            if !grouping.contains(&cell) {
                continue;
            }

            for &member in grouping {
                if member != cell && !seen[member] {
                    seen[member] = true;
                    cell_peers.push(member);
                }
            }
        }
    }

    peers
}

/// The 9 by 9 arena of [Cell]s on which the solver operates, together with
/// the 27 groupings, the insertion-ordered set of unsolved cells and the
/// undo log of snapshots taken since the most recent open guess.
///
/// A board is constructed once from a [Grid](crate::Grid) and afterwards
/// mutated only by the [solver](crate::solver) module; callers observe
/// progress through the read access methods. A board whose givens already
/// violate a grouping (for example two equal digits in one row) is
/// constructed normally, but the solver will refuse it with
/// [SudokuError::UnsolvablePuzzle](crate::error::SudokuError::UnsolvablePuzzle).
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>,
    groupings: Vec<Grouping>,
    peers: Vec<Vec<usize>>,
    unsolved: Vec<usize>,
    undo_log: Vec<(usize, Cell)>,
    used_guess: bool,
    contradictory: bool
}

fn givens_consistent(cells: &[Cell], groupings: &[Grouping]) -> bool {
    for grouping in groupings {
        let mut seen = CandidateSet::empty();

        for &member in grouping {
            if let Some(digit) = cells[member].solution() {
                if !seen.insert(digit).unwrap() {
                    return false;
                }
            }
        }
    }

    true
}

impl Board {

    /// Creates a new board holding the given puzzle. Pre-filled cells are
    /// solved with their given digit; blank cells start with every digit
    /// from 1 to 9 as a candidate except those already taken by a solved
    /// peer (a cell sharing a row, column or box).
    pub fn new(grid: &Grid) -> Board {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        let mut unsolved = Vec::new();

        for (i, &content) in grid.cells().iter().enumerate() {
            let column = i % SIZE;
            let row = i / SIZE;
            cells.push(Cell::new(column, row, content));

            if content.is_none() {
                unsolved.push(i);
            }
        }

        let groupings = build_groupings();
        let peers = build_peers(&groupings);
        let mut contradictory = !givens_consistent(&cells, &groupings);

        for &cell in &unsolved {
            for &peer in &peers[cell] {
                if let Some(digit) = cells[peer].solution() {
                    cells[cell].candidates.remove(digit).unwrap();
                }
            }

            if cells[cell].candidates.is_empty() {
                contradictory = true;
            }
        }

        Board {
            cells,
            groupings,
            peers,
            unsolved,
            undo_log: Vec::new(),
            used_guess: false,
            contradictory
        }
    }

    /// Indicates whether every cell of this board is solved. Note that this
    /// only tracks the progress of the solver; for a board whose givens were
    /// contradictory to begin with, the solver raises
    /// [SudokuError::UnsolvablePuzzle](crate::error::SudokuError::UnsolvablePuzzle)
    /// even if no unsolved cells remain.
    pub fn is_solved(&self) -> bool {
        self.unsolved.is_empty()
    }

    /// Indicates whether at least one guess is currently outstanding, that
    /// is, the undo log is non-empty. While this is the case, solved cell
    /// values may still be reverted by backtracking, so callers that read
    /// individual values mid-solve should keep solving until this method
    /// returns `false` or the board is fully solved. Once the board is
    /// solved, all outstanding guesses are confirmed and this method
    /// permanently returns `false`.
    pub fn has_open_guess(&self) -> bool {
        !self.undo_log.is_empty()
    }

    /// Indicates whether any cell value was ever assigned by a guess rather
    /// than forced deduction. This remains `true` even after the board is
    /// solved and all guesses are confirmed, and also if all guessed values
    /// were reverted again. It is `false` exactly if naked and hidden
    /// singles alone have driven the solve so far.
    pub fn used_guessing(&self) -> bool {
        self.used_guess
    }

    /// Gets the cell at the specified position.
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
    pub fn get_cell(&self, column: usize, row: usize) -> SudokuResult<&Cell> {
        if column >= SIZE || row >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(&self.cells[index(column, row)])
        }
    }

    /// Gets the solved digit of the cell at the specified position, or
    /// `None` if that cell is still unsolved.
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
    pub fn get_value(&self, column: usize, row: usize)
            -> SudokuResult<Option<usize>> {
        Ok(self.get_cell(column, row)?.solution())
    }

    /// Gets the candidate set of the cell at the specified position. For
    /// solved cells, the returned set is empty.
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
    pub fn get_candidates(&self, column: usize, row: usize)
            -> SudokuResult<CandidateSet> {
        Ok(self.get_cell(column, row)?.candidates())
    }

    /// Extracts the current state of this board as a [Grid](crate::Grid),
    /// with unsolved cells blank.
    pub fn to_grid(&self) -> Grid {
        Grid::from_cells(self.cells.iter().map(Cell::solution).collect())
    }

    pub(crate) fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn groupings(&self) -> &[Grouping] {
        &self.groupings
    }

    pub(crate) fn peers(&self, index: usize) -> &[usize] {
        &self.peers[index]
    }

    pub(crate) fn unsolved(&self) -> &[usize] {
        &self.unsolved
    }

    pub(crate) fn has_contradictory_givens(&self) -> bool {
        self.contradictory
    }

    /// Pushes a snapshot of the given cell onto the undo log
    /// unconditionally. Used for the guessed cell itself, which opens the
    /// log.
    pub(crate) fn record(&mut self, index: usize) {
        self.undo_log.push((index, self.cells[index].snapshot()));
    }

    /// Pushes a snapshot of the given cell onto the undo log, but only if a
    /// guess is currently open. This bounds the undo log's growth to exactly
    /// the actions taken since the most recent guess.
    pub(crate) fn record_if_guessing(&mut self, index: usize) {
        if self.has_open_guess() {
            self.record(index);
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<(usize, Cell)> {
        self.undo_log.pop()
    }

    /// Solves the given cell with the given digit and removes it from the
    /// unsolved set. Completing the last unsolved cell confirms all
    /// outstanding guesses, which clears the undo log.
    pub(crate) fn assign(&mut self, index: usize, digit: usize,
            guessed: bool) {
        self.cells[index].assign(digit, guessed);
        self.used_guess |= guessed;

        if let Some(position) = self.unsolved.iter().position(|&u| u == index) {
            self.unsolved.remove(position);
        }

        if self.unsolved.is_empty() {
            self.undo_log.clear();
        }
    }

    pub(crate) fn remove_candidate(&mut self, index: usize, digit: usize)
            -> SudokuResult<Removal> {
        self.cells[index].remove_candidate(digit)
    }

    /// Resets the given cell to a snapshot popped from the undo log. A cell
    /// that becomes unsolved by this is re-added at the back of the
    /// insertion-ordered unsolved set.
    pub(crate) fn restore(&mut self, index: usize, snapshot: Cell) {
        let was_solved = self.cells[index].is_solved();
        self.cells[index].restore(snapshot);

        if was_solved && !self.cells[index].is_solved() {
            self.unsolved.push(index);
        }
    }
}

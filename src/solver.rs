//! This module contains the logic for solving Sudoku.
//!
//! The central type is the [SolverEngine], which advances a
//! [Board](crate::board::Board) one cell at a time. Every call to
//! [SolverEngine::solve_next_cell] applies the cheapest rule that makes
//! progress: a naked single if some cell has only one candidate left, a
//! hidden single if some digit has only one possible cell within a grouping,
//! and otherwise a guess on a cell with the fewest candidates. Wrong guesses
//! are detected when a cell runs out of candidates and are undone by
//! backtracking over the board's undo log, so the engine as a whole is
//! exhaustive: it only reports
//! [SudokuError::UnsolvablePuzzle](crate::error::SudokuError::UnsolvablePuzzle)
//! once every alternative has been disproven.
//!
//! For callers that do not care about individual steps, [solve] wraps the
//! entire process from grid to grid.
//!
//! # Example
//!
//! ```
//! use sudoku_deduction::Grid;
//! use sudoku_deduction::solver;
//!
//! let empty = Grid::new();
//! let solution = solver::solve(&empty).unwrap();
//!
//! assert!(solution.is_full());
//! ```

use crate::{Grid, SIZE};
use crate::board::{Board, Removal};
use crate::error::{SudokuError, SudokuResult};

/// The rule by which the solver derived the digit of a single assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {

    /// Indicates that the assigned cell had exactly one candidate left, so
    /// the digit was forced.
    NakedSingle,

    /// Indicates that the assigned cell was the only one within some
    /// grouping which still had the digit as a candidate.
    HiddenSingle,

    /// Indicates that no forced deduction was available, so the digit was
    /// guessed. Guessed digits may later be reverted by backtracking.
    Guess
}

/// The observable outcome of a single call to
/// [SolverEngine::solve_next_cell].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepResult {

    /// Indicates that the solver solved one cell.
    Assigned {

        /// The column (x-coordinate) of the solved cell.
        column: usize,

        /// The row (y-coordinate) of the solved cell.
        row: usize,

        /// The digit the cell was solved with.
        value: usize,

        /// The rule by which the digit was derived.
        rule: Rule
    },

    /// Indicates that the solver ran into a contradiction and reverted the
    /// most recent guess instead of solving a cell. The disproven digit is
    /// permanently removed from the reverted cell's candidates.
    Backtracked {

        /// The column (x-coordinate) of the reverted cell.
        column: usize,

        /// The row (y-coordinate) of the reverted cell.
        row: usize,

        /// The digit that was disproven.
        value: usize
    },

    /// Indicates that every cell is already solved, so no action was taken.
    Solved
}

/// The cells within one grouping which still have some fixed digit as a
/// candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Location {
    None,
    One(usize),
    Multiple
}

impl Location {

    fn union(self, index: usize) -> Location {
        match self {
            Location::None => Location::One(index),
            Location::One(_) => Location::Multiple,
            Location::Multiple => Location::Multiple
        }
    }
}

fn find_naked_single(board: &Board) -> Option<(usize, usize)> {
    for &index in board.unsolved() {
        let candidates = board.cell(index).candidates();

        if candidates.len() == 1 {
            return candidates.min().map(|digit| (index, digit));
        }
    }

    None
}

fn find_hidden_single(board: &Board) -> Option<(usize, usize)> {
    for grouping in board.groupings() {
        let mut locations = [Location::None; SIZE + 1];

        for &member in grouping {
            let cell = board.cell(member);

            if cell.is_solved() {
                continue;
            }

            for digit in cell.candidates() {
                locations[digit] = locations[digit].union(member);
            }
        }

        for digit in 1..=SIZE {
            if let Location::One(index) = locations[digit] {
                return Some((index, digit));
            }
        }
    }

    None
}

fn select_guess(board: &Board) -> Option<(usize, usize)> {
    let mut best: Option<usize> = None;
    let mut best_len = usize::MAX;

    for &index in board.unsolved() {
        let len = board.cell(index).candidates().len();

        if len < best_len {
            best = Some(index);
            best_len = len;
        }
    }

    let index = best?;
    let digit = board.cell(index).candidates().min()?;
    Some((index, digit))
}

/// A deterministic, exhaustive Sudoku solver which progresses one cell per
/// step. All methods require a mutable [Board], which carries the entire
/// solve state, so the engine itself is stateless and can be shared freely.
pub struct SolverEngine;

impl SolverEngine {

    /// Advances the given board by a single step. If an unsolved cell
    /// remains, the engine assigns one digit, derived by the cheapest
    /// applicable rule (naked single, then hidden single, then guess), and
    /// removes that digit from the candidates of all affected peers. If this
    /// empties the candidate set of some cell, the most recent guess is
    /// disproven and reverted instead, which is reported as
    /// [StepResult::Backtracked].
    ///
    /// Ties are broken deterministically: cells are considered in the order
    /// in which they became unsolved, groupings in the order rows, columns,
    /// boxes, and digits in ascending order. Repeated calls therefore always
    /// reproduce the same solve.
    ///
    /// # Errors
    ///
    /// If the puzzle has been proven unsolvable, that is, if a contradiction
    /// arises while no guess is open that could be reverted. In that case,
    /// `SudokuError::UnsolvablePuzzle` is returned.
    pub fn solve_next_cell(&self, board: &mut Board)
            -> SudokuResult<StepResult> {
        if board.has_contradictory_givens() {
            return Err(SudokuError::UnsolvablePuzzle);
        }

        if board.is_solved() {
            return Ok(StepResult::Solved);
        }

        if let Some((index, digit)) = find_naked_single(board) {
            self.commit(board, index, digit, Rule::NakedSingle)
        }
        else if let Some((index, digit)) = find_hidden_single(board) {
            self.commit(board, index, digit, Rule::HiddenSingle)
        }
        else if let Some((index, digit)) = select_guess(board) {
            self.commit(board, index, digit, Rule::Guess)
        }
        else {
            // Some unsolved cell has run out of candidates, so the current
            // assignment is contradictory.
            self.backtrack(board)
        }
    }

    /// Repeatedly applies [SolverEngine::solve_next_cell] to the given board
    /// until it is solved.
    ///
    /// # Errors
    ///
    /// If the puzzle is unsolvable. In that case,
    /// `SudokuError::UnsolvablePuzzle` is returned.
    pub fn solve_board(&self, board: &mut Board) -> SudokuResult<()> {
        loop {
            if let StepResult::Solved = self.solve_next_cell(board)? {
                return Ok(());
            }
        }
    }

    /// Assigns the given digit to the cell with the given index and removes
    /// it from the candidates of all affected peers. Snapshots of the cell
    /// and all affected peers are pushed onto the undo log before any
    /// mutation, so the entire step can be reverted if it is (or depends on)
    /// a guess.
    fn commit(&self, board: &mut Board, index: usize, digit: usize,
            rule: Rule) -> SudokuResult<StepResult> {
        let guessed = rule == Rule::Guess;

        if guessed {
            board.record(index);
        }
        else {
            board.record_if_guessing(index);
        }

        let affected: Vec<usize> = board.peers(index).iter()
            .cloned()
            .filter(|&peer| {
                let cell = board.cell(peer);
                !cell.is_solved() && cell.candidates().contains(digit)
            })
            .collect();

        for &peer in &affected {
            board.record_if_guessing(peer);
        }

        let column = board.cell(index).column();
        let row = board.cell(index).row();
        board.assign(index, digit, guessed);

        for &peer in &affected {
            if let Removal::Emptied = board.remove_candidate(peer, digit)? {
                return self.backtrack(board);
            }
        }

        Ok(StepResult::Assigned {
            column,
            row,
            value: digit,
            rule
        })
    }

    /// Reverts the most recent guess by popping snapshots off the undo log
    /// until the guessed cell itself has been restored, then removes the
    /// disproven digit from that cell's candidates. If this empties the
    /// cell, the enclosing guess is disproven as well and backtracking
    /// continues with it.
    ///
    /// # Errors
    ///
    /// If the undo log runs out before a guess is found. The contradiction
    /// then follows from the givens alone, so `SudokuError::UnsolvablePuzzle`
    /// is returned.
    fn backtrack(&self, board: &mut Board) -> SudokuResult<StepResult> {
        loop {
            let (index, snapshot) = match board.pop_undo() {
                Some(entry) => entry,
                None => return Err(SudokuError::UnsolvablePuzzle)
            };

            let disproven = if board.cell(index).is_guess() {
                board.cell(index).solution()
            }
            else {
                None
            };

            board.restore(index, snapshot);

            if let Some(digit) = disproven {
                board.record_if_guessing(index);

                if let Removal::Emptied =
                        board.remove_candidate(index, digit)? {
                    continue;
                }

                let cell = board.cell(index);

                return Ok(StepResult::Backtracked {
                    column: cell.column(),
                    row: cell.row(),
                    value: digit
                });
            }
        }
    }
}

/// Solves the given puzzle and returns the completed grid. This is a
/// convenience wrapper around [SolverEngine::solve_board] for callers that
/// do not care about individual steps.
///
/// # Errors
///
/// If the puzzle is unsolvable, that is, if its givens are contradictory or
/// exhaustive search disproves every candidate of some cell. In that case,
/// `SudokuError::UnsolvablePuzzle` is returned and no partially solved grid
/// is exposed.
pub fn solve(grid: &Grid) -> SudokuResult<Grid> {
    let mut board = Board::new(grid);
    SolverEngine.solve_board(&mut board)?;
    Ok(board.to_grid())
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::candidates;
    use crate::index;
    use crate::util::CandidateSet;

    fn board(code: &str) -> Board {
        Board::new(&Grid::parse(code).unwrap())
    }

    const NAKED_SINGLES: &'static str = "\
         ,2,3,4,5,6,7,8,9,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         ,1,2,3,5,6,7,8,9,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ";

    #[test]
    fn naked_single_is_found_in_insertion_order() {
        let mut board = board(NAKED_SINGLES);

        assert_eq!(Ok(StepResult::Assigned {
            column: 0,
            row: 0,
            value: 1,
            rule: Rule::NakedSingle
        }), SolverEngine.solve_next_cell(&mut board));

        assert_eq!(Ok(StepResult::Assigned {
            column: 0,
            row: 4,
            value: 4,
            rule: Rule::NakedSingle
        }), SolverEngine.solve_next_cell(&mut board));

        assert!(!board.has_open_guess());
        assert!(!board.used_guessing());
    }

    #[test]
    fn deduced_assignment_leaves_undo_log_empty() {
        let mut board = board(NAKED_SINGLES);
        SolverEngine.solve_next_cell(&mut board).unwrap();

        assert!(!board.has_open_guess());
        assert_eq!(None, board.pop_undo());
    }

    #[test]
    fn hidden_single_is_found_in_first_grouping() {
        // In the top row, 5 is excluded from all blank cells but the corner.
        let mut board = board("\
             , , ,3,4,6,7,8,9,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             ,5, , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , ,5, , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ");

        assert_eq!(Ok(StepResult::Assigned {
            column: 0,
            row: 0,
            value: 5,
            rule: Rule::HiddenSingle
        }), SolverEngine.solve_next_cell(&mut board));
    }

    #[test]
    fn guess_takes_smallest_candidate_set_and_digit() {
        let mut board = board("\
            1,2,3,4,5,6, , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ");

        assert_eq!(Ok(StepResult::Assigned {
            column: 6,
            row: 0,
            value: 7,
            rule: Rule::Guess
        }), SolverEngine.solve_next_cell(&mut board));

        assert!(board.has_open_guess());
        assert!(board.used_guessing());
        assert!(board.get_cell(6, 0).unwrap().is_guess());
    }

    #[test]
    fn guess_ties_are_broken_by_insertion_order() {
        let mut board = board("\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ");

        assert_eq!(Ok(StepResult::Assigned {
            column: 0,
            row: 0,
            value: 1,
            rule: Rule::Guess
        }), SolverEngine.solve_next_cell(&mut board));
    }

    #[test]
    fn disproven_guess_is_reverted_and_removed() {
        // (0, 0) can hold 1 or 2, while (1, 0) can only hold 2.
        let mut board = board("\
             , ,3,4,5,6,7,8,9,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             ,1, , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ");
        let target = index(0, 0);

        assert_eq!(candidates!(1, 2), board.get_candidates(0, 0).unwrap());
        assert_eq!(candidates!(2), board.get_candidates(1, 0).unwrap());

        // Guessing 2 in the corner empties (1, 0) immediately.
        let result =
            SolverEngine.commit(&mut board, target, 2, Rule::Guess);

        assert_eq!(Ok(StepResult::Backtracked {
            column: 0,
            row: 0,
            value: 2
        }), result);

        assert_eq!(None, board.get_value(0, 0).unwrap());
        assert_eq!(candidates!(1), board.get_candidates(0, 0).unwrap());
        assert_eq!(candidates!(2), board.get_candidates(1, 0).unwrap());
        assert!(!board.has_open_guess());
        assert!(board.used_guessing());
    }

    // The blank cells (0, 0) and (1, 0) share the candidates 1 and 2, while
    // the given 9s narrow both (0, 4) and (1, 4) down to a single 5, which
    // leaves no cell in row 4 that could hold a 9. Guessing there forces
    // backtracking of various depths.
    const GUESS_TRAP: &'static str = "\
         , ,3,4,5,6,7,8,9,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , ,1,2,3,4,6,7,8,\
         ,9, , , , , , , ,\
         , , , , , , , , ,\
        9, , , , , , , , ,\
         , , , , , , , , ";

    #[test]
    fn backtracking_cascades_to_the_outer_guess() {
        let mut board = board(GUESS_TRAP);
        let outer = index(0, 0);
        let inner = index(0, 4);

        assert_eq!(candidates!(5), board.get_candidates(0, 4).unwrap());
        assert_eq!(candidates!(5), board.get_candidates(1, 4).unwrap());

        SolverEngine.commit(&mut board, outer, 1, Rule::Guess).unwrap();
        assert!(board.has_open_guess());

        // Solving (0, 4) empties (1, 4). Reverting the inner guess empties
        // (0, 4) itself, so backtracking must continue to the outer guess.
        let result =
            SolverEngine.commit(&mut board, inner, 5, Rule::Guess);

        assert_eq!(Ok(StepResult::Backtracked {
            column: 0,
            row: 0,
            value: 1
        }), result);

        assert_eq!(candidates!(2), board.get_candidates(0, 0).unwrap());
        assert_eq!(candidates!(1, 2), board.get_candidates(1, 0).unwrap());
        assert_eq!(candidates!(5), board.get_candidates(0, 4).unwrap());
        assert_eq!(candidates!(5), board.get_candidates(1, 4).unwrap());
        assert!(!board.has_open_guess());
    }

    #[test]
    fn exhausting_the_undo_log_is_unsolvable() {
        let mut board = board(GUESS_TRAP);
        let target = index(0, 4);

        // With no outer guess open, reverting this guess leaves (0, 4)
        // without candidates and without anything left to undo.
        let result =
            SolverEngine.commit(&mut board, target, 5, Rule::Guess);

        assert_eq!(Err(SudokuError::UnsolvablePuzzle), result);
    }

    #[test]
    fn contradiction_without_guess_is_unsolvable() {
        // (0, 0) and (1, 0) are both forced to 1.
        let code = "\
             , ,3,4,5,6,7,8,9,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             ,2, , , , , , , ,\
             , , , , , , , , ,\
            2, , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ";
        let mut board = board(code);

        assert_eq!(candidates!(1), board.get_candidates(0, 0).unwrap());
        assert_eq!(candidates!(1), board.get_candidates(1, 0).unwrap());

        assert_eq!(Err(SudokuError::UnsolvablePuzzle),
            SolverEngine.solve_next_cell(&mut board));
        assert_eq!(Err(SudokuError::UnsolvablePuzzle),
            solve(&Grid::parse(code).unwrap()));
    }

    // Puzzle 2 of sudoku 1 of the WPF Sudoku GP 2020 Round 8.
    // https://gp.worldpuzzle.org/sites/default/files/Puzzles/2020/2020_SudokuRound8.pdf
    const WPF_PUZZLE: &'static str = "\
         , , , ,8,1, , , ,\
         , ,2, , ,7,8, , ,\
         ,5,3, , , ,1,7, ,\
        3,7, , , , , , , ,\
        6, , , , , , , ,3,\
         , , , , , , ,2,4,\
         ,6,9, , , ,2,3, ,\
         , ,5,9, , ,4, , ,\
         , , ,6,5, , , , ";

    const WPF_SOLUTION: &'static str = "\
        7,4,6,2,8,1,3,5,9,\
        9,1,2,5,3,7,8,4,6,\
        8,5,3,4,9,6,1,7,2,\
        3,7,4,1,2,5,6,9,8,\
        6,2,8,7,4,9,5,1,3,\
        5,9,1,3,6,8,7,2,4,\
        1,6,9,8,7,4,2,3,5,\
        2,8,5,9,1,3,4,6,7,\
        4,3,7,6,5,2,9,8,1";

    #[test]
    fn real_world_puzzle_is_solved_correctly() {
        let puzzle = Grid::parse(WPF_PUZZLE).unwrap();
        let expected = Grid::parse(WPF_SOLUTION).unwrap();

        assert_eq!(Ok(expected), solve(&puzzle));
    }

    #[test]
    fn solving_retains_all_givens() {
        let puzzle = Grid::parse(WPF_PUZZLE).unwrap();
        let solution = solve(&puzzle).unwrap();

        for row in 0..SIZE {
            for column in 0..SIZE {
                if let Some(digit) = puzzle.get_cell(column, row).unwrap() {
                    assert_eq!(Some(digit),
                        solution.get_cell(column, row).unwrap());
                }
            }
        }
    }

    #[test]
    fn duplicate_givens_are_unsolvable() {
        let puzzle = Grid::parse("\
            5, , , ,5, , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ").unwrap();

        assert_eq!(Err(SudokuError::UnsolvablePuzzle), solve(&puzzle));
    }

    #[test]
    fn full_but_invalid_grid_is_unsolvable() {
        // The solved corner is changed to a duplicate 4.
        let full = WPF_SOLUTION.replacen("7", "4", 1);
        let puzzle = Grid::parse(&full).unwrap();
        let mut board = Board::new(&puzzle);

        assert!(board.is_solved());
        assert_eq!(Err(SudokuError::UnsolvablePuzzle),
            SolverEngine.solve_next_cell(&mut board));
        assert_eq!(Err(SudokuError::UnsolvablePuzzle), solve(&puzzle));
    }

    #[test]
    fn solving_a_solved_board_is_a_no_op() {
        let solution = Grid::parse(WPF_SOLUTION).unwrap();
        let mut board = Board::new(&solution);

        assert!(board.is_solved());
        assert_eq!(Ok(StepResult::Solved),
            SolverEngine.solve_next_cell(&mut board));
        assert_eq!(Ok(StepResult::Solved),
            SolverEngine.solve_next_cell(&mut board));
        assert_eq!(solution, board.to_grid());
        assert!(!board.has_open_guess());
        assert_eq!(Ok(solution), solve(&board.to_grid()));
    }

    #[test]
    fn empty_grid_solution_is_valid() {
        let solution = solve(&Grid::new()).unwrap();

        assert!(solution.is_full());
    }
}

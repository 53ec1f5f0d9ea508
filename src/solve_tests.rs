//! End-to-end tests that drive the solver over entire puzzles and check the
//! properties that hold across modules, such as validity of solutions,
//! stability of values assigned without guessing and determinism of the
//! step-by-step interface.

use crate::{BLOCK_SIZE, Grid, SIZE};
use crate::board::Board;
use crate::error::SudokuError;
use crate::solver::{self, Rule, SolverEngine, StepResult};
use crate::util::CandidateSet;

use rand::Rng;
use rand::SeedableRng;

use rand_chacha::ChaCha8Rng;

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

fn assert_valid_solution(grid: &Grid) {
    assert!(grid.is_full());

    for row in 0..SIZE {
        let mut seen = CandidateSet::empty();

        for column in 0..SIZE {
            let digit = grid.get_cell(column, row).unwrap().unwrap();
            assert!(seen.insert(digit).unwrap());
        }
    }

    for column in 0..SIZE {
        let mut seen = CandidateSet::empty();

        for row in 0..SIZE {
            let digit = grid.get_cell(column, row).unwrap().unwrap();
            assert!(seen.insert(digit).unwrap());
        }
    }

    for box_row in 0..BLOCK_SIZE {
        for box_column in 0..BLOCK_SIZE {
            let mut seen = CandidateSet::empty();

            for sub_row in 0..BLOCK_SIZE {
                for sub_column in 0..BLOCK_SIZE {
                    let column = box_column * BLOCK_SIZE + sub_column;
                    let row = box_row * BLOCK_SIZE + sub_row;
                    let digit = grid.get_cell(column, row).unwrap().unwrap();
                    assert!(seen.insert(digit).unwrap());
                }
            }
        }
    }
}

fn assert_givens_retained(puzzle: &Grid, solution: &Grid) {
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
fn stepping_matches_one_shot_solve() {
    let puzzle = Grid::parse(WPF_PUZZLE).unwrap();
    let mut board = Board::new(&puzzle);

    while SolverEngine.solve_next_cell(&mut board).unwrap()
            != StepResult::Solved { }

    assert_eq!(solver::solve(&puzzle).unwrap(), board.to_grid());
}

#[test]
fn values_without_open_guess_are_final() {
    let puzzle = Grid::parse(WPF_PUZZLE).unwrap();
    let solution = solver::solve(&puzzle).unwrap();
    let mut board = Board::new(&puzzle);

    loop {
        if let StepResult::Solved =
                SolverEngine.solve_next_cell(&mut board).unwrap() {
            break;
        }

        if board.has_open_guess() {
            continue;
        }

        for row in 0..SIZE {
            for column in 0..SIZE {
                if let Some(digit) = board.get_value(column, row).unwrap() {
                    assert_eq!(Some(digit),
                        solution.get_cell(column, row).unwrap());
                }
            }
        }
    }
}

#[test]
fn forced_puzzle_never_opens_the_undo_log() {
    // Blanking one cell per row, all in different columns, leaves every
    // blank cell with exactly one candidate at all times.
    let mut puzzle = Grid::parse(WPF_SOLUTION).unwrap();

    for i in 0..SIZE {
        puzzle.clear_cell(i, i).unwrap();
    }

    let mut board = Board::new(&puzzle);

    loop {
        match SolverEngine.solve_next_cell(&mut board).unwrap() {
            StepResult::Solved => break,
            StepResult::Assigned { rule, .. } => {
                assert_ne!(Rule::Guess, rule);
                assert!(!board.has_open_guess());
            },
            StepResult::Backtracked { .. } =>
                panic!("Backtracked on a forced puzzle.")
        }
    }

    assert!(!board.used_guessing());
    assert_eq!(Grid::parse(WPF_SOLUTION).unwrap(), board.to_grid());
}

#[test]
fn guesses_are_confirmed_once_solved() {
    let mut board = Board::new(&Grid::new());
    let mut guessed_mid_solve = false;

    loop {
        if let StepResult::Solved =
                SolverEngine.solve_next_cell(&mut board).unwrap() {
            break;
        }

        guessed_mid_solve |= board.has_open_guess();
    }

    assert!(guessed_mid_solve);
    assert!(board.used_guessing());
    assert!(!board.has_open_guess());
    assert_valid_solution(&board.to_grid());
}

#[test]
fn randomly_blanked_solutions_are_solved_correctly() {
    let mut rng = ChaCha8Rng::seed_from_u64(87);
    let solution = Grid::parse(WPF_SOLUTION).unwrap();

    for _ in 0..20 {
        let mut puzzle = solution.clone();

        for row in 0..SIZE {
            for column in 0..SIZE {
                if rng.gen_bool(0.5) {
                    puzzle.clear_cell(column, row).unwrap();
                }
            }
        }

        let solved = solver::solve(&puzzle).unwrap();

        assert_valid_solution(&solved);
        assert_givens_retained(&puzzle, &solved);
    }
}

#[test]
fn deep_contradiction_is_proven_unsolvable() {
    // Three cells in the top row compete for the digits 1 and 2, since the
    // 3 in their box rules out the third missing digit for all of them.
    // Detecting this requires disproving guesses.
    let puzzle = Grid::parse("\
         , , ,4,5,6,7,8,9,\
         , ,3, , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ,\
         , , , , , , , , ").unwrap();

    assert_eq!(Err(SudokuError::UnsolvablePuzzle), solver::solve(&puzzle));
}

#[test]
fn solving_is_deterministic() {
    let puzzle = Grid::parse(WPF_PUZZLE).unwrap();
    let first = solver::solve(&puzzle).unwrap();

    for _ in 0..3 {
        assert_eq!(first, solver::solve(&puzzle).unwrap());
    }
}

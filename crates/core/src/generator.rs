//! Board generation and legal-move probing
//!
//! A generated board has no existing match and at least one swap that would
//! create one. Generation is plain rejection sampling: draw a whole board, keep
//! it only if both checks pass, otherwise draw again.

use crate::board::Board;
use crate::matches::find_matches;
use crate::rng::ColorSource;
use crate::types::{Color, CELL_COUNT, GRID_HEIGHT, GRID_WIDTH};

/// Result of [`generate_board`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedBoard {
    pub board: Board,
    /// Number of boards drawn, including the accepted one
    pub attempts: u32,
}

/// Fill a board with independently drawn colors
pub fn random_board<R: ColorSource + ?Sized>(source: &mut R) -> Board {
    let mut cells = [Color::Red; CELL_COUNT];
    for cell in cells.iter_mut() {
        *cell = source.next_color();
    }
    Board::from_cells(cells)
}

/// Would swapping `a` and `b` produce at least one match?
///
/// Works on a copy; the input board is never touched.
pub fn would_match(board: &Board, a: usize, b: usize) -> bool {
    let mut probe = *board;
    probe.swap(a, b) && !find_matches(&probe).is_empty()
}

/// First swap that produces a match, scanning cells in index order and trying
/// the right neighbour before the down neighbour. Each adjacent pair is
/// checked exactly once.
pub fn find_possible_move(board: &Board) -> Option<(usize, usize)> {
    for i in 0..CELL_COUNT {
        let (row, col) = (i / GRID_WIDTH, i % GRID_WIDTH);
        if col + 1 < GRID_WIDTH && would_match(board, i, i + 1) {
            return Some((i, i + 1));
        }
        if row + 1 < GRID_HEIGHT && would_match(board, i, i + GRID_WIDTH) {
            return Some((i, i + GRID_WIDTH));
        }
    }
    None
}

pub fn has_possible_moves(board: &Board) -> bool {
    find_possible_move(board).is_some()
}

/// Draw boards until one has no match and at least one legal move.
///
/// Termination is probabilistic; with six colors on 8x8 a board is usually
/// accepted within a few dozen attempts.
pub fn generate_board<R: ColorSource + ?Sized>(source: &mut R) -> GeneratedBoard {
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let board = random_board(source);
        if find_matches(&board).is_empty() && has_possible_moves(&board) {
            return GeneratedBoard { board, attempts };
        }
    }
}

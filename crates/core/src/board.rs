//! Board module - manages the game grid
//!
//! The board is an 8x8 grid where every cell holds one color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where both range 0..7; linear index is `row * 8 + col`.

use crate::types::{Cell, Color, CELL_COUNT, GRID_HEIGHT, GRID_WIDTH};

/// The game board - 8 columns x 8 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a board from a flat cell array
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Create a board filled with a single color
    pub fn filled(color: Color) -> Self {
        Self {
            cells: [color; CELL_COUNT],
        }
    }

    /// Parse a board from color letters (`R B G Y P O`).
    ///
    /// Whitespace is ignored, so a layout may be written one row per line.
    /// Returns None unless exactly 64 valid letters are present.
    pub fn parse(layout: &str) -> Option<Self> {
        let mut cells = [Color::Red; CELL_COUNT];
        let mut n = 0usize;
        for c in layout.chars().filter(|c| !c.is_whitespace()) {
            if n >= CELL_COUNT {
                return None;
            }
            cells[n] = Color::from_char(c)?;
            n += 1;
        }
        if n != CELL_COUNT {
            return None;
        }
        Some(Self { cells })
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    pub fn index(row: usize, col: usize) -> Option<usize> {
        if row >= GRID_HEIGHT || col >= GRID_WIDTH {
            return None;
        }
        Some(row * GRID_WIDTH + col)
    }

    /// Split a flat index into (row, col)
    #[inline(always)]
    pub fn position(index: usize) -> Option<(usize, usize)> {
        if index >= CELL_COUNT {
            return None;
        }
        Some((index / GRID_WIDTH, index % GRID_WIDTH))
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Get cell at a flat index
    /// Returns None if out of bounds
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Get cell at (row, col)
    pub fn get_at(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at a flat index
    /// Returns false if out of bounds
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells.
    /// Returns false (and leaves the board untouched) if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= CELL_COUNT || b >= CELL_COUNT {
            return false;
        }
        self.cells.swap(a, b);
        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Render as one line of color letters per row
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(CELL_COUNT + GRID_HEIGHT);
        for (idx, cell) in self.cells.iter().enumerate() {
            out.push(cell.as_char());
            if idx % GRID_WIDTH == GRID_WIDTH - 1 {
                out.push('\n');
            }
        }
        out
    }
}

/// Check whether two cells may be swapped: both on the board and orthogonally
/// adjacent (Manhattan distance exactly 1). Diagonals and row wrap-around are rejected.
pub fn is_valid_swap(a: usize, b: usize) -> bool {
    match (Board::position(a), Board::position(b)) {
        (Some((r1, c1)), Some((r2, c2))) => r1.abs_diff(r2) + c1.abs_diff(c2) == 1,
        _ => false,
    }
}

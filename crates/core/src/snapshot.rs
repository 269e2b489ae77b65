//! Plain-data view of a [`GameState`](crate::GameState) for renderers and observers

use crate::types::{GRID_HEIGHT, GRID_WIDTH, MOVE_BUDGET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Palette index per cell, `cells[row][col]`
    pub cells: [[u8; GRID_WIDTH]; GRID_HEIGHT],
    pub selected: Option<u8>,
    pub score: u32,
    pub flx_points: u64,
    pub moves_remaining: u32,
    pub move_budget: u32,
    pub processing: bool,
    pub commit_pending: bool,
    /// Live score popups
    pub popups: u8,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[0u8; GRID_WIDTH]; GRID_HEIGHT];
        self.selected = None;
        self.score = 0;
        self.flx_points = 0;
        self.moves_remaining = MOVE_BUDGET;
        self.move_budget = MOVE_BUDGET;
        self.processing = false;
        self.commit_pending = false;
        self.popups = 0;
    }

    /// Whether a renderer should accept taps
    pub fn playable(&self) -> bool {
        !self.processing && !self.commit_pending && self.moves_remaining > 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cells: [[0u8; GRID_WIDTH]; GRID_HEIGHT],
            selected: None,
            score: 0,
            flx_points: 0,
            moves_remaining: 0,
            move_budget: 0,
            processing: false,
            commit_pending: false,
            popups: 0,
        };
        s.clear();
        s
    }
}

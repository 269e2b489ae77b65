//! Session bookkeeping - score, FLX mirror and the move budget

use crate::types::MOVE_BUDGET;

/// Server-side values used to hydrate a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoredSession {
    pub score: u32,
    pub flx_points: u64,
    /// Server move counter; may be stale or out of range
    pub current_moves: i64,
}

/// Authoritative values returned by a successful save. `score` is what the
/// server recorded for the finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitReceipt {
    pub score: u32,
    pub flx_points: u64,
}

/// Per-player transient state between commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    score: u32,
    flx_points: u64,
    moves_remaining: u32,
    move_budget: u32,
    /// Points awarded since the last hydrate or successful save
    unsaved: u32,
}

impl Session {
    /// Fresh session with a full move budget. A zero budget is treated as one move.
    pub fn new(move_budget: u32) -> Self {
        let move_budget = move_budget.max(1);
        Self {
            score: 0,
            flx_points: 0,
            moves_remaining: move_budget,
            move_budget,
            unsaved: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn flx_points(&self) -> u64 {
        self.flx_points
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn move_budget(&self) -> u32 {
        self.move_budget
    }

    pub fn unsaved_points(&self) -> u32 {
        self.unsaved
    }

    pub fn has_moves(&self) -> bool {
        self.moves_remaining > 0
    }

    /// Spend one move. Returns true when this spent the last one.
    pub fn consume_move(&mut self) -> bool {
        if self.moves_remaining == 0 {
            return false;
        }
        self.moves_remaining -= 1;
        self.moves_remaining == 0
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.unsaved = self.unsaved.saturating_add(points);
    }

    /// Adopt server values. Move counts outside `1..=budget` fall back to the full
    /// budget. Returns false when that fallback was applied.
    pub fn hydrate(&mut self, stored: StoredSession) -> bool {
        self.score = stored.score;
        self.flx_points = stored.flx_points;
        self.unsaved = 0;
        if stored.current_moves >= 1 && stored.current_moves <= self.move_budget as i64 {
            self.moves_remaining = stored.current_moves as u32;
            true
        } else {
            self.moves_remaining = self.move_budget;
            false
        }
    }

    /// Close the session after a successful save: adopt the server's FLX
    /// balance and start the next session from zero with a full budget
    pub fn reconcile(&mut self, receipt: CommitReceipt) {
        self.flx_points = receipt.flx_points;
        self.reset();
    }

    /// Back to a fresh session (score and moves), keeping the FLX mirror
    pub fn reset(&mut self) {
        self.score = 0;
        self.unsaved = 0;
        self.moves_remaining = self.move_budget;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MOVE_BUDGET)
    }
}

//! Events emitted by the engine for renderers and observers

use crate::core::{GameSnapshot, PassReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Hydrated {
        score: u32,
        flx_points: u64,
        moves_remaining: u32,
    },
    /// Loading failed; local defaults are in effect
    LoadFailed { reason: String },
    Selected { index: usize },
    SelectionCleared { first: usize, second: usize },
    Swapped {
        a: usize,
        b: usize,
        moves_remaining: u32,
    },
    Cleared { pass: PassReport, score: u32 },
    Reverted { a: usize, b: usize },
    Settled { passes: u32, score: u32 },
    Committed { score: u32, flx_points: u64 },
    /// Transient save failure; moves stay at zero until a retry succeeds
    CommitFailed { reason: String },
    /// The server refused the score; the session was discarded and moves refilled
    CommitRejected { score: u32 },
    /// Board after a visible change (swap, refill, revert, commit)
    Board(GameSnapshot),
}

//! Scoring module - match points and FLX conversion
//!
//! - Every matched cell is worth [`POINTS_PER_CELL`] points, so a pass that
//!   clears `k` cells awards `50 * k`.
//! - Cascade passes are scored independently; there is no combo multiplier.
//! - On save the server credits `floor(score / 10)` FLX points.

use crate::matches::MatchSet;
use crate::types::{FLX_DIVISOR, MAX_SUBMITTED_SCORE, POINTS_PER_CELL};

/// Points for one resolution pass
pub fn calculate_match_score(matched: &MatchSet) -> u32 {
    POINTS_PER_CELL.saturating_mul(matched.len() as u32)
}

/// FLX points credited for a saved score
pub fn calculate_flx_award(score: u32) -> u64 {
    score as u64 / FLX_DIVISOR
}

/// Whether a store accepts this score on save
pub fn is_submittable_score(score: u32) -> bool {
    score <= MAX_SUBMITTED_SCORE
}

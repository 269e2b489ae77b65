//! Player records and the server-side save rules shared by every store

use serde::{Deserialize, Serialize};

use crate::core::{calculate_flx_award, is_submittable_score};
use crate::engine::{SaveReceipt, StoredState};
use crate::error::StoreError;
use crate::types::{PlayerId, MOVE_BUDGET};

/// Identity details supplied by the chat platform at registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PlayerProfile {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub telegram_id: PlayerId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Last saved score (overwritten, not accumulated)
    pub points: u32,
    pub flx_points: u64,
    /// Server move counter, decremented once per save
    pub current_moves: i64,
}

impl PlayerRecord {
    pub fn register(profile: &PlayerProfile) -> Self {
        Self {
            telegram_id: profile.id,
            username: clean(profile.username.as_deref()),
            first_name: clean(profile.first_name.as_deref()),
            last_name: clean(profile.last_name.as_deref()),
            points: 0,
            flx_points: 0,
            current_moves: MOVE_BUDGET as i64,
        }
    }

    pub fn stored_state(&self) -> StoredState {
        StoredState {
            score: self.points,
            flx_points: self.flx_points,
            current_moves: self.current_moves,
        }
    }

    /// Record a submitted score: overwrite points, credit `floor(score / 10)` FLX,
    /// decrement the server move counter.
    pub fn apply_save(&mut self, score: u32) -> Result<SaveReceipt, StoreError> {
        if !is_submittable_score(score) {
            return Err(StoreError::InvalidScore(score));
        }
        self.points = score;
        self.flx_points = self.flx_points.saturating_add(calculate_flx_award(score));
        self.current_moves -= 1;
        Ok(SaveReceipt {
            new_score: self.points,
            new_flx_points: self.flx_points,
        })
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

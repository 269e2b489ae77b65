//! Persistence gateway - the save/load boundary owned by the server
//!
//! The engine only ever sends a final score; the server decides FLX awards and
//! tracks its own move counter.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{CommitReceipt, StoredSession};
use crate::types::PlayerId;

/// Values returned by `load_state`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub score: u32,
    pub flx_points: u64,
    pub current_moves: i64,
}

/// Values returned by `save_state`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub new_score: u32,
    pub new_flx_points: u64,
}

impl From<StoredState> for StoredSession {
    fn from(value: StoredState) -> Self {
        Self {
            score: value.score,
            flx_points: value.flx_points,
            current_moves: value.current_moves,
        }
    }
}

impl From<SaveReceipt> for CommitReceipt {
    fn from(value: SaveReceipt) -> Self {
        Self {
            score: value.new_score,
            flx_points: value.new_flx_points,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("player {0} not found")]
    UnknownPlayer(PlayerId),
    #[error("score {0} rejected")]
    InvalidScore(u32),
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Fetch the stored score, FLX balance and server move counter
    async fn load_state(&self, player: PlayerId) -> Result<StoredState, GatewayError>;

    /// Submit a final score; the server credits FLX and answers with its values
    async fn save_state(
        &self,
        player: PlayerId,
        final_score: u32,
    ) -> Result<SaveReceipt, GatewayError>;
}

#[async_trait]
impl<T: PersistenceGateway + ?Sized> PersistenceGateway for Arc<T> {
    async fn load_state(&self, player: PlayerId) -> Result<StoredState, GatewayError> {
        (**self).load_state(player).await
    }

    async fn save_state(
        &self,
        player: PlayerId,
        final_score: u32,
    ) -> Result<SaveReceipt, GatewayError> {
        (**self).save_state(player, final_score).await
    }
}

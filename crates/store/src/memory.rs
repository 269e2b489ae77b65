//! In-memory store, for tests and for runs without a state file

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::engine::{GatewayError, PersistenceGateway, SaveReceipt, StoredState};
use crate::error::StoreError;
use crate::record::{PlayerProfile, PlayerRecord};
use crate::types::PlayerId;

#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find or create the player. Existing records are returned unchanged.
    pub async fn register(&self, profile: &PlayerProfile) -> PlayerRecord {
        let mut players = self.players.write().await;
        players
            .entry(profile.id)
            .or_insert_with(|| {
                debug!(player = profile.id, "registering player");
                PlayerRecord::register(profile)
            })
            .clone()
    }

    pub async fn get(&self, player: PlayerId) -> Option<PlayerRecord> {
        self.players.read().await.get(&player).cloned()
    }

    pub async fn len(&self) -> usize {
        self.players.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.players.read().await.is_empty()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryStore {
    async fn load_state(&self, player: PlayerId) -> Result<StoredState, GatewayError> {
        let players = self.players.read().await;
        let record = players
            .get(&player)
            .ok_or(StoreError::UnknownPlayer(player))?;
        Ok(record.stored_state())
    }

    async fn save_state(
        &self,
        player: PlayerId,
        final_score: u32,
    ) -> Result<SaveReceipt, GatewayError> {
        let mut players = self.players.write().await;
        let record = players
            .get_mut(&player)
            .ok_or(StoreError::UnknownPlayer(player))?;
        Ok(record.apply_save(final_score)?)
    }
}

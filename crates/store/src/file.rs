//! JSON file store
//!
//! The whole ledger is one JSON object keyed by player id. Every operation
//! reads the file, and writes go to a sibling temp file that is renamed over
//! the original. A mutex serializes operations within the process.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::engine::{GatewayError, PersistenceGateway, SaveReceipt, StoredState};
use crate::error::StoreError;
use crate::record::{PlayerProfile, PlayerRecord};
use crate::types::PlayerId;

type Ledger = BTreeMap<PlayerId, PlayerRecord>;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// The file is created on first write; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_ledger(&self) -> Result<Ledger, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Ledger::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Ledger::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_ledger(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(ledger)?;
        let mut tmp_name = OsString::from(self.path.as_os_str());
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Find or create the player. Existing records are returned unchanged.
    pub async fn register(&self, profile: &PlayerProfile) -> Result<PlayerRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut ledger = self.read_ledger().await?;
        if let Some(existing) = ledger.get(&profile.id) {
            return Ok(existing.clone());
        }
        debug!(player = profile.id, path = %self.path.display(), "registering player");
        let record = PlayerRecord::register(profile);
        ledger.insert(profile.id, record.clone());
        self.write_ledger(&ledger).await?;
        Ok(record)
    }

    pub async fn get(&self, player: PlayerId) -> Result<Option<PlayerRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_ledger().await?.remove(&player))
    }

    async fn load(&self, player: PlayerId) -> Result<StoredState, StoreError> {
        let _guard = self.lock.lock().await;
        let ledger = self.read_ledger().await?;
        ledger
            .get(&player)
            .map(PlayerRecord::stored_state)
            .ok_or(StoreError::UnknownPlayer(player))
    }

    async fn save(&self, player: PlayerId, score: u32) -> Result<SaveReceipt, StoreError> {
        let _guard = self.lock.lock().await;
        let mut ledger = self.read_ledger().await?;
        let record = ledger
            .get_mut(&player)
            .ok_or(StoreError::UnknownPlayer(player))?;
        let receipt = record.apply_save(score)?;
        self.write_ledger(&ledger).await?;
        Ok(receipt)
    }
}

#[async_trait]
impl PersistenceGateway for JsonFileStore {
    async fn load_state(&self, player: PlayerId) -> Result<StoredState, GatewayError> {
        Ok(self.load(player).await?)
    }

    async fn save_state(
        &self,
        player: PlayerId,
        final_score: u32,
    ) -> Result<SaveReceipt, GatewayError> {
        Ok(self.save(player, final_score).await?)
    }
}

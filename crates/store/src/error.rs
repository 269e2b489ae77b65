use crate::engine::GatewayError;
use crate::types::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("player {0} not found")]
    UnknownPlayer(PlayerId),
    #[error("score {0} is out of range")]
    InvalidScore(u32),
    #[error("state file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for GatewayError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UnknownPlayer(id) => GatewayError::UnknownPlayer(id),
            StoreError::InvalidScore(score) => GatewayError::InvalidScore(score),
            other => GatewayError::Unavailable(other.to_string()),
        }
    }
}

use crate::gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The identity source never produced a player id; nothing was initialized
    #[error("player identity is not available")]
    MissingIdentity,
    #[error("no commit is due")]
    NothingToCommit,
    #[error(transparent)]
    Persistence(#[from] GatewayError),
}

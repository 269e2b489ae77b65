//! Player identity sources
//!
//! The hosting chat platform authenticates the player; the engine only needs
//! the resulting numeric id. No session operation happens until it resolves.

use crate::types::PlayerId;

/// Default environment variable read by [`EnvIdentity`]
pub const PLAYER_ID_VAR: &str = "FLX_PLAYER_ID";

pub trait IdentityProvider {
    fn resolve(&self) -> Option<PlayerId>;
}

/// A fixed identity, or none at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticIdentity(pub Option<PlayerId>);

impl IdentityProvider for StaticIdentity {
    fn resolve(&self) -> Option<PlayerId> {
        self.0
    }
}

/// Reads the player id from an environment variable. Zero and unparseable
/// values count as missing.
#[derive(Debug, Clone)]
pub struct EnvIdentity {
    var: String,
}

impl EnvIdentity {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvIdentity {
    fn default() -> Self {
        Self::new(PLAYER_ID_VAR)
    }
}

impl IdentityProvider for EnvIdentity {
    fn resolve(&self) -> Option<PlayerId> {
        parse_player_id(&std::env::var(&self.var).ok()?)
    }
}

impl<F> IdentityProvider for F
where
    F: Fn() -> Option<PlayerId>,
{
    fn resolve(&self) -> Option<PlayerId> {
        self()
    }
}

fn parse_player_id(raw: &str) -> Option<PlayerId> {
    match raw.trim().parse::<PlayerId>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(id),
    }
}

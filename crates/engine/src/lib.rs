//! Engine runtime - binds the board engine to its collaborators
//!
//! The core crate knows nothing about players or servers. This crate adds:
//!
//! - [`IdentityProvider`]: where the player id comes from (injected, never global)
//! - [`PersistenceGateway`]: async load/save of score and FLX points
//! - [`Engine`]: owns a [`GameState`](flx_match_core::GameState), paces cascade
//!   passes with a settle latency, commits when the move budget runs out and
//!   streams [`EngineEvent`]s to a subscriber
//!
//! # Failure policy
//!
//! Local state is the fallback of record. A failed load keeps defaults, a
//! failed save keeps score and moves until [`Engine::retry_commit`] succeeds.
//! A score the server refuses outright discards the session and refills
//! moves. All of these are logged with `tracing` and never surface to the
//! caller of [`Engine::select`]. A missing identity is the only error that
//! stops an engine from being created.
//!
//! Every successful commit closes the session: the next one starts from a
//! zero score, so each save submits only that session's points.
//!
//! # Example
//!
//! ```no_run
//! use flx_match_engine::{Engine, EngineConfig, StaticIdentity};
//! # async fn demo(gateway: impl flx_match_engine::PersistenceGateway) -> Result<(), flx_match_engine::EngineError> {
//! let mut engine = Engine::start(&StaticIdentity(Some(42)), gateway, EngineConfig::headless()).await?;
//! if let Some((a, b)) = engine.state().hint() {
//!     engine.select(a).await;
//!     engine.select(b).await;
//! }
//! let final_view = engine.shutdown().await;
//! println!("score {}", final_view.score);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod gateway;
pub mod identity;

pub use flx_match_core as core;
pub use flx_match_types as types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use event::EngineEvent;
pub use gateway::{GatewayError, PersistenceGateway, SaveReceipt, StoredState};
pub use identity::{EnvIdentity, IdentityProvider, StaticIdentity, PLAYER_ID_VAR};

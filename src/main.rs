//! Headless FLX Match runner (default binary).
//!
//! Plays sessions automatically against a persistence gateway: every move is
//! the first legal swap the prober finds, falling back to a wasted swap on a
//! dead board. Useful for smoke-testing stores and the commit cycle.
//!
//! Environment:
//! - `FLX_PLAYER_ID`: player id (required)
//! - `FLX_STATE_FILE`: JSON ledger path; unset uses an in-memory store
//! - `FLX_ROUNDS`: sessions to play, i.e. commits to attempt (default 1)
//! - `FLX_MOVE_BUDGET`, `FLX_SETTLE_MS`, `FLX_SEED`: see `EngineConfig::from_env`
//! - `RUST_LOG`: tracing filter

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flx_match::core::{ColorSource, Phase, SelectOutcome};
use flx_match::engine::{
    Engine, EngineConfig, EngineEvent, EnvIdentity, IdentityProvider, PersistenceGateway,
};
use flx_match::store::{JsonFileStore, MemoryStore, PlayerProfile};

#[derive(Debug, Clone)]
struct RunnerConfig {
    state_file: Option<PathBuf>,
    rounds: u32,
}

impl RunnerConfig {
    fn from_env() -> Self {
        use std::env;

        let state_file = env::var("FLX_STATE_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let rounds = env::var("FLX_ROUNDS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1);

        Self { state_file, rounds }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flx_match=info,flx_match_engine=info".into()),
        )
        .init();

    let runner = RunnerConfig::from_env();
    let config = EngineConfig::from_env();
    let identity = EnvIdentity::default();
    let player = identity
        .resolve()
        .context("FLX_PLAYER_ID must be set to a non-zero player id")?;
    let profile = PlayerProfile::new(player);

    match &runner.state_file {
        Some(path) => {
            let store = JsonFileStore::new(path);
            store
                .register(&profile)
                .await
                .with_context(|| format!("registering player in {}", path.display()))?;
            info!(path = %path.display(), "using JSON state file");
            run(&identity, store, config, runner.rounds).await
        }
        None => {
            let store = MemoryStore::new();
            store.register(&profile).await;
            info!("using in-memory store");
            run(&identity, store, config, runner.rounds).await
        }
    }
}

async fn run<G: PersistenceGateway>(
    identity: &EnvIdentity,
    gateway: G,
    config: EngineConfig,
    rounds: u32,
) -> Result<()> {
    let mut engine = Engine::start(identity, gateway, config).await?;
    let mut events = engine.subscribe();

    for round in 1..=rounds {
        let moves = play_session(&mut engine).await;
        let mut committed = None;
        while let Ok(event) = events.try_recv() {
            match event {
                EngineEvent::Committed { score, .. } => committed = Some(score),
                EngineEvent::CommitRejected { score } => {
                    warn!(round, score, "score refused, session discarded")
                }
                _ => {}
            }
        }
        if engine.state().moves_remaining() == 0 {
            warn!(round, "session could not be committed, stopping");
            break;
        }
        info!(
            round,
            moves,
            score = committed.unwrap_or_default(),
            flx_points = engine.state().flx_points(),
            "round finished"
        );
    }

    let last = engine.shutdown().await;
    info!(
        score = last.score,
        flx_points = last.flx_points,
        moves_remaining = last.moves_remaining,
        "done"
    );
    Ok(())
}

/// Spend the whole move budget. Returns the number of swaps made.
async fn play_session<G: PersistenceGateway, R: ColorSource>(engine: &mut Engine<G, R>) -> u32 {
    let mut swaps = 0u32;
    let budget = engine.state().moves_remaining();

    while swaps < budget {
        if engine.state().phase() != Phase::Idle {
            break;
        }
        // Dead boards are never reshuffled; burn a move on the first pair instead.
        let (a, b) = engine.state().hint().unwrap_or((0, 1));
        engine.select(a).await;
        match engine.select(b).await {
            SelectOutcome::SwapStarted { .. } => swaps += 1,
            other => {
                warn!(?other, a, b, "swap did not start");
                break;
            }
        }
    }
    swaps
}

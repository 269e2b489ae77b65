//! Engine runtime - drives a [`GameState`] against an identity and a gateway
//!
//! All board mutation happens on the task that owns the engine. Each call
//! borrows the engine mutably for the whole swap, cascade and commit sequence,
//! so input cannot overlap a resolution or an in-flight save.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::{
    ColorSource, CommitReceipt, GameSnapshot, GameState, SelectOutcome, SimpleRng, StepOutcome,
};
use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::gateway::{GatewayError, PersistenceGateway};
use crate::identity::IdentityProvider;
use crate::types::PlayerId;

pub struct Engine<G, R = SimpleRng> {
    player: PlayerId,
    gateway: G,
    state: GameState<R>,
    config: EngineConfig,
    loaded: bool,
    events: Option<mpsc::UnboundedSender<EngineEvent>>,
}

impl<G: PersistenceGateway> Engine<G, SimpleRng> {
    /// Resolve the player and generate a board. Does not touch the gateway.
    pub fn new<I: IdentityProvider + ?Sized>(
        identity: &I,
        gateway: G,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let player = identity.resolve().ok_or(EngineError::MissingIdentity)?;
        let seed = config.resolved_seed();
        let state = GameState::with_source(SimpleRng::new(seed), config.move_budget);
        debug!(
            player,
            seed,
            attempts = state.generation_attempts(),
            "board generated"
        );
        Ok(Self::assemble(player, gateway, state, config))
    }

    /// [`Engine::new`] followed by [`Engine::load`]
    pub async fn start<I: IdentityProvider + ?Sized>(
        identity: &I,
        gateway: G,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::new(identity, gateway, config)?;
        engine.load().await;
        Ok(engine)
    }
}

impl<G: PersistenceGateway, R: ColorSource> Engine<G, R> {
    /// Use an existing game state instead of generating one
    pub fn with_state<I: IdentityProvider + ?Sized>(
        identity: &I,
        gateway: G,
        state: GameState<R>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let player = identity.resolve().ok_or(EngineError::MissingIdentity)?;
        Ok(Self::assemble(player, gateway, state, config))
    }

    fn assemble(player: PlayerId, gateway: G, state: GameState<R>, config: EngineConfig) -> Self {
        Self {
            player,
            gateway,
            state,
            config,
            loaded: false,
            events: None,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Route events to a new receiver. A previous receiver stops getting events.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<EngineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    fn emit(&self, event: EngineEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    fn emit_board(&self) {
        self.emit(EngineEvent::Board(self.state.snapshot()));
    }

    /// Hydrate from the gateway, once per engine. Failures keep local defaults.
    pub async fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        match self.gateway.load_state(self.player).await {
            Ok(stored) => {
                if !self.state.hydrate(stored.into()) {
                    warn!(
                        player = self.player,
                        current_moves = stored.current_moves,
                        "stored move count out of range, using full budget"
                    );
                }
                info!(
                    player = self.player,
                    score = self.state.score(),
                    flx_points = self.state.flx_points(),
                    moves = self.state.moves_remaining(),
                    "session loaded"
                );
                self.emit(EngineEvent::Hydrated {
                    score: self.state.score(),
                    flx_points: self.state.flx_points(),
                    moves_remaining: self.state.moves_remaining(),
                });
            }
            Err(err) => {
                warn!(player = self.player, error = %err, "loading game state failed");
                self.emit(EngineEvent::LoadFailed {
                    reason: err.to_string(),
                });
            }
        }
        self.emit_board();
    }

    /// Handle a tap on `index`. A completed swap is resolved, and committed
    /// when it spent the last move, before this returns.
    pub async fn select(&mut self, index: usize) -> SelectOutcome {
        let outcome = self.state.select(index);
        match outcome {
            SelectOutcome::Selected { index } => {
                self.emit(EngineEvent::Selected { index });
            }
            SelectOutcome::SelectionCleared { first, second } => {
                debug!(first, second, "cells not adjacent, selection cleared");
                self.emit(EngineEvent::SelectionCleared { first, second });
            }
            SelectOutcome::SwapStarted {
                a,
                b,
                moves_remaining,
            } => {
                self.emit(EngineEvent::Swapped {
                    a,
                    b,
                    moves_remaining,
                });
                self.emit_board();
                self.run_resolution().await;
                if self.state.commit_due() {
                    // Failures are logged inside; local play state is kept.
                    let _ = self.commit().await;
                }
            }
            SelectOutcome::Rejected(reason) => {
                debug!(index, ?reason, "selection rejected");
            }
        }
        outcome
    }

    async fn run_resolution(&mut self) {
        loop {
            self.settle_pause().await;
            match self.state.step() {
                StepOutcome::Cleared(pass) => {
                    debug!(
                        pass = pass.pass,
                        cells = pass.matched.len(),
                        points = pass.points,
                        "cleared"
                    );
                    self.emit(EngineEvent::Cleared {
                        pass,
                        score: self.state.score(),
                    });
                    self.emit_board();
                }
                StepOutcome::Reverted { a, b } => {
                    self.emit(EngineEvent::Reverted { a, b });
                    self.emit_board();
                    break;
                }
                StepOutcome::Settled { passes } => {
                    self.emit(EngineEvent::Settled {
                        passes,
                        score: self.state.score(),
                    });
                    break;
                }
                StepOutcome::Idle => break,
            }
        }
    }

    async fn settle_pause(&self) {
        if !self.config.settle_latency.is_zero() {
            tokio::time::sleep(self.config.settle_latency).await;
        }
    }

    /// Re-attempt a commit after a failed automatic one (moves at zero)
    pub async fn retry_commit(&mut self) -> Result<CommitReceipt, EngineError> {
        self.commit().await
    }

    async fn commit(&mut self) -> Result<CommitReceipt, EngineError> {
        let score = self
            .state
            .begin_commit()
            .ok_or(EngineError::NothingToCommit)?;
        info!(player = self.player, score, "committing session");

        match self.gateway.save_state(self.player, score).await {
            Ok(receipt) => {
                let receipt: CommitReceipt = receipt.into();
                self.state.finish_commit(receipt);
                info!(
                    player = self.player,
                    score = receipt.score,
                    flx_points = receipt.flx_points,
                    "session committed"
                );
                self.emit(EngineEvent::Committed {
                    score: receipt.score,
                    flx_points: receipt.flx_points,
                });
                self.emit_board();
                Ok(receipt)
            }
            Err(err @ GatewayError::InvalidScore(_)) => {
                // Refusals are permanent; drop the session so play continues
                self.state.reject_commit();
                warn!(
                    player = self.player,
                    score,
                    error = %err,
                    "score refused by server, session discarded"
                );
                self.emit(EngineEvent::CommitRejected { score });
                self.emit_board();
                Err(err.into())
            }
            Err(err) => {
                self.state.abort_commit();
                warn!(
                    player = self.player,
                    score,
                    error = %err,
                    "saving progress failed, keeping local state"
                );
                self.emit(EngineEvent::CommitFailed {
                    reason: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Advance presentation timers
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.state.tick(elapsed_ms);
    }

    /// Teardown: best-effort save when points were scored since the last load
    /// or commit, then the final snapshot
    pub async fn shutdown(mut self) -> GameSnapshot {
        let score = self.state.score();
        let unsaved = self.state.session().unsaved_points();
        if unsaved > 0 && !self.state.is_processing() {
            match self.gateway.save_state(self.player, score).await {
                Ok(receipt) => {
                    self.state.finish_commit(receipt.into());
                    info!(player = self.player, score, unsaved, "progress saved on shutdown");
                }
                Err(err) => {
                    warn!(player = self.player, score, error = %err, "save on shutdown failed");
                }
            }
        }
        self.state.snapshot()
    }
}

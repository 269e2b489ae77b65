//! Engine tests - identity, loading, events and the commit cycle against a
//! recording gateway

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use flx_match::core::{Board, GameState, Phase, Rejection, ScriptedColors, SelectOutcome};
use flx_match::engine::{
    Engine, EngineConfig, EngineError, EngineEvent, GatewayError, PersistenceGateway, SaveReceipt,
    StaticIdentity, StoredState,
};
use flx_match::store::{MemoryStore, PlayerProfile};
use flx_match::types::{PlayerId, MOVE_BUDGET};

const ROW_SWAP: &str = "
    RRBYPORB
    GYRORBGY
    PORBGYPO
    RBGYPORB
    GYPORBGY
    PORBGYPO
    RBGYPORB
    GYPORBGY
";

#[derive(Debug, Default)]
struct Recorded {
    loads: Vec<PlayerId>,
    saves: Vec<(PlayerId, u32)>,
    flx_points: u64,
}

/// Mirrors the server rules: FLX accumulates `score / 10`
#[derive(Debug, Clone, Default)]
struct RecordingGateway {
    stored: StoredState,
    fail_load: bool,
    fail_save: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Recorded>>,
}

impl RecordingGateway {
    fn with_moves(current_moves: i64) -> Self {
        Self {
            stored: StoredState {
                score: 0,
                flx_points: 0,
                current_moves,
            },
            ..Self::default()
        }
    }

    fn set_fail_save(&self, fail: bool) {
        *self.fail_save.lock().unwrap() = fail;
    }

    fn saves(&self) -> Vec<(PlayerId, u32)> {
        self.calls.lock().unwrap().saves.clone()
    }

    fn loads(&self) -> Vec<PlayerId> {
        self.calls.lock().unwrap().loads.clone()
    }
}

#[async_trait]
impl PersistenceGateway for RecordingGateway {
    async fn load_state(&self, player: PlayerId) -> Result<StoredState, GatewayError> {
        self.calls.lock().unwrap().loads.push(player);
        if self.fail_load {
            return Err(GatewayError::Unavailable("connection refused".into()));
        }
        Ok(self.stored)
    }

    async fn save_state(
        &self,
        player: PlayerId,
        final_score: u32,
    ) -> Result<SaveReceipt, GatewayError> {
        let mut calls = self.calls.lock().unwrap();
        calls.saves.push((player, final_score));
        if *self.fail_save.lock().unwrap() {
            return Err(GatewayError::Unavailable("timeout".into()));
        }
        calls.flx_points += u64::from(final_score / 10);
        Ok(SaveReceipt {
            new_score: final_score,
            new_flx_points: calls.flx_points,
        })
    }
}

fn scripted(refills: &str, budget: u32) -> GameState<ScriptedColors> {
    GameState::from_board(
        Board::parse(ROW_SWAP).unwrap(),
        ScriptedColors::from_letters(refills),
        budget,
    )
}

async fn engine_with(
    gateway: RecordingGateway,
    budget: u32,
) -> Engine<RecordingGateway, ScriptedColors> {
    let mut engine = Engine::with_state(
        &StaticIdentity(Some(42)),
        gateway,
        scripted("YPG", budget),
        EngineConfig::headless(),
    )
    .unwrap();
    engine.load().await;
    engine
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_missing_identity_initializes_nothing() {
    let gateway = RecordingGateway::default();
    let result = Engine::new(&StaticIdentity(None), gateway.clone(), EngineConfig::headless());
    assert!(matches!(result, Err(EngineError::MissingIdentity)));

    let nobody = || -> Option<PlayerId> { None };
    let result = Engine::start(&nobody, gateway.clone(), EngineConfig::headless()).await;
    assert!(matches!(result, Err(EngineError::MissingIdentity)));
    assert!(gateway.loads().is_empty());
}

#[tokio::test]
async fn test_start_loads_once() {
    let gateway = RecordingGateway {
        stored: StoredState {
            score: 1200,
            flx_points: 340,
            current_moves: 7,
        },
        ..RecordingGateway::default()
    };
    let identity = || -> Option<PlayerId> { Some(42) };
    let mut engine = Engine::start(&identity, gateway.clone(), EngineConfig::headless())
        .await
        .unwrap();

    assert_eq!(engine.player(), 42);
    assert_eq!(engine.state().score(), 1200);
    assert_eq!(engine.state().flx_points(), 340);
    assert_eq!(engine.state().moves_remaining(), 7);

    engine.load().await;
    assert_eq!(gateway.loads(), vec![42]);
}

#[tokio::test]
async fn test_failed_load_keeps_defaults() {
    let gateway = RecordingGateway {
        fail_load: true,
        ..RecordingGateway::with_moves(5)
    };
    let mut engine = Engine::with_state(
        &StaticIdentity(Some(42)),
        gateway,
        scripted("YPG", MOVE_BUDGET),
        EngineConfig::headless(),
    )
    .unwrap();
    let mut rx = engine.subscribe();
    engine.load().await;

    assert_eq!(engine.state().score(), 0);
    assert_eq!(engine.state().moves_remaining(), MOVE_BUDGET);
    let events = drain(&mut rx);
    assert!(matches!(events[0], EngineEvent::LoadFailed { .. }));
    assert!(matches!(events[1], EngineEvent::Board(_)));

    // Play continues normally
    engine.select(2).await;
    engine.select(10).await;
    assert_eq!(engine.state().score(), 150);
}

#[tokio::test]
async fn test_events_follow_the_swap() {
    let gateway = RecordingGateway::with_moves(MOVE_BUDGET as i64);
    let mut engine = engine_with(gateway, MOVE_BUDGET).await;
    let mut rx = engine.subscribe();

    engine.select(2).await;
    engine.select(10).await;

    let events = drain(&mut rx);
    assert_eq!(events[0], EngineEvent::Selected { index: 2 });
    assert_eq!(
        events[1],
        EngineEvent::Swapped {
            a: 2,
            b: 10,
            moves_remaining: MOVE_BUDGET - 1
        }
    );
    assert!(matches!(events[2], EngineEvent::Board(_)));
    match &events[3] {
        EngineEvent::Cleared { pass, score } => {
            assert_eq!(pass.pass, 1);
            assert_eq!(pass.matched.len(), 3);
            assert_eq!(*score, 150);
        }
        other => panic!("expected Cleared, got {:?}", other),
    }
    assert!(matches!(events[4], EngineEvent::Board(_)));
    assert_eq!(
        events[5],
        EngineEvent::Settled {
            passes: 1,
            score: 150
        }
    );
    assert_eq!(events.len(), 6);
}

#[tokio::test]
async fn test_last_move_commits_once_and_refills() {
    let gateway = RecordingGateway::with_moves(1);
    let mut engine = engine_with(gateway.clone(), MOVE_BUDGET).await;
    assert_eq!(engine.state().moves_remaining(), 1);

    engine.select(2).await;
    let outcome = engine.select(10).await;
    assert!(matches!(
        outcome,
        SelectOutcome::SwapStarted {
            moves_remaining: 0,
            ..
        }
    ));

    // The final swap's points are included in the saved score
    assert_eq!(gateway.saves(), vec![(42, 150)]);
    assert_eq!(engine.state().moves_remaining(), MOVE_BUDGET);
    // The next session starts from zero
    assert_eq!(engine.state().score(), 0);
    assert_eq!(engine.state().flx_points(), 15);
    assert_eq!(engine.state().phase(), Phase::Idle);
}

#[tokio::test]
async fn test_failed_save_keeps_local_state() {
    let gateway = RecordingGateway::with_moves(1);
    gateway.set_fail_save(true);
    let mut engine = engine_with(gateway.clone(), MOVE_BUDGET).await;
    let mut rx = engine.subscribe();

    engine.select(2).await;
    engine.select(10).await;

    assert_eq!(gateway.saves().len(), 1);
    assert_eq!(engine.state().moves_remaining(), 0);
    assert_eq!(engine.state().score(), 150);
    assert_eq!(engine.state().flx_points(), 0);
    assert!(drain(&mut rx)
        .iter()
        .any(|e| matches!(e, EngineEvent::CommitFailed { .. })));

    // No further moves until a commit succeeds
    assert_eq!(
        engine.select(0).await,
        SelectOutcome::Rejected(Rejection::NoMovesLeft)
    );
    assert!(matches!(
        engine.retry_commit().await,
        Err(EngineError::Persistence(GatewayError::Unavailable(_)))
    ));

    gateway.set_fail_save(false);
    let receipt = engine.retry_commit().await.unwrap();
    assert_eq!(receipt.score, 150);
    assert_eq!(receipt.flx_points, 15);
    assert_eq!(engine.state().moves_remaining(), MOVE_BUDGET);
    assert_eq!(gateway.saves().len(), 3);
}

#[tokio::test]
async fn test_retry_without_pending_commit() {
    let mut engine = engine_with(RecordingGateway::with_moves(10), MOVE_BUDGET).await;
    assert!(matches!(
        engine.retry_commit().await,
        Err(EngineError::NothingToCommit)
    ));
}

#[tokio::test]
async fn test_shutdown_saves_unsaved_points_only() {
    let gateway = RecordingGateway::with_moves(10);
    let mut engine = engine_with(gateway.clone(), MOVE_BUDGET).await;
    engine.select(2).await;
    engine.select(10).await;

    let last = engine.shutdown().await;
    assert_eq!(gateway.saves(), vec![(42, 150)]);
    assert_eq!(last.score, 0);
    assert_eq!(last.flx_points, 15);

    // Nothing played
    let idle = RecordingGateway::with_moves(10);
    let engine = engine_with(idle.clone(), MOVE_BUDGET).await;
    engine.shutdown().await;
    assert!(idle.saves().is_empty());

    // A loaded score alone was already paid for
    let loaded = RecordingGateway {
        stored: StoredState {
            score: 500,
            flx_points: 50,
            current_moves: 10,
        },
        ..RecordingGateway::default()
    };
    let engine = engine_with(loaded.clone(), MOVE_BUDGET).await;
    assert_eq!(engine.state().score(), 500);
    engine.shutdown().await;
    assert!(loaded.saves().is_empty());
}

#[tokio::test]
async fn test_shutdown_after_commit_does_not_resubmit() {
    let gateway = RecordingGateway::with_moves(1);
    let mut engine = engine_with(gateway.clone(), MOVE_BUDGET).await;
    engine.select(2).await;
    engine.select(10).await;
    assert_eq!(gateway.saves(), vec![(42, 150)]);

    let last = engine.shutdown().await;
    assert_eq!(gateway.saves(), vec![(42, 150)]);
    assert_eq!(last.flx_points, 15);
}

#[tokio::test]
async fn test_consecutive_sessions_all_commit() {
    const BUDGET: u32 = 10;
    const SESSIONS: u32 = 4;

    let store = Arc::new(MemoryStore::new());
    store.register(&PlayerProfile::new(42)).await;
    let config = EngineConfig {
        move_budget: BUDGET,
        seed: Some(5),
        ..EngineConfig::headless()
    };
    let mut engine = Engine::start(&StaticIdentity(Some(42)), Arc::clone(&store), config)
        .await
        .unwrap();
    let mut rx = engine.subscribe();
    let mut expected_flx = 0u64;

    for session in 1..=SESSIONS {
        for _ in 0..BUDGET {
            let (a, b) = engine.state().hint().unwrap_or((0, 1));
            engine.select(a).await;
            assert!(matches!(
                engine.select(b).await,
                SelectOutcome::SwapStarted { .. }
            ));
        }

        let committed: Vec<(u32, u64)> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::Committed { score, flx_points } => Some((score, flx_points)),
                EngineEvent::CommitFailed { reason } => {
                    panic!("session {} failed to commit: {}", session, reason)
                }
                EngineEvent::CommitRejected { score } => {
                    panic!("session {} score {} refused", session, score)
                }
                _ => None,
            })
            .collect();
        assert_eq!(committed.len(), 1, "session {}", session);
        let (score, flx_points) = committed[0];
        expected_flx += u64::from(score / 10);

        // Each save carries only that session's points
        assert!(score <= 10_000);
        assert_eq!(flx_points, expected_flx);
        assert_eq!(engine.state().score(), 0);
        assert_eq!(engine.state().flx_points(), expected_flx);
        assert_eq!(engine.state().moves_remaining(), BUDGET);

        let record = store.get(42).await.unwrap();
        assert_eq!(record.points, score);
        assert_eq!(record.flx_points, expected_flx);
        assert_eq!(record.current_moves, MOVE_BUDGET as i64 - session as i64);
    }
}

#[tokio::test]
async fn test_refused_score_discards_session() {
    let store = Arc::new(MemoryStore::new());
    store.register(&PlayerProfile::new(42)).await;
    store.save_state(42, 9_950).await.unwrap();

    let mut engine = Engine::with_state(
        &StaticIdentity(Some(42)),
        Arc::clone(&store),
        scripted("YPG", 1),
        EngineConfig::headless(),
    )
    .unwrap();
    engine.load().await;
    assert_eq!(engine.state().score(), 9_950);
    let mut rx = engine.subscribe();

    // 9 950 + 150 is over the server ceiling
    engine.select(2).await;
    engine.select(10).await;

    let events = drain(&mut rx);
    assert!(events.contains(&EngineEvent::CommitRejected { score: 10_100 }));
    assert_eq!(engine.state().score(), 0);
    assert_eq!(engine.state().moves_remaining(), 1);
    assert_eq!(engine.state().phase(), Phase::Idle);

    let record = store.get(42).await.unwrap();
    assert_eq!(record.points, 9_950);
    assert_eq!(record.flx_points, 995);

    // Play continues instead of locking at zero moves
    assert_eq!(
        engine.select(0).await,
        SelectOutcome::Selected { index: 0 }
    );
    assert!(matches!(
        engine.retry_commit().await,
        Err(EngineError::NothingToCommit)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_settle_latency_paces_passes() {
    let config = EngineConfig {
        settle_latency: std::time::Duration::from_millis(300),
        ..EngineConfig::headless()
    };
    let mut engine = Engine::with_state(
        &StaticIdentity(Some(1)),
        RecordingGateway::with_moves(10),
        scripted("YPG", MOVE_BUDGET),
        config,
    )
    .unwrap();

    let started = tokio::time::Instant::now();
    engine.select(2).await;
    engine.select(10).await;
    // One pause before the clearing pass and one before the settling scan
    assert!(started.elapsed() >= std::time::Duration::from_millis(600));
    assert_eq!(engine.state().score(), 150);
}

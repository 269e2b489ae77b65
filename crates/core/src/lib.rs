//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 board rules, session bookkeeping and the
//! swap/cascade state machine. It has **zero dependencies** on rendering,
//! networking or persistence, making it:
//!
//! - **Deterministic**: the same seed produces identical boards and refills
//! - **Testable**: crafted boards and scripted refills reproduce any cascade
//! - **Portable**: runs under an async runtime, a UI loop or headless
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 grid storage and the swap adjacency rule
//! - [`matches`]: match detection into a [`MatchSet`]
//! - [`generator`]: rejection-sampled boards and the legal-move prober
//! - [`game_state`]: selection, swap, cascade and commit phases
//! - [`session`]: score, FLX mirror and move budget
//! - [`rng`]: seeded LCG and scripted color sources
//! - [`scoring`]: match points and FLX conversion
//! - [`popups`]: bounded, self-expiring score popups
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Game Rules
//!
//! - A fresh board never contains a run of three and always has a legal move
//! - Only orthogonally adjacent cells swap; every swap costs one move, match or not
//! - A swap without a match is undone
//! - Each cleared cell scores 50; cleared cells are refilled at random and the
//!   board is rescanned until no run remains
//! - When the last move is spent the session must be committed
//!
//! # Example
//!
//! ```
//! use flx_match_core::GameState;
//!
//! let mut game = GameState::new(12345);
//! let (a, b) = game.hint().expect("fresh boards always have a move");
//!
//! let report = game.try_swap(a, b).unwrap();
//! assert!(!report.reverted);
//! assert!(game.score() >= 150);
//! assert_eq!(game.moves_remaining(), 29);
//! ```

pub mod board;
pub mod game_state;
pub mod generator;
pub mod matches;
pub mod popups;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use flx_match_types as types;

// Re-export commonly used types for convenience
pub use board::{is_valid_swap, Board};
pub use game_state::{
    GameState, PassReport, Phase, Rejection, ResolveReport, SelectOutcome, StepOutcome,
};
pub use generator::{
    find_possible_move, generate_board, has_possible_moves, would_match, GeneratedBoard,
};
pub use matches::{find_matches, MatchSet};
pub use popups::{PopupQueue, ScorePopup};
pub use rng::{ColorSource, ScriptedColors, SimpleRng};
pub use scoring::{calculate_flx_award, calculate_match_score, is_submittable_score};
pub use session::{CommitReceipt, Session, StoredSession};
pub use snapshot::GameSnapshot;

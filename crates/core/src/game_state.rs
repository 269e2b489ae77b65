//! Game state module - the swap / cascade state machine
//!
//! This module ties together the board, the color source, match detection,
//! scoring and session bookkeeping.
//!
//! Phases:
//!
//! ```text
//! Idle --select--> AwaitingSecond --adjacent--> Resolving --settle--> Idle
//!                        |                          |
//!                   not adjacent              moves hit 0
//!                        v                          v
//!                       Idle                  CommitPending --begin_commit--> Committing
//! ```
//!
//! Resolution runs as discrete [`GameState::step`] calls so a driver can pause
//! between passes; [`GameState::resolve`] runs them back to back.

use crate::board::{is_valid_swap, Board};
use crate::generator::{find_possible_move, generate_board};
use crate::matches::{find_matches, MatchSet};
use crate::popups::PopupQueue;
use crate::rng::{ColorSource, SimpleRng};
use crate::scoring::calculate_match_score;
use crate::session::{CommitReceipt, Session, StoredSession};
use crate::snapshot::GameSnapshot;
use crate::types::{CELL_COUNT, GRID_WIDTH, MOVE_BUDGET};

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first selection
    Idle,
    /// One cell selected, waiting for its swap partner
    AwaitingSecond { first: usize },
    /// A swap is applied and being scanned; `pass` counts cleared passes so far
    Resolving { a: usize, b: usize, pass: u32 },
    /// Moves ran out; the session must be committed before play continues
    CommitPending,
    /// A save is in flight
    Committing,
}

/// Why a selection was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A swap is resolving or a save is in flight
    Busy,
    CommitPending,
    NoMovesLeft,
    OutOfBounds,
}

/// Result of [`GameState::select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected { index: usize },
    /// The second cell was not adjacent; the selection was dropped and no move spent
    SelectionCleared { first: usize, second: usize },
    SwapStarted {
        a: usize,
        b: usize,
        moves_remaining: u32,
    },
    Rejected(Rejection),
}

/// One cleared pass of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// 1-based pass number (1 = the swap itself, 2+ = cascades)
    pub pass: u32,
    pub matched: MatchSet,
    pub points: u32,
}

/// Result of [`GameState::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing is resolving
    Idle,
    /// The swap made no match and was undone
    Reverted { a: usize, b: usize },
    Cleared(PassReport),
    /// The board is quiescent after `passes` cleared passes
    Settled { passes: u32 },
}

/// Full record of one swap and its cascades
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReport {
    pub swap: (usize, usize),
    pub passes: Vec<PassReport>,
    pub reverted: bool,
}

impl ResolveReport {
    fn new(a: usize, b: usize) -> Self {
        Self {
            swap: (a, b),
            passes: Vec::new(),
            reverted: false,
        }
    }

    pub fn points(&self) -> u32 {
        self.passes.iter().map(|p| p.points).sum()
    }

    pub fn cascades(&self) -> usize {
        self.passes.len().saturating_sub(1)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    session: Session,
    phase: Phase,
    source: R,
    popups: PopupQueue,
    last_resolution: Option<ResolveReport>,
    /// Boards drawn before the current one was accepted
    generation_attempts: u32,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed and the default move budget
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed), MOVE_BUDGET)
    }
}

impl<R: ColorSource> GameState<R> {
    /// Generate a playable board from `source`
    pub fn with_source(mut source: R, move_budget: u32) -> Self {
        let generated = generate_board(&mut source);
        let mut state = Self::from_board(generated.board, source, move_budget);
        state.generation_attempts = generated.attempts;
        state
    }

    /// Start from a given board without checking it. `source` is used for refills.
    pub fn from_board(board: Board, source: R, move_budget: u32) -> Self {
        Self {
            board,
            session: Session::new(move_budget),
            phase: Phase::Idle,
            source,
            popups: PopupQueue::new(),
            last_resolution: None,
            generation_attempts: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn flx_points(&self) -> u64 {
        self.session.flx_points()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.session.moves_remaining()
    }

    pub fn move_budget(&self) -> u32 {
        self.session.move_budget()
    }

    pub fn selection(&self) -> Option<usize> {
        match self.phase {
            Phase::AwaitingSecond { first } => Some(first),
            _ => None,
        }
    }

    /// True while a swap resolves or a save is in flight
    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Resolving { .. } | Phase::Committing)
    }

    pub fn commit_due(&self) -> bool {
        self.phase == Phase::CommitPending
    }

    pub fn popups(&self) -> &PopupQueue {
        &self.popups
    }

    pub fn last_resolution(&self) -> Option<&ResolveReport> {
        self.last_resolution.as_ref()
    }

    pub fn generation_attempts(&self) -> u32 {
        self.generation_attempts
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// First swap on the current board that would match, if any
    pub fn hint(&self) -> Option<(usize, usize)> {
        find_possible_move(&self.board)
    }

    /// Handle a cell selection
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        match self.phase {
            Phase::Resolving { .. } | Phase::Committing => {
                return SelectOutcome::Rejected(Rejection::Busy)
            }
            Phase::CommitPending => return SelectOutcome::Rejected(Rejection::CommitPending),
            Phase::Idle | Phase::AwaitingSecond { .. } => {}
        }
        if index >= CELL_COUNT {
            return SelectOutcome::Rejected(Rejection::OutOfBounds);
        }
        if !self.session.has_moves() {
            return SelectOutcome::Rejected(Rejection::NoMovesLeft);
        }

        match self.phase {
            Phase::AwaitingSecond { first } if is_valid_swap(first, index) => {
                self.start_swap(first, index)
            }
            Phase::AwaitingSecond { first } => {
                self.phase = Phase::Idle;
                SelectOutcome::SelectionCleared {
                    first,
                    second: index,
                }
            }
            _ => {
                self.phase = Phase::AwaitingSecond { first: index };
                SelectOutcome::Selected { index }
            }
        }
    }

    fn start_swap(&mut self, a: usize, b: usize) -> SelectOutcome {
        self.session.consume_move();
        self.board.swap(a, b);
        self.phase = Phase::Resolving { a, b, pass: 0 };
        self.last_resolution = Some(ResolveReport::new(a, b));
        SelectOutcome::SwapStarted {
            a,
            b,
            moves_remaining: self.session.moves_remaining(),
        }
    }

    /// Run one scan of the resolving board
    pub fn step(&mut self) -> StepOutcome {
        let Phase::Resolving { a, b, pass } = self.phase else {
            return StepOutcome::Idle;
        };

        let matched = find_matches(&self.board);
        if matched.is_empty() {
            if pass == 0 {
                self.board.swap(a, b);
                if let Some(report) = self.last_resolution.as_mut() {
                    report.reverted = true;
                }
                self.settle();
                return StepOutcome::Reverted { a, b };
            }
            self.settle();
            return StepOutcome::Settled { passes: pass };
        }

        let points = calculate_match_score(&matched);
        self.session.award(points);
        for index in matched.iter() {
            let color = self.source.next_color();
            self.board.set(index, color);
        }
        self.popups.push(points, matched.first().unwrap_or(a));

        let report = PassReport {
            pass: pass + 1,
            matched,
            points,
        };
        if let Some(resolution) = self.last_resolution.as_mut() {
            resolution.passes.push(report);
        }
        self.phase = Phase::Resolving {
            a,
            b,
            pass: pass + 1,
        };
        StepOutcome::Cleared(report)
    }

    fn settle(&mut self) {
        self.phase = if self.session.has_moves() {
            Phase::Idle
        } else {
            Phase::CommitPending
        };
    }

    /// Step until the board settles. Returns the report when a swap was resolving.
    pub fn resolve(&mut self) -> Option<ResolveReport> {
        if !matches!(self.phase, Phase::Resolving { .. }) {
            return None;
        }
        while matches!(self.phase, Phase::Resolving { .. }) {
            self.step();
        }
        self.last_resolution.clone()
    }

    /// Select `a` then `b` and resolve. Returns None when no swap started.
    pub fn try_swap(&mut self, a: usize, b: usize) -> Option<ResolveReport> {
        if self.phase != Phase::Idle {
            return None;
        }
        if !matches!(self.select(a), SelectOutcome::Selected { .. }) {
            return None;
        }
        match self.select(b) {
            SelectOutcome::SwapStarted { .. } => self.resolve(),
            _ => None,
        }
    }

    /// Adopt loaded server values. Returns false when the stored move count was
    /// unusable and the full budget was applied instead.
    pub fn hydrate(&mut self, stored: StoredSession) -> bool {
        self.session.hydrate(stored)
    }

    /// Enter `Committing` and return the score to save.
    ///
    /// Allowed when a commit is pending, or to retry after a failed commit
    /// (moves at zero, nothing resolving).
    pub fn begin_commit(&mut self) -> Option<u32> {
        let ready = match self.phase {
            Phase::CommitPending => true,
            Phase::Idle | Phase::AwaitingSecond { .. } => !self.session.has_moves(),
            Phase::Resolving { .. } | Phase::Committing => false,
        };
        if !ready {
            return None;
        }
        self.phase = Phase::Committing;
        Some(self.session.score())
    }

    /// A save succeeded: adopt the server's FLX balance and start a fresh
    /// session (score zero, full budget) on the same board
    pub fn finish_commit(&mut self, receipt: CommitReceipt) {
        self.session.reconcile(receipt);
        if matches!(self.phase, Phase::Committing | Phase::CommitPending) {
            self.phase = Phase::Idle;
        }
    }

    /// A save failed: keep score and moves, accept selections again (they are
    /// rejected with `NoMovesLeft` until a commit succeeds)
    pub fn abort_commit(&mut self) {
        if self.phase == Phase::Committing {
            self.phase = Phase::Idle;
        }
    }

    /// The server refused the score for good: drop the session's points and
    /// refill moves so play continues
    pub fn reject_commit(&mut self) {
        self.session.reset();
        if matches!(self.phase, Phase::Committing | Phase::CommitPending) {
            self.phase = Phase::Idle;
        }
    }

    /// Advance presentation timers
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.popups.tick(elapsed_ms);
    }

    /// Fresh board and session; the FLX mirror is kept
    pub fn restart(&mut self) {
        let generated = generate_board(&mut self.source);
        self.board = generated.board;
        self.generation_attempts = generated.attempts;
        self.session.reset();
        self.phase = Phase::Idle;
        self.popups.clear();
        self.last_resolution = None;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (idx, cell) in self.board.cells().iter().enumerate() {
            out.cells[idx / GRID_WIDTH][idx % GRID_WIDTH] = cell.index() as u8;
        }
        out.selected = self.selection().map(|i| i as u8);
        out.score = self.session.score();
        out.flx_points = self.session.flx_points();
        out.moves_remaining = self.session.moves_remaining();
        out.move_budget = self.session.move_budget();
        out.processing = self.is_processing();
        out.commit_pending = self.commit_due();
        out.popups = self.popups.len() as u8;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

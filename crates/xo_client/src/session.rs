//! Session state shared between the reconciliation loop and the UI.
//!
//! The state is published as an immutable snapshot behind a single lock.
//! Readers clone the `Arc` and get one consistent view; writers build a whole
//! new [`SessionState`] and swap it in, so a half-updated
//! game/participants/moves tuple is never observable.

use crate::{Game, GameSnapshot, Identity, Move, Outcome, Participant};
use derive_getters::Getters;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument};
use xo_board::{Board, Cell, Mark, WinningLine, may_move, winning_line};

/// Coarse UI/connection phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum Phase {
    /// Initial screen. Only identity loading talks to the network.
    #[default]
    Menu,
    /// Seated (or about to be) in matchmaking, waiting for an opponent.
    WaitingForMatch,
    /// Both participants present.
    Running,
    /// The server closed the game. Left only by an explicit reset.
    Finished,
}

/// Everything the UI knows about the current session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct SessionState {
    /// Local player, once loaded.
    identity: Option<Identity>,
    /// Current game, if any.
    game: Option<Game>,
    /// Participants of the current game.
    participants: Vec<Participant>,
    /// Authoritative move history of the current game.
    moves: Vec<Move>,
    /// Projection of `moves`, plus at most one provisional local mark.
    board: Board,
    /// Whether the local participant may place a mark now.
    local_turn: bool,
    /// Current phase.
    phase: Phase,
    /// Count of foreground writes. Polls started before a foreground write
    /// are discarded instead of published.
    generation: u64,
}

impl SessionState {
    /// Returns the local participant of the current game.
    pub fn local_participant(&self) -> Option<&Participant> {
        let identity = self.identity.as_ref()?;
        self.participants
            .iter()
            .find(|p| p.session_id() == identity.session_id())
    }

    /// Returns the other participant of the current game.
    pub fn opponent(&self) -> Option<&Participant> {
        let identity = self.identity.as_ref()?;
        self.participants
            .iter()
            .find(|p| p.session_id() != identity.session_id())
    }

    /// Mark assigned to the local participant.
    pub fn local_mark(&self) -> Option<Mark> {
        self.local_participant().map(|p| *p.mark())
    }

    /// Outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        let identity = self.identity.as_ref()?;
        Outcome::resolve(self.game.as_ref()?, identity.session_id())
    }

    /// Completed line to highlight on a finished board.
    pub fn winning_line(&self) -> Option<WinningLine> {
        (self.phase == Phase::Finished)
            .then(|| winning_line(&self.board))
            .flatten()
    }

    /// Returns true while identity is still being resolved.
    pub fn is_loading(&self) -> bool {
        self.identity.is_none()
    }

    pub(crate) fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Overwrites the game tuple from an authoritative snapshot and enters
    /// `phase`.
    pub(crate) fn absorb(&mut self, snapshot: GameSnapshot, phase: Phase) {
        self.board = snapshot.board();
        let (game, participants, moves) = snapshot.into_parts();
        self.game = Some(game);
        self.participants = participants;
        self.moves = moves;
        self.enter(phase);
    }

    /// Drops the current game without changing phase.
    pub(crate) fn forget_game(&mut self) {
        self.game = None;
        self.participants.clear();
        self.moves.clear();
        self.board = Board::new();
        self.local_turn = false;
    }

    /// Switches phase and recomputes turn permission from the board.
    pub(crate) fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            info!(from = %self.phase, to = %phase, "Phase transition");
        }
        self.phase = phase;
        self.local_turn = phase == Phase::Running
            && self
                .local_mark()
                .is_some_and(|mark| may_move(&self.board, mark));
    }

    /// Moves from the menu into matchmaking.
    pub(crate) fn start_matchmaking(&mut self) -> bool {
        if self.phase != Phase::Menu || self.identity.is_none() {
            return false;
        }
        self.forget_game();
        self.enter(Phase::WaitingForMatch);
        true
    }

    /// Returns from a finished game to the menu, keeping the identity.
    pub(crate) fn reset_to_menu(&mut self) -> bool {
        if self.phase != Phase::Finished {
            return false;
        }
        self.forget_game();
        self.enter(Phase::Menu);
        true
    }

    /// Places the local mark provisionally if the local player holds the turn
    /// and the cell is empty. Returns what the submission needs.
    pub(crate) fn place_provisional(&mut self, cell: Cell) -> Option<PendingMove> {
        if self.phase != Phase::Running || !self.local_turn {
            return None;
        }
        let mark = self.local_mark()?;
        let game_id = *self.game.as_ref()?.id();
        let session_id = self.identity.as_ref()?.session_id().clone();
        if !self.board.place(cell, mark) {
            return None;
        }
        self.local_turn = false;
        Some(PendingMove {
            session_id,
            game_id,
            cell,
            mark,
        })
    }
}

/// A move placed locally and not yet confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PendingMove {
    /// Session id of the local player.
    session_id: String,
    /// Game the move belongs to.
    game_id: u64,
    /// Claimed cell.
    cell: Cell,
    /// Local mark.
    mark: Mark,
}

/// Handle to the session state shared by the background and foreground tasks.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Arc<SessionState>>>,
}

impl SharedSession {
    /// Creates a session in the menu with no identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<SessionState> {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publishes a state built by the reconciliation loop.
    ///
    /// `read_generation` is the generation of the snapshot the state was
    /// derived from. If the foreground has written since, the state is stale
    /// and is dropped. Returns whether it was published.
    #[instrument(skip(self, next), fields(phase = %next.phase))]
    pub fn publish(&self, read_generation: u64, next: SessionState) -> bool {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if slot.generation != read_generation {
            debug!(
                read_generation,
                current_generation = slot.generation,
                "Discarding stale poll result"
            );
            return false;
        }
        let next = SessionState {
            generation: read_generation,
            ..next
        };
        *slot = Arc::new(next);
        true
    }

    /// Applies a foreground change. If `change` returns `Some`, the modified
    /// state is published with a bumped generation.
    pub fn update<R>(&self, change: impl FnOnce(&mut SessionState) -> Option<R>) -> Option<R> {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = SessionState::clone(&slot);
        let result = change(&mut next)?;
        next.generation = slot.generation + 1;
        *slot = Arc::new(next);
        Some(result)
    }
}

//! Shared fixtures: a scripted transport and entity builders.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use xo_client::{
    Cell, Game, GameSnapshot, GameStatus, GameTransport, Identity, InteractionController, Mark,
    MatchTicket, Move, NotAvailable, Participant, Reconciler, SharedSession,
};

pub const ME: &str = "me";
pub const THEM: &str = "them";
pub const GAME_ID: u64 = 42;

/// A call seen by the scripted transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchIdentity(String),
    FetchActiveGame(String),
    FetchGame(u64),
    Join(String),
    Leave(u64),
    Submit { game_id: u64, cell: Cell, mark: Mark },
}

/// Test side of a paused call: learn when the call is reached, then let it answer.
pub struct Gate {
    pub reached: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

/// Transport side of a paused call.
struct Hold {
    reached: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

fn gate(slot: &Mutex<Option<Hold>>) -> Gate {
    let (reached_tx, reached_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    *slot.lock().unwrap() = Some(Hold {
        reached: reached_tx,
        release: release_rx,
    });
    Gate {
        reached: reached_rx,
        release: release_tx,
    }
}

async fn pause(slot: &Mutex<Option<Hold>>) {
    let hold = slot.lock().unwrap().take();
    if let Some(hold) = hold {
        let _ = hold.reached.send(());
        let _ = hold.release.await;
    }
}

/// Transport answering from per-operation queues.
///
/// An empty queue answers `NotAvailable`.
#[derive(Default)]
pub struct ScriptedTransport {
    identities: Mutex<VecDeque<Result<Identity, NotAvailable>>>,
    active_games: Mutex<VecDeque<Result<Option<GameSnapshot>, NotAvailable>>>,
    games: Mutex<VecDeque<Result<GameSnapshot, NotAvailable>>>,
    joins: Mutex<VecDeque<Result<MatchTicket, NotAvailable>>>,
    leave_ack: Mutex<bool>,
    game_hold: Mutex<Option<Hold>>,
    submit_hold: Mutex<Option<Hold>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_identity(&self, answer: Result<Identity, NotAvailable>) {
        self.identities.lock().unwrap().push_back(answer);
    }

    pub fn push_active_game(&self, answer: Result<Option<GameSnapshot>, NotAvailable>) {
        self.active_games.lock().unwrap().push_back(answer);
    }

    pub fn push_game(&self, answer: Result<GameSnapshot, NotAvailable>) {
        self.games.lock().unwrap().push_back(answer);
    }

    pub fn push_join(&self, answer: Result<MatchTicket, NotAvailable>) {
        self.joins.lock().unwrap().push_back(answer);
    }

    pub fn acknowledge_leave(&self, ack: bool) {
        *self.leave_ack.lock().unwrap() = ack;
    }

    /// Pauses the next `fetch_game` after it is recorded, before it answers.
    pub fn hold_next_game(&self) -> Gate {
        gate(&self.game_hold)
    }

    /// Pauses the next `submit_move` after it is recorded, before it answers.
    pub fn hold_next_submit(&self) -> Gate {
        gate(&self.submit_hold)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, NotAvailable>>>) -> Result<T, NotAvailable> {
        queue.lock().unwrap().pop_front().unwrap_or(Err(NotAvailable))
    }
}

#[async_trait]
impl GameTransport for ScriptedTransport {
    async fn fetch_identity(&self, session_id: &str) -> Result<Identity, NotAvailable> {
        self.record(Call::FetchIdentity(session_id.to_string()));
        Self::next(&self.identities)
    }

    async fn fetch_active_game(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSnapshot>, NotAvailable> {
        self.record(Call::FetchActiveGame(session_id.to_string()));
        Self::next(&self.active_games)
    }

    async fn fetch_game(&self, game_id: u64) -> Result<GameSnapshot, NotAvailable> {
        self.record(Call::FetchGame(game_id));
        pause(&self.game_hold).await;
        Self::next(&self.games)
    }

    async fn join_matchmaking(&self, session_id: &str) -> Result<MatchTicket, NotAvailable> {
        self.record(Call::Join(session_id.to_string()));
        Self::next(&self.joins)
    }

    async fn leave_game(&self, _session_id: &str, game_id: u64) -> bool {
        self.record(Call::Leave(game_id));
        *self.leave_ack.lock().unwrap()
    }

    async fn submit_move(
        &self,
        session_id: &str,
        game_id: u64,
        cell: Cell,
        mark: Mark,
    ) -> Result<Move, NotAvailable> {
        self.record(Call::Submit {
            game_id,
            cell,
            mark,
        });
        pause(&self.submit_hold).await;
        Ok(Move::new(100, game_id, session_id.to_string(), cell, mark, at(10)))
    }
}

pub fn at(offset: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap()
}

pub fn cell(row: u8, col: u8) -> Cell {
    Cell::new(row, col).expect("cell on board")
}

pub fn identity() -> Identity {
    Identity::new(ME.to_string(), 12345, "Me".to_string())
}

pub fn game(status: GameStatus, winner: Option<&str>) -> Game {
    Game::new(GAME_ID, status, at(0), winner.map(str::to_string))
}

pub fn me(mark: Mark) -> Participant {
    Participant::new(ME.to_string(), "Me".to_string(), mark)
}

pub fn them(mark: Mark) -> Participant {
    Participant::new(THEM.to_string(), "Them".to_string(), mark)
}

pub fn mv(id: u64, who: &str, cell: Cell, mark: Mark) -> Move {
    Move::new(id, GAME_ID, who.to_string(), cell, mark, at(id as i64))
}

/// Two seated players, local player holding X.
pub fn snapshot(status: GameStatus, moves: Vec<Move>) -> GameSnapshot {
    GameSnapshot::new(game(status, None), vec![me(Mark::X), them(Mark::O)], moves)
}

pub fn reconciler(transport: &Arc<ScriptedTransport>, session: &SharedSession) -> Reconciler {
    let transport: Arc<dyn GameTransport> = transport.clone();
    Reconciler::new(transport, session.clone(), ME, Duration::from_millis(10))
}

pub fn controller(
    transport: &Arc<ScriptedTransport>,
    session: &SharedSession,
) -> InteractionController {
    let transport: Arc<dyn GameTransport> = transport.clone();
    InteractionController::new(transport, session.clone(), Duration::from_millis(200))
}

//! Client-side projections of the remote entities.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use xo_board::{Board, Cell, Mark};

/// The local player, as known to the server. Never changes after loading.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque session id, also stored in the identity file.
    session_id: String,
    /// Numeric id in the external account system.
    external_id: i64,
    /// Name shown in the window title.
    display_name: String,
}

/// Server-side lifecycle of a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum GameStatus {
    /// Created, no opponent yet.
    New,
    /// Both participants present, moves being played.
    Active,
    /// Over; see the winner.
    Finished,
}

impl TryFrom<u8> for GameStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::New),
            1 => Ok(Self::Active),
            2 => Ok(Self::Finished),
            other => Err(other),
        }
    }
}

impl From<GameStatus> for u8 {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::New => 0,
            GameStatus::Active => 1,
            GameStatus::Finished => 2,
        }
    }
}

/// A match between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct Game {
    /// Server id.
    id: u64,
    /// Lifecycle status.
    status: GameStatus,
    /// When the match was formed.
    created_at: DateTime<Utc>,
    /// Session id of the winner. `None` means draw or still playing.
    winner_id: Option<String>,
}

impl Game {
    /// Returns true once the server has closed the game.
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }
}

/// A player seated in a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct Participant {
    /// Session id of the player.
    session_id: String,
    /// Display name.
    display_name: String,
    /// Mark assigned for this game.
    mark: Mark,
}

/// One placed mark in a game's history.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct Move {
    /// Server id.
    id: u64,
    /// Game the move belongs to.
    game_id: u64,
    /// Session id of the player who moved.
    session_id: String,
    /// Claimed cell.
    cell: Cell,
    /// Mark placed.
    mark: Mark,
    /// When the server recorded the move.
    created_at: DateTime<Utc>,
}

/// Full authoritative view of one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameSnapshot {
    /// The game record.
    game: Game,
    /// Seated players, zero to two.
    participants: Vec<Participant>,
    /// Ordered move history.
    moves: Vec<Move>,
}

impl GameSnapshot {
    /// Replays the move history into a board.
    pub fn board(&self) -> Board {
        project(&self.moves)
    }

    /// Splits the snapshot into game, participants and moves.
    pub fn into_parts(self) -> (Game, Vec<Participant>, Vec<Move>) {
        (self.game, self.participants, self.moves)
    }
}

/// What matchmaking answered: the game we were placed in and who is seated.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct MatchTicket {
    /// The game joined or created.
    game: Game,
    /// Players seated so far.
    participants: Vec<Participant>,
}

impl From<MatchTicket> for GameSnapshot {
    fn from(ticket: MatchTicket) -> Self {
        GameSnapshot::new(ticket.game, ticket.participants, Vec::new())
    }
}

/// Replays moves, in the order given, onto an empty board.
pub fn project(moves: &[Move]) -> Board {
    Board::replay(moves.iter().map(|mv| (mv.cell, mv.mark)))
}

/// Result of a finished game from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Outcome {
    /// The local participant won.
    #[strum(to_string = "You won!")]
    LocalWin,
    /// The opponent won.
    #[strum(to_string = "Opponent won")]
    OpponentWin,
    /// No winner.
    #[strum(to_string = "Draw")]
    Draw,
}

impl Outcome {
    /// Resolves the outcome of a finished game for the given session id.
    ///
    /// Returns `None` while the game is still being played.
    pub fn resolve(game: &Game, local_session_id: &str) -> Option<Self> {
        if !game.is_finished() {
            return None;
        }
        Some(match game.winner_id.as_deref() {
            None => Outcome::Draw,
            Some(winner) if winner == local_session_id => Outcome::LocalWin,
            Some(_) => Outcome::OpponentWin,
        })
    }
}

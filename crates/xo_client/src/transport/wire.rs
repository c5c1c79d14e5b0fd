//! JSON shapes exchanged with the game service.

use crate::error::MalformedResponse;
use crate::{Game, GameSnapshot, GameStatus, Identity, MatchTicket, Move, Participant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xo_board::{Cell, Mark};

/// Response wrapper used by every endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
}

/// Body of every request made on behalf of a player.
#[derive(Debug, Serialize)]
pub(super) struct PlayerRequest<'a> {
    pub user_id: &'a str,
}

/// Body of a move submission.
#[derive(Debug, Serialize)]
pub(super) struct MoveRequest<'a> {
    pub user_id: &'a str,
    pub row: u8,
    pub col: u8,
    pub sign: Mark,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireUser {
    user_id: String,
    tg_id: i64,
    username: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireGame {
    game_id: u64,
    status: u8,
    created_at: i64,
    #[serde(default)]
    winner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WirePlayer {
    user_id: String,
    username: String,
    sign: Mark,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireMove {
    move_id: u64,
    game_id: u64,
    user_id: String,
    row: u8,
    col: u8,
    sign: Mark,
    created_at: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireGameState {
    game: WireGame,
    #[serde(default)]
    players: Vec<WirePlayer>,
    #[serde(default)]
    moves: Vec<WireMove>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireMatch {
    game: WireGame,
    #[serde(default)]
    players: Vec<WirePlayer>,
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, MalformedResponse> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| MalformedResponse::new(format!("timestamp out of range: {}", secs)))
}

impl From<WireUser> for Identity {
    fn from(user: WireUser) -> Self {
        Identity::new(user.user_id, user.tg_id, user.username)
    }
}

impl TryFrom<WireGame> for Game {
    type Error = MalformedResponse;

    fn try_from(game: WireGame) -> Result<Self, Self::Error> {
        let status = GameStatus::try_from(game.status)
            .map_err(|code| MalformedResponse::new(format!("unknown game status {}", code)))?;
        Ok(Game::new(
            game.game_id,
            status,
            timestamp(game.created_at)?,
            game.winner_id,
        ))
    }
}

impl From<WirePlayer> for Participant {
    fn from(player: WirePlayer) -> Self {
        Participant::new(player.user_id, player.username, player.sign)
    }
}

impl TryFrom<WireMove> for Move {
    type Error = MalformedResponse;

    fn try_from(mv: WireMove) -> Result<Self, Self::Error> {
        let cell = Cell::new(mv.row, mv.col).ok_or_else(|| {
            MalformedResponse::new(format!("move {} off the board at ({}, {})", mv.move_id, mv.row, mv.col))
        })?;
        Ok(Move::new(
            mv.move_id,
            mv.game_id,
            mv.user_id,
            cell,
            mv.sign,
            timestamp(mv.created_at)?,
        ))
    }
}

impl TryFrom<WireGameState> for GameSnapshot {
    type Error = MalformedResponse;

    fn try_from(state: WireGameState) -> Result<Self, Self::Error> {
        let game = Game::try_from(state.game)?;
        let participants = state.players.into_iter().map(Participant::from).collect();
        let moves = state
            .moves
            .into_iter()
            .map(Move::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GameSnapshot::new(game, participants, moves))
    }
}

impl TryFrom<WireMatch> for MatchTicket {
    type Error = MalformedResponse;

    fn try_from(ticket: WireMatch) -> Result<Self, Self::Error> {
        Ok(MatchTicket::new(
            Game::try_from(ticket.game)?,
            ticket.players.into_iter().map(Participant::from).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_state_parses() {
        let json = r#"{
            "game": {"game_id": 7, "status": 1, "created_at": 1700000000, "winner_id": null},
            "players": [
                {"user_id": "a", "username": "Alice", "sign": "X"},
                {"user_id": "b", "username": "Bob", "sign": "O"}
            ],
            "moves": [
                {"move_id": 1, "game_id": 7, "user_id": "a", "row": 0, "col": 0, "sign": "X", "created_at": 1700000001}
            ]
        }"#;
        let wire: WireGameState = serde_json::from_str(json).unwrap();
        let snapshot = GameSnapshot::try_from(wire).unwrap();
        assert_eq!(*snapshot.game().id(), 7);
        assert_eq!(*snapshot.game().status(), GameStatus::Active);
        assert_eq!(snapshot.participants().len(), 2);
        assert_eq!(snapshot.board().get(Cell::new(0, 0).unwrap()), Some(Mark::X));
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let wire: WireGame =
            serde_json::from_str(r#"{"game_id": 1, "status": 9, "created_at": 0}"#).unwrap();
        assert!(Game::try_from(wire).is_err());
    }

    #[test]
    fn test_off_board_move_is_malformed() {
        let wire: WireMove = serde_json::from_str(
            r#"{"move_id": 1, "game_id": 1, "user_id": "a", "row": 3, "col": 0, "sign": "X", "created_at": 0}"#,
        )
        .unwrap();
        assert!(Move::try_from(wire).is_err());
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: Envelope<WireGameState> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }
}

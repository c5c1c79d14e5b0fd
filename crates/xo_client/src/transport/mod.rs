//! Typed access to the remote game service.
//!
//! Every operation either returns its typed payload or [`NotAvailable`].
//! Implementations never retry and never touch session state; retry policy
//! belongs to the reconciliation loop.

mod http;
mod wire;

pub use http::HttpTransport;

use crate::{GameSnapshot, Identity, MatchTicket, Move, NotAvailable};
use async_trait::async_trait;
use xo_board::{Cell, Mark};

/// One operation per remote capability.
#[async_trait]
pub trait GameTransport: Send + Sync {
    /// Loads the player record for a session id.
    async fn fetch_identity(&self, session_id: &str) -> Result<Identity, NotAvailable>;

    /// Looks up the game the player is currently seated in, if any.
    async fn fetch_active_game(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSnapshot>, NotAvailable>;

    /// Loads a game with its participants and move history.
    async fn fetch_game(&self, game_id: u64) -> Result<GameSnapshot, NotAvailable>;

    /// Joins matchmaking; the server seats the player in a new or waiting game.
    async fn join_matchmaking(&self, session_id: &str) -> Result<MatchTicket, NotAvailable>;

    /// Leaves a game. Returns true if the server acknowledged.
    async fn leave_game(&self, session_id: &str, game_id: u64) -> bool;

    /// Submits a move. The server validates it.
    async fn submit_move(
        &self,
        session_id: &str,
        game_id: u64,
        cell: Cell,
        mark: Mark,
    ) -> Result<Move, NotAvailable>;
}

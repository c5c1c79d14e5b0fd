//! HTTP transport built on reqwest.

use super::GameTransport;
use super::wire::{
    Envelope, MoveRequest, PlayerRequest, WireGameState, WireMatch, WireMove, WireUser,
};
use crate::error::{ConfigError, MalformedResponse};
use crate::{GameSnapshot, Identity, MatchTicket, Move, NotAvailable};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use xo_board::{Cell, Mark};

/// Game service client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL of the game service; always able to take path segments.
    base_url: Url,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport for the given base URL.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a transport reusing an existing client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| ConfigError::new(format!("Invalid server_url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::new(format!(
                "server_url cannot take a path: {}",
                base_url
            )));
        }
        info!(base_url = %base_url, "Created HTTP transport");
        Ok(Self { base_url, client })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, rejected in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a request and unwraps the envelope.
    ///
    /// `Ok(None)` means the server answered `success: true` with no payload.
    async fn exchange<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, NotAvailable> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            NotAvailable
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Server returned non-success status");
            return Err(NotAvailable);
        }

        let text = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read response body");
            NotAvailable
        })?;
        debug!(response = %text, "Response body");

        let envelope: Envelope<T> = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, response = %text, "Failed to parse response");
            NotAvailable
        })?;

        if !envelope.success {
            warn!("Server reported failure");
            return Err(NotAvailable);
        }

        Ok(envelope.data)
    }

    /// Like [`Self::exchange`] but the payload is mandatory.
    async fn exchange_required<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, NotAvailable> {
        self.exchange(request).await?.ok_or_else(|| {
            warn!("Successful response carried no data");
            NotAvailable
        })
    }
}

/// Logs a shape mismatch and folds it into [`NotAvailable`].
fn fold<T>(result: Result<T, MalformedResponse>) -> Result<T, NotAvailable> {
    result.map_err(|e| {
        warn!(error = %e, "Response did not match expected shape");
        NotAvailable::from(e)
    })
}

#[async_trait]
impl GameTransport for HttpTransport {
    #[instrument(skip(self))]
    async fn fetch_identity(&self, session_id: &str) -> Result<Identity, NotAvailable> {
        let request = self.client.get(self.endpoint(&["users", session_id]));
        let user: WireUser = self.exchange_required(request).await?;
        let identity = Identity::from(user);
        info!(display_name = %identity.display_name(), "Identity loaded");
        Ok(identity)
    }

    #[instrument(skip(self))]
    async fn fetch_active_game(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSnapshot>, NotAvailable> {
        let request = self
            .client
            .get(self.endpoint(&["users", session_id, "active-game"]));
        let state: Option<WireGameState> = self.exchange(request).await?;
        state.map(|s| fold(GameSnapshot::try_from(s))).transpose()
    }

    #[instrument(skip(self))]
    async fn fetch_game(&self, game_id: u64) -> Result<GameSnapshot, NotAvailable> {
        let request = self.client.get(self.endpoint(&["games", &game_id.to_string()]));
        let state: WireGameState = self.exchange_required(request).await?;
        let snapshot = fold(GameSnapshot::try_from(state))?;
        debug!(
            status = %snapshot.game().status(),
            participants = snapshot.participants().len(),
            moves = snapshot.moves().len(),
            "Fetched game"
        );
        Ok(snapshot)
    }

    #[instrument(skip(self))]
    async fn join_matchmaking(&self, session_id: &str) -> Result<MatchTicket, NotAvailable> {
        let request = self
            .client
            .post(self.endpoint(&["matchmaking", "join"]))
            .json(&PlayerRequest { user_id: session_id });
        let ticket: WireMatch = self.exchange_required(request).await?;
        let ticket = fold(MatchTicket::try_from(ticket))?;
        info!(game_id = ticket.game().id(), "Joined matchmaking");
        Ok(ticket)
    }

    #[instrument(skip(self))]
    async fn leave_game(&self, session_id: &str, game_id: u64) -> bool {
        let request = self
            .client
            .post(self.endpoint(&["games", &game_id.to_string(), "leave"]))
            .json(&PlayerRequest { user_id: session_id });
        let acknowledged = self
            .exchange::<serde_json::Value>(request)
            .await
            .is_ok();
        info!(acknowledged, "Left game");
        acknowledged
    }

    #[instrument(skip(self), fields(cell = %cell, mark = %mark))]
    async fn submit_move(
        &self,
        session_id: &str,
        game_id: u64,
        cell: Cell,
        mark: Mark,
    ) -> Result<Move, NotAvailable> {
        let body = MoveRequest {
            user_id: session_id,
            row: cell.row(),
            col: cell.col(),
            sign: mark,
        };
        let request = self
            .client
            .post(self.endpoint(&["games", &game_id.to_string(), "moves"]))
            .json(&body);
        let mv: WireMove = self.exchange_required(request).await?;
        let mv = fold(Move::try_from(mv))?;
        info!(move_id = mv.id(), "Move accepted");
        Ok(mv)
    }
}

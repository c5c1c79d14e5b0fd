//! Background loop that polls the game service and merges its answers into
//! the shared session.

use crate::session::{Phase, SessionState, SharedSession};
use crate::transport::GameTransport;
use crate::{GameSnapshot, NotAvailable};
use std::sync::Arc;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, info, instrument, warn};

/// What one poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Cycle {
    /// A new state was published.
    Updated,
    /// Nothing to poll in this phase, or the answer changed nothing.
    Idle,
    /// The service was unreachable; state untouched.
    NotAvailable,
    /// The foreground wrote while the cycle was in flight; result dropped.
    Discarded,
}

/// Polls the transport on a fixed cadence and drives phase transitions.
pub struct Reconciler {
    transport: Arc<dyn GameTransport>,
    session: SharedSession,
    session_id: String,
    poll_interval: Duration,
}

impl Reconciler {
    /// Creates a reconciler for the player identified by `session_id`.
    pub fn new(
        transport: Arc<dyn GameTransport>,
        session: SharedSession,
        session_id: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            transport,
            session,
            session_id: session_id.into(),
            poll_interval,
        }
    }

    /// Runs the polling loop until the task is aborted.
    ///
    /// There is no backoff: a failed cycle is simply retried on the next tick.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn run(self) {
        info!(interval = ?self.poll_interval, "Starting reconciliation loop");

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let cycle = self.tick().await;
            debug!(%cycle, "Poll cycle finished");
        }
    }

    /// Runs a single poll cycle.
    #[instrument(skip(self))]
    pub async fn tick(&self) -> Cycle {
        let current = self.session.snapshot();
        let read_generation = *current.generation();

        let next = match (current.identity(), current.phase()) {
            (None, _) => self.load_identity(&current).await,
            (Some(_), Phase::WaitingForMatch) => self.poll_matchmaking(&current).await,
            (Some(_), Phase::Running) => self.poll_game(&current).await,
            (Some(_), Phase::Menu | Phase::Finished) => return Cycle::Idle,
        };

        let next = match next {
            Ok(next) => next,
            Err(NotAvailable) => {
                debug!("Service not available, retrying next cycle");
                return Cycle::NotAvailable;
            }
        };

        if next == *current {
            return Cycle::Idle;
        }

        if self.session.publish(read_generation, next) {
            Cycle::Updated
        } else {
            Cycle::Discarded
        }
    }

    /// Resolves the identity, then seeds any game already in progress.
    async fn load_identity(&self, current: &SessionState) -> Result<SessionState, NotAvailable> {
        let identity = self.transport.fetch_identity(&self.session_id).await?;
        info!(display_name = %identity.display_name(), "Identity resolved");

        // Identity and any game in progress are published together or not at all.
        let active = self.transport.fetch_active_game(&self.session_id).await?;

        let mut next = current.clone();
        next.set_identity(identity);

        match active {
            Some(snapshot) if !snapshot.game().is_finished() => {
                let phase = seated_phase(&snapshot);
                info!(game_id = snapshot.game().id(), %phase, "Resuming game in progress");
                next.absorb(snapshot, phase);
            }
            Some(snapshot) => {
                debug!(game_id = snapshot.game().id(), "Active game already finished, staying in menu");
            }
            None => debug!("No game in progress"),
        }

        Ok(next)
    }

    /// Joins matchmaking once, then watches the game until an opponent sits.
    async fn poll_matchmaking(&self, current: &SessionState) -> Result<SessionState, NotAvailable> {
        let snapshot = match current.game() {
            None => GameSnapshot::from(self.transport.join_matchmaking(&self.session_id).await?),
            Some(game) => self.transport.fetch_game(*game.id()).await?,
        };

        let mut next = current.clone();
        if snapshot.game().is_finished() && snapshot.participants().len() < 2 {
            // Closed before an opponent arrived; look for a new match.
            info!(game_id = snapshot.game().id(), "Match closed while waiting, rejoining");
            next.forget_game();
            return Ok(next);
        }

        let phase = seated_phase(&snapshot);
        next.absorb(snapshot, phase);
        Ok(next)
    }

    /// Refreshes the running game.
    async fn poll_game(&self, current: &SessionState) -> Result<SessionState, NotAvailable> {
        let Some(game) = current.game() else {
            warn!("Running without a game, returning to matchmaking");
            let mut next = current.clone();
            next.enter(Phase::WaitingForMatch);
            return Ok(next);
        };

        let snapshot = self.transport.fetch_game(*game.id()).await?;
        let phase = if snapshot.game().is_finished() {
            Phase::Finished
        } else {
            Phase::Running
        };

        let mut next = current.clone();
        next.absorb(snapshot, phase);
        if phase == Phase::Finished {
            info!(outcome = ?next.outcome(), "Game finished");
        }
        Ok(next)
    }
}

/// Running once both seats are filled, waiting otherwise.
fn seated_phase(snapshot: &GameSnapshot) -> Phase {
    if snapshot.participants().len() == 2 {
        Phase::Running
    } else {
        Phase::WaitingForMatch
    }
}

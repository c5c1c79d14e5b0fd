//! Foreground handling of user intents.
//!
//! The controller validates input against the current snapshot, applies
//! local changes through [`SharedSession::update`] and dispatches network
//! commands without blocking the frame loop. The only awaited call is the
//! best-effort leave on quit.

use crate::session::{Phase, SharedSession};
use crate::transport::GameTransport;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, timeout};
use tracing::{debug, info, instrument, warn};
use xo_board::Cell;

/// Screen rectangle holding the board, used to map pointer positions to cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardGeometry {
    /// Left edge of the board.
    pub left: u16,
    /// Top edge of the board.
    pub top: u16,
    /// Width of one cell.
    pub cell_width: u16,
    /// Height of one cell.
    pub cell_height: u16,
}

impl BoardGeometry {
    /// Returns the cell under the given screen position, if any.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Cell> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return None;
        }
        let col = x.checked_sub(self.left)? / self.cell_width;
        let row = y.checked_sub(self.top)? / self.cell_height;
        Cell::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?)
    }
}

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    /// Leave the menu and look for a match.
    Play,
    /// Pointer press at a screen position.
    Click {
        /// Column on screen.
        x: u16,
        /// Row on screen.
        y: u16,
    },
    /// Direct cell selection (keyboard).
    Select(Cell),
    /// Return from a finished game to the menu.
    Reset,
    /// Exit the program.
    Quit,
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Shut down.
    Exit,
}

/// Turns user input into session changes and remote commands.
pub struct InteractionController {
    transport: Arc<dyn GameTransport>,
    session: SharedSession,
    geometry: BoardGeometry,
    leave_timeout: Duration,
    in_flight: Vec<JoinHandle<()>>,
}

impl InteractionController {
    /// Creates a controller.
    pub fn new(
        transport: Arc<dyn GameTransport>,
        session: SharedSession,
        leave_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            session,
            geometry: BoardGeometry::default(),
            leave_timeout,
            in_flight: Vec::new(),
        }
    }

    /// Updates where the board was last drawn.
    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = geometry;
    }

    /// Handles one input.
    #[instrument(skip(self))]
    pub async fn handle(&mut self, input: UserInput) -> Flow {
        self.in_flight.retain(|task| !task.is_finished());

        match input {
            UserInput::Play => {
                if self.session.update(|s| s.start_matchmaking().then_some(())).is_some() {
                    info!("Looking for a match");
                }
                Flow::Continue
            }
            UserInput::Click { x, y } => {
                match self.geometry.cell_at(x, y) {
                    Some(cell) => self.select(cell),
                    None => debug!(x, y, "Click outside the board"),
                }
                Flow::Continue
            }
            UserInput::Select(cell) => {
                self.select(cell);
                Flow::Continue
            }
            UserInput::Reset => {
                if self.session.update(|s| s.reset_to_menu().then_some(())).is_some() {
                    info!("Returned to menu");
                }
                Flow::Continue
            }
            UserInput::Quit => {
                if timeout(self.leave_timeout, self.settle()).await.is_err() {
                    warn!("Move submissions still pending at exit");
                }
                self.leave_if_playing().await;
                Flow::Exit
            }
        }
    }

    /// Waits for all dispatched submissions to complete.
    pub async fn settle(&mut self) {
        for task in self.in_flight.drain(..) {
            if let Err(e) = task.await {
                warn!(error = %e, "Move submission task failed");
            }
        }
    }

    /// Places the local mark and submits it in the background.
    fn select(&mut self, cell: Cell) {
        let Some(pending) = self.session.update(|s| s.place_provisional(cell)) else {
            debug!(%cell, "Selection ignored");
            return;
        };

        info!(%cell, game_id = pending.game_id(), "Submitting move");
        let transport = Arc::clone(&self.transport);
        let task = tokio::spawn(async move {
            match transport
                .submit_move(
                    pending.session_id(),
                    *pending.game_id(),
                    *pending.cell(),
                    *pending.mark(),
                )
                .await
            {
                Ok(mv) => debug!(move_id = mv.id(), "Move confirmed"),
                // The next poll replaces the provisional mark either way.
                Err(e) => warn!(error = %e, cell = %pending.cell(), "Move submission failed"),
            }
        });
        self.in_flight.push(task);
    }

    /// Leaves the current game if it is still being played.
    async fn leave_if_playing(&self) {
        let snapshot = self.session.snapshot();
        let (Some(identity), Some(game)) = (snapshot.identity(), snapshot.game()) else {
            return;
        };
        if game.is_finished() || *snapshot.phase() == Phase::Finished {
            return;
        }

        info!(game_id = game.id(), "Leaving game before exit");
        let leave = self.transport.leave_game(identity.session_id(), *game.id());
        match timeout(self.leave_timeout, leave).await {
            Ok(true) => info!("Server acknowledged leave"),
            Ok(false) => warn!("Server did not acknowledge leave"),
            Err(_) => warn!("Leave timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_maps_grid() {
        let geometry = BoardGeometry {
            left: 10,
            top: 5,
            cell_width: 8,
            cell_height: 4,
        };
        assert_eq!(geometry.cell_at(10, 5), Cell::new(0, 0));
        assert_eq!(geometry.cell_at(25, 13), Cell::new(2, 1));
        assert_eq!(geometry.cell_at(9, 5), None);
        assert_eq!(geometry.cell_at(34, 5), None);
        assert_eq!(geometry.cell_at(10, 17), None);
    }

    #[test]
    fn test_cell_at_without_layout() {
        assert_eq!(BoardGeometry::default().cell_at(0, 0), None);
    }
}

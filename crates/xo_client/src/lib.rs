//! xo client library - keeps a local tic-tac-toe session in sync with a
//! remote game service by polling.
//!
//! # Architecture
//!
//! - **Transport**: typed calls to the game service, failing only with [`NotAvailable`]
//! - **Session**: immutable snapshots of identity, game, roster and moves ([`SharedSession`])
//! - **Reconciler**: background task polling the transport and publishing snapshots
//! - **Controller**: foreground handling of clicks, play, reset and quit
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use xo_client::{HttpTransport, Reconciler, SharedSession};
//!
//! # async fn example() -> Result<(), xo_client::ConfigError> {
//! let transport = Arc::new(HttpTransport::new("http://localhost:8000")?);
//! let session = SharedSession::new();
//! let reconciler = Reconciler::new(transport, session.clone(), "player-1", Duration::from_millis(500));
//! tokio::spawn(reconciler.run());
//!
//! let snapshot = session.snapshot();
//! println!("phase: {}", snapshot.phase());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod error;
mod identity;
mod models;
mod reconcile;
mod session;
mod transport;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ClientConfig, SERVER_URL_ENV};

// Crate-level exports - Errors
pub use error::{ConfigError, IdentityError, IdentityErrorKind, MalformedResponse, NotAvailable};

// Crate-level exports - Identity bootstrap
pub use identity::IdentityFile;

// Crate-level exports - Remote entities
pub use models::{
    Game, GameSnapshot, GameStatus, Identity, MatchTicket, Move, Outcome, Participant, project,
};

// Crate-level exports - Transport
pub use transport::{GameTransport, HttpTransport};

// Crate-level exports - Session state
pub use session::{PendingMove, Phase, SessionState, SharedSession};

// Crate-level exports - Background and foreground tasks
pub use controller::{BoardGeometry, Flow, InteractionController, UserInput};
pub use reconcile::{Cycle, Reconciler};

// Re-exported board types used throughout the public API
pub use xo_board::{Board, Cell, Mark};

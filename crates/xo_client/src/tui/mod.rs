//! Terminal front end: renders snapshots and feeds input to the controller.

mod input;
mod ui;

pub use input::{move_cursor, translate};

use crate::transport::GameTransport;
use crate::{BoardGeometry, ClientConfig, Flow, InteractionController, Reconciler, SharedSession};
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{error, info, instrument};
use xo_board::Cell;

/// Time budget of one frame (about 60 fps).
const FRAME: Duration = Duration::from_millis(16);

/// Runs the client until the user quits.
///
/// Spawns the reconciliation loop in the background and drives the frame loop
/// on the current task. The terminal is restored on every exit path,
/// including a setup that fails part way.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
pub async fn run_tui(
    config: &ClientConfig,
    transport: Arc<dyn GameTransport>,
    session_id: String,
) -> Result<()> {
    info!("Starting terminal client");

    let session = SharedSession::new();
    let reconciler = Reconciler::new(
        Arc::clone(&transport),
        session.clone(),
        session_id,
        config.poll_interval(),
    );
    let reconciler_handle = tokio::spawn(reconciler.run());

    let controller = InteractionController::new(transport, session.clone(), config.leave_timeout());

    let res = bracket(
        enter_terminal,
        |mut terminal| async move { run_frames(&mut terminal, &session, controller).await },
        leave_terminal,
    )
    .await;

    reconciler_handle.abort();

    if let Err(err) = &res {
        error!(error = ?err, "Frame loop error");
    }
    info!("Terminal client stopped");
    res
}

/// Runs `body` between `enter` and `leave`.
///
/// `leave` runs whether `enter` or `body` failed; the first error wins.
async fn bracket<T, Fut>(
    enter: impl FnOnce() -> Result<T>,
    body: impl FnOnce(T) -> Fut,
    leave: impl FnOnce() -> Result<()>,
) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    let res = match enter() {
        Ok(resource) => body(resource).await,
        Err(e) => Err(e),
    };
    let left = leave();
    res.and(left)
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

/// Undoes whatever part of [`enter_terminal`] took effect.
fn leave_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, cursor::Show)?;
    Ok(())
}

/// Draws one snapshot per frame and dispatches input.
async fn run_frames(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &SharedSession,
    mut controller: InteractionController,
) -> Result<()> {
    let mut cursor = Cell::CENTER;

    loop {
        let snapshot = session.snapshot();
        let mut geometry = BoardGeometry::default();
        terminal.draw(|frame| geometry = ui::draw(frame, &snapshot, cursor))?;
        controller.set_geometry(geometry);

        if !event::poll(FRAME)? {
            continue;
        }
        let event = event::read()?;
        if let Some(input) = translate(&event, &mut cursor)
            && controller.handle(input).await == Flow::Exit
        {
            return Ok(());
        }
    }
}

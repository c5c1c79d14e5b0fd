//! Stateless rendering of one session snapshot.

use crate::{BoardGeometry, Phase, SessionState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use xo_board::{Cell, Mark};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

/// Draws the snapshot and returns where the board ended up.
pub fn draw(frame: &mut Frame, state: &SessionState, cursor: Cell) -> BoardGeometry {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Min(CELL_HEIGHT * 3),
        Constraint::Length(3), // Status
    ])
    .split(frame.area());

    let title = match state.identity() {
        Some(identity) => format!("Tic-Tac-Toe ({})", identity.display_name()),
        None => "Tic-Tac-Toe".to_string(),
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let geometry = match state.phase() {
        Phase::Running | Phase::Finished if !state.is_loading() => {
            draw_board(frame, chunks[1], state, cursor)
        }
        _ => {
            let message = Paragraph::new(banner(state)).alignment(Alignment::Center);
            frame.render_widget(message, center_rect(chunks[1], 40, 1));
            BoardGeometry::default()
        }
    };

    let status = Paragraph::new(status_line(state))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    geometry
}

fn banner(state: &SessionState) -> &'static str {
    if state.is_loading() {
        return "Loading...";
    }
    match state.phase() {
        Phase::Menu => "Press p to play",
        Phase::WaitingForMatch => "Waiting for an opponent...",
        Phase::Running | Phase::Finished => "",
    }
}

fn status_line(state: &SessionState) -> String {
    if state.is_loading() {
        return "Connecting to game service".to_string();
    }
    match state.phase() {
        Phase::Menu => "p: play   q: quit".to_string(),
        Phase::WaitingForMatch => "q: quit".to_string(),
        Phase::Running => {
            let opponent = state
                .opponent()
                .map(|p| p.display_name().as_str())
                .unwrap_or("opponent");
            match (state.local_mark(), *state.local_turn()) {
                (Some(mark), true) => format!("Your turn ({}) against {}", mark, opponent),
                _ => format!("Waiting for {}", opponent),
            }
        }
        Phase::Finished => match state.outcome() {
            Some(outcome) => format!("{}   r: menu   q: quit", outcome),
            None => "Game over   r: menu   q: quit".to_string(),
        },
    }
}

fn draw_board(frame: &mut Frame, area: Rect, state: &SessionState, cursor: Cell) -> BoardGeometry {
    let board_area = center_rect(area, CELL_WIDTH * 3, CELL_HEIGHT * 3);
    let line = state.winning_line();
    let show_cursor = *state.phase() == Phase::Running && *state.local_turn();

    for cell in Cell::all() {
        let rect = Rect::new(
            board_area.x + cell.col() as u16 * CELL_WIDTH,
            board_area.y + cell.row() as u16 * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        )
        .intersection(area);

        let (symbol, mut style) = match state.board().get(cell) {
            None => (" ", Style::default().fg(Color::DarkGray)),
            Some(Mark::X) => ("X", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Some(Mark::O) => ("O", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        };
        if line.is_some_and(|l| l.contains(cell)) {
            style = style.bg(Color::Green);
        } else if show_cursor && cell == cursor {
            style = style.bg(Color::White).fg(Color::Black);
        }

        let paragraph = Paragraph::new(symbol)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, rect);
    }

    BoardGeometry {
        left: board_area.x,
        top: board_area.y,
        cell_width: CELL_WIDTH,
        cell_height: CELL_HEIGHT,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

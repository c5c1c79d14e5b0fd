//! Translation of terminal events into user intents.

use crate::UserInput;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use xo_board::Cell;

/// Moves the keyboard cursor one cell, stopping at the edges.
pub fn move_cursor(cursor: Cell, key: KeyCode) -> Cell {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => Cell::new(row.saturating_sub(1), col),
        KeyCode::Down => Cell::new(row + 1, col),
        KeyCode::Left => Cell::new(row, col.saturating_sub(1)),
        KeyCode::Right => Cell::new(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}

/// Maps a terminal event to an intent, moving the cursor for arrow keys.
pub fn translate(event: &Event, cursor: &mut Cell) -> Option<UserInput> {
    match event {
        Event::Key(key) => translate_key(key, cursor),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(UserInput::Click {
            x: *column,
            y: *row,
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent, cursor: &mut Cell) -> Option<UserInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserInput::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(UserInput::Quit),
        KeyCode::Char('p') => Some(UserInput::Play),
        KeyCode::Char('r') => Some(UserInput::Reset),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UserInput::Select(*cursor)),
        KeyCode::Char(c) => {
            let digit = c.to_digit(10)? as usize;
            let cell = Cell::from_index(digit.checked_sub(1)?)?;
            *cursor = cell;
            Some(UserInput::Select(cell))
        }
        code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
            *cursor = move_cursor(*cursor, code);
            None
        }
        _ => None,
    }
}

//! Pure tic-tac-toe board logic for the xo client.
//!
//! The board is never stored on its own: it is a projection rebuilt from the
//! ordered move history every time new history arrives.
//!
//! # Example
//!
//! ```
//! use xo_board::{Board, Cell, Mark, may_move};
//!
//! let history = [(Cell::CENTER, Mark::X)];
//! let board = Board::replay(history);
//!
//! assert_eq!(board.get(Cell::CENTER), Some(Mark::X));
//! assert!(may_move(&board, Mark::O));
//! assert!(!may_move(&board, Mark::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod rules;
mod types;
mod win;

pub use rules::{MarkCounts, may_move};
pub use types::{Board, Cell, Mark};
pub use win::{WinningLine, winning_line};

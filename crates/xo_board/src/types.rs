//! Core domain types: marks, cells and the board projection.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Symbol a participant places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Mark {
    /// First mark. Holder moves on an even count.
    X,
    /// Second mark.
    O,
}

/// A cell on the 3x3 board, addressed by row and column (both 0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("({}, {})", row, col)]
pub struct Cell {
    pub(crate) row: u8,
    pub(crate) col: u8,
}

impl Cell {
    /// Board side length.
    pub const SIZE: u8 = 3;

    /// The middle cell.
    pub const CENTER: Cell = Cell { row: 1, col: 1 };

    /// Creates a cell, rejecting coordinates outside the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < Self::SIZE && col < Self::SIZE).then_some(Self { row, col })
    }

    /// Creates a cell from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 9 {
            return None;
        }
        Some(Self {
            row: (index / 3) as u8,
            col: (index % 3) as u8,
        })
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row as usize * 3 + self.col as usize
    }

    /// Row (0-2).
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column (0-2).
    pub fn col(self) -> u8 {
        self.col
    }

    /// All nine cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..9).filter_map(Self::from_index)
    }
}

/// 3x3 grid of optional marks.
///
/// Built with [`Board::replay`] from the authoritative move history. The only
/// other mutation is [`Board::place`], used for the provisional local mark
/// between a submission and the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Option<Mark>; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays an ordered move history onto an empty board.
    ///
    /// A cell is claimed at most once per game; if a history ever claims a
    /// cell twice the first claim is kept so the result stays deterministic.
    #[instrument(skip(history))]
    pub fn replay<I>(history: I) -> Self
    where
        I: IntoIterator<Item = (Cell, Mark)>,
    {
        let mut board = Self::new();
        for (cell, mark) in history {
            if !board.place(cell, mark) {
                warn!(%cell, %mark, "Cell claimed twice in history, keeping first claim");
            }
        }
        board
    }

    /// Returns the mark at the cell, if any.
    pub fn get(&self, cell: Cell) -> Option<Mark> {
        self.squares[cell.index()]
    }

    /// Returns true if nothing occupies the cell.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Places a mark on an empty cell. Returns false if the cell was taken.
    pub fn place(&mut self, cell: Cell, mark: Mark) -> bool {
        let square = &mut self.squares[cell.index()];
        if square.is_some() {
            return false;
        }
        *square = Some(mark);
        true
    }

    /// Number of cells holding the given mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares.iter().filter(|sq| **sq == Some(mark)).count()
    }
}

//! Completed-line detection, used to highlight the result on screen.
//!
//! The server decides when a game ends. This only finds which line to draw.

use crate::{Board, Cell, Mark};
use tracing::instrument;

/// A completed row, column or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    /// Mark filling the line.
    pub mark: Mark,
    /// The three cells, in board order.
    pub cells: [Cell; 3],
}

impl WinningLine {
    /// Returns true if the cell lies on this line.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

const fn at(row: u8, col: u8) -> Cell {
    Cell { row, col }
}

const LINES: [[Cell; 3]; 8] = [
    // Rows
    [at(0, 0), at(0, 1), at(0, 2)],
    [at(1, 0), at(1, 1), at(1, 2)],
    [at(2, 0), at(2, 1), at(2, 2)],
    // Columns
    [at(0, 0), at(1, 0), at(2, 0)],
    [at(0, 1), at(1, 1), at(2, 1)],
    [at(0, 2), at(1, 2), at(2, 2)],
    // Diagonals
    [at(0, 0), at(1, 1), at(2, 2)],
    [at(0, 2), at(1, 1), at(2, 0)],
];

/// Finds the first completed line on the board.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&cells| {
        let mark = board.get(cells[0])?;
        cells[1..]
            .iter()
            .all(|cell| board.get(*cell) == Some(mark))
            .then_some(WinningLine { mark, cells })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u8, col: u8) -> Cell {
        Cell::new(row, col).unwrap()
    }

    #[test]
    fn test_no_line_on_empty_board() {
        assert_eq!(winning_line(&Board::new()), None);
    }

    #[test]
    fn test_top_row() {
        let board = Board::replay([
            (cell(0, 0), Mark::X),
            (cell(1, 0), Mark::O),
            (cell(0, 1), Mark::X),
            (cell(1, 1), Mark::O),
            (cell(0, 2), Mark::X),
        ]);
        let line = winning_line(&board).unwrap();
        assert_eq!(line.mark, Mark::X);
        assert_eq!(line.cells, [cell(0, 0), cell(0, 1), cell(0, 2)]);
    }

    #[test]
    fn test_anti_diagonal() {
        let board = Board::replay([
            (cell(0, 2), Mark::O),
            (cell(1, 1), Mark::O),
            (cell(2, 0), Mark::O),
        ]);
        let line = winning_line(&board).unwrap();
        assert_eq!(line.mark, Mark::O);
        assert!(line.contains(cell(1, 1)));
    }

    #[test]
    fn test_incomplete_line() {
        let board = Board::replay([(cell(0, 0), Mark::X), (cell(0, 1), Mark::X)]);
        assert_eq!(winning_line(&board), None);
    }
}

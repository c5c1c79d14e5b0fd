//! Turn permission derived from the board.

use crate::{Board, Mark};
use tracing::instrument;

/// Number of placed marks of each symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkCounts {
    /// Placed X marks.
    pub x: usize,
    /// Placed O marks.
    pub o: usize,
}

impl MarkCounts {
    /// Counts the marks on a board.
    pub fn of(board: &Board) -> Self {
        Self {
            x: board.count(Mark::X),
            o: board.count(Mark::O),
        }
    }
}

/// Returns whether the holder of `mark` may move next.
///
/// X may move while `x <= o`, O only while `o < x`. The two sides use
/// different strictness so exactly one of them holds the turn for any count.
#[instrument(skip(board))]
pub fn may_move(board: &Board, mark: Mark) -> bool {
    let counts = MarkCounts::of(board);
    match mark {
        Mark::X => counts.x <= counts.o,
        Mark::O => counts.o < counts.x,
    }
}

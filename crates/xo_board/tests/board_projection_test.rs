//! Tests for board projection and turn permission.

use xo_board::{Board, Cell, Mark, MarkCounts, may_move, winning_line};

fn cell(row: u8, col: u8) -> Cell {
    Cell::new(row, col).expect("cell on board")
}

fn sample_history() -> Vec<(Cell, Mark)> {
    vec![
        (cell(0, 0), Mark::X),
        (cell(1, 1), Mark::O),
        (cell(0, 1), Mark::X),
        (cell(0, 2), Mark::O),
    ]
}

#[test]
fn test_replay_is_deterministic() {
    let history = sample_history();
    let first = Board::replay(history.iter().copied());
    let second = Board::replay(history.iter().copied());
    assert_eq!(first, second);
}

#[test]
fn test_replay_places_every_move() {
    let board = Board::replay(sample_history());
    assert_eq!(board.get(cell(0, 0)), Some(Mark::X));
    assert_eq!(board.get(cell(1, 1)), Some(Mark::O));
    assert_eq!(board.get(cell(2, 2)), None);
    assert_eq!(Cell::all().filter(|c| board.is_empty(*c)).count(), 5);
}

#[test]
fn test_replay_of_empty_history_is_empty_board() {
    let board = Board::replay(std::iter::empty());
    assert_eq!(board, Board::new());
    assert!(Cell::all().all(|c| board.is_empty(c)));
}

#[test]
fn test_duplicate_claim_keeps_first() {
    let board = Board::replay([(cell(2, 0), Mark::X), (cell(2, 0), Mark::O)]);
    assert_eq!(board.get(cell(2, 0)), Some(Mark::X));
    assert_eq!(board.count(Mark::O), 0);
}

#[test]
fn test_optimistic_mark_matches_authoritative_replay() {
    let mut local = Board::new();
    assert!(local.place(cell(0, 0), Mark::X));

    let authoritative = Board::replay([(cell(0, 0), Mark::X)]);
    assert_eq!(local, authoritative);
}

#[test]
fn test_turn_permission_follows_counts() {
    let board = Board::replay(sample_history());
    assert_eq!(MarkCounts::of(&board), MarkCounts { x: 2, o: 2 });
    assert!(may_move(&board, Mark::X));
    assert!(!may_move(&board, Mark::O));
}

#[test]
fn test_full_board_has_winning_line_or_draw() {
    // X O X
    // X O O
    // O X X
    let board = Board::replay([
        (cell(0, 0), Mark::X),
        (cell(0, 1), Mark::O),
        (cell(0, 2), Mark::X),
        (cell(1, 1), Mark::O),
        (cell(1, 0), Mark::X),
        (cell(1, 2), Mark::O),
        (cell(2, 1), Mark::X),
        (cell(2, 0), Mark::O),
        (cell(2, 2), Mark::X),
    ]);
    assert!(Cell::all().all(|c| !board.is_empty(c)));
    assert_eq!(winning_line(&board), None);
}

#[test]
fn test_mark_serializes_as_letter() {
    assert_eq!(serde_json::to_string(&Mark::X).unwrap(), "\"X\"");
    assert_eq!(serde_json::from_str::<Mark>("\"O\"").unwrap(), Mark::O);
}

//! Selection value and match evaluation

use tile_tally::core::{evaluate, selection_value, Board, Cell, MatchOutcome, MatchTrigger};
use tile_tally::types::{Coord, Difficulty, GameConfig, GameMode, SelectionMode, Tile, TileId};

fn n(id: u32, v: u32) -> Cell {
    Some(Tile::number(TileId(id), v))
}

fn board() -> Board {
    Board::from_rows(vec![
        vec![n(1, 4), n(2, 6), Some(Tile::bonus(TileId(3)))],
        vec![n(4, 2), n(5, 3), n(6, 5)],
        vec![n(7, 7), None, n(9, 9)],
    ])
    .unwrap()
}

fn config(mode: GameMode, selection_mode: SelectionMode) -> GameConfig {
    GameConfig::new(mode, Difficulty::Medium, selection_mode).with_board_side(3)
}

#[test]
fn test_bonus_empty_and_out_of_range_contribute_nothing() {
    let board = board();
    let coords = [
        Coord::new(0, 0),
        Coord::new(0, 2),
        Coord::new(2, 1),
        Coord::new(8, 8),
        Coord::new(1, 2),
    ];
    assert_eq!(selection_value(&coords, &board, GameMode::Sum), 9);
    assert_eq!(selection_value(&coords, &board, GameMode::Multiply), 20);
}

#[test]
fn test_tap_evaluation() {
    let board = board();
    let cfg = config(GameMode::Sum, SelectionMode::Tap);
    let trigger = MatchTrigger::SelectionChanged;

    assert_eq!(
        evaluate(&[Coord::new(0, 0)], &board, &cfg, 10, 0, trigger),
        MatchOutcome::Pending
    );
    assert_eq!(
        evaluate(&[Coord::new(0, 0), Coord::new(0, 1)], &board, &cfg, 10, 0, trigger),
        MatchOutcome::Success {
            points: 10,
            coords: vec![Coord::new(0, 0), Coord::new(0, 1)],
        }
    );
    assert_eq!(
        evaluate(&[Coord::new(2, 0), Coord::new(2, 2)], &board, &cfg, 10, 0, trigger),
        MatchOutcome::Failure
    );
    // Tap does not need adjacency
    assert!(matches!(
        evaluate(&[Coord::new(0, 0), Coord::new(1, 2)], &board, &cfg, 9, 0, trigger),
        MatchOutcome::Success { .. }
    ));
}

#[test]
fn test_drag_evaluates_only_on_release() {
    let board = board();
    let cfg = config(GameMode::Sum, SelectionMode::Drag);
    let selection = [Coord::new(1, 1), Coord::new(1, 2)];

    assert_eq!(
        evaluate(&selection, &board, &cfg, 8, 0, MatchTrigger::SelectionChanged),
        MatchOutcome::Pending
    );
    assert_eq!(
        evaluate(&selection, &board, &cfg, 8, 0, MatchTrigger::PointerReleased),
        MatchOutcome::Success {
            points: 8,
            coords: selection.to_vec(),
        }
    );
    assert_eq!(
        evaluate(&selection[..1], &board, &cfg, 8, 0, MatchTrigger::PointerReleased),
        MatchOutcome::Failure
    );
}

#[test]
fn test_multiply_points_use_plain_sum() {
    let board = board();
    let cfg = config(GameMode::Multiply, SelectionMode::Drag);
    let selection = [Coord::new(1, 0), Coord::new(1, 1)];
    // 2 * 3 = 6 matches; points come from 2 + 3
    assert_eq!(
        evaluate(&selection, &board, &cfg, 6, 0, MatchTrigger::PointerReleased),
        MatchOutcome::Success {
            points: 5,
            coords: selection.to_vec(),
        }
    );
}

#[test]
fn test_bonus_tile_in_selection_is_not_cleared() {
    let board = board();
    let cfg = config(GameMode::Sum, SelectionMode::Drag);
    let selection = [Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 1)];
    assert_eq!(
        evaluate(&selection, &board, &cfg, 9, 0, MatchTrigger::PointerReleased),
        MatchOutcome::Success {
            points: 9,
            coords: vec![Coord::new(0, 1), Coord::new(1, 1)],
        }
    );
}

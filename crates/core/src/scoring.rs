//! Selection value, match evaluation and points
//!
//! Everything here is a pure function over a board and a selection. Bonus
//! tiles and empty cells never contribute to a selection's value.

use crate::board::Board;
use crate::types::{Coord, GameConfig, GameMode, SelectionMode, COMBO_STEP_TENTHS};

/// When an evaluation is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTrigger {
    /// The selection just changed (tap, or a drag step)
    SelectionChanged,
    /// The drag pointer was released
    PointerReleased,
}

/// Result of evaluating a selection against the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Selection equals the target
    Success {
        /// Combo-weighted points
        points: u32,
        /// Number-tile coordinates to clear
        coords: Vec<Coord>,
    },
    /// Selection can no longer match
    Failure,
    /// Nothing to decide yet
    Pending,
}

/// Fold values with the mode's operator (`+` from 0, saturating `*` from 1)
pub fn combine(values: impl IntoIterator<Item = u64>, mode: GameMode) -> u64 {
    match mode {
        GameMode::Sum => values.into_iter().fold(0u64, u64::saturating_add),
        GameMode::Multiply => values.into_iter().fold(1u64, u64::saturating_mul),
    }
}

fn number_values<'a>(coords: &'a [Coord], board: &'a Board) -> impl Iterator<Item = u64> + 'a {
    coords
        .iter()
        .filter_map(move |&coord| board.get(coord).and_then(|tile| tile.value()))
        .map(u64::from)
}

/// Value of a selection under `mode`. Total over any coordinate list.
pub fn selection_value(coords: &[Coord], board: &Board, mode: GameMode) -> u64 {
    combine(number_values(coords, board), mode)
}

/// Plain sum of the selected number tiles (the base for points in every mode)
pub fn selection_sum(coords: &[Coord], board: &Board) -> u64 {
    combine(number_values(coords, board), GameMode::Sum)
}

/// Selected coordinates that hold number tiles, in selection order
pub fn number_coords(coords: &[Coord], board: &Board) -> Vec<Coord> {
    coords
        .iter()
        .copied()
        .filter(|&coord| matches!(board.get(coord), Some(tile) if !tile.is_bonus()))
        .collect()
}

/// `ceil(sum × (1 + combo × 0.1))`, computed in whole tenths
pub fn match_points(sum: u64, combo: u32) -> u32 {
    let multiplier_tenths = 10 + COMBO_STEP_TENTHS * combo as u64;
    let tenths = sum.saturating_mul(multiplier_tenths);
    u32::try_from(tenths.div_ceil(10)).unwrap_or(u32::MAX)
}

/// Decide whether `selection` matches `target`.
///
/// - Tap mode decides on every selection change: equal is a success, above
///   the target is a failure (values are positive, so the selection value can
///   only grow), anything else is pending. A selection with no number tile is
///   pending.
/// - Drag mode decides only when the pointer is released: equal is a success,
///   anything else (including no number tile) is a failure.
pub fn evaluate(
    selection: &[Coord],
    board: &Board,
    config: &GameConfig,
    target: u32,
    combo: u32,
    trigger: MatchTrigger,
) -> MatchOutcome {
    let coords = number_coords(selection, board);

    match (config.selection_mode, trigger) {
        (SelectionMode::Drag, MatchTrigger::SelectionChanged) => MatchOutcome::Pending,
        (SelectionMode::Tap, MatchTrigger::PointerReleased) => MatchOutcome::Pending,
        (SelectionMode::Drag, MatchTrigger::PointerReleased) => {
            if coords.is_empty() {
                return MatchOutcome::Failure;
            }
            let value = selection_value(&coords, board, config.mode);
            if value == target as u64 {
                success(coords, board, combo)
            } else {
                MatchOutcome::Failure
            }
        }
        (SelectionMode::Tap, MatchTrigger::SelectionChanged) => {
            if coords.is_empty() {
                return MatchOutcome::Pending;
            }
            let value = selection_value(&coords, board, config.mode);
            if value == target as u64 {
                success(coords, board, combo)
            } else if value > target as u64 {
                MatchOutcome::Failure
            } else {
                MatchOutcome::Pending
            }
        }
    }
}

fn success(coords: Vec<Coord>, board: &Board, combo: u32) -> MatchOutcome {
    let points = match_points(selection_sum(&coords, board), combo);
    MatchOutcome::Success { points, coords }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::types::{Difficulty, Tile, TileId};

    fn n(id: u32, v: u32) -> Cell {
        Some(Tile::number(TileId(id), v))
    }

    fn board() -> Board {
        Board::from_rows(vec![
            vec![n(1, 4), n(2, 6), n(3, 2)],
            vec![n(4, 3), Some(Tile::bonus(TileId(5))), n(6, 5)],
            vec![n(7, 1), n(8, 9), None],
        ])
        .unwrap()
    }

    fn tap(mode: GameMode) -> GameConfig {
        GameConfig::new(mode, Difficulty::Medium, SelectionMode::Tap)
    }

    fn drag(mode: GameMode) -> GameConfig {
        GameConfig::new(mode, Difficulty::Medium, SelectionMode::Drag)
    }

    #[test]
    fn test_identity_values() {
        let b = board();
        assert_eq!(selection_value(&[], &b, GameMode::Sum), 0);
        assert_eq!(selection_value(&[], &b, GameMode::Multiply), 1);
    }

    #[test]
    fn test_bonus_and_empty_ignored() {
        let b = board();
        let sel = [Coord::new(1, 1), Coord::new(2, 2), Coord::new(0, 0)];
        assert_eq!(selection_value(&sel, &b, GameMode::Sum), 4);
        assert_eq!(selection_value(&sel, &b, GameMode::Multiply), 4);
        assert_eq!(number_coords(&sel, &b), vec![Coord::new(0, 0)]);
    }

    #[test]
    fn test_match_points() {
        assert_eq!(match_points(10, 0), 10);
        assert_eq!(match_points(10, 1), 11);
        assert_eq!(match_points(7, 3), 10); // 9.1 -> 10
        assert_eq!(match_points(0, 5), 0);
    }

    #[test]
    fn test_tap_success_failure_pending() {
        let b = board();
        let cfg = tap(GameMode::Sum);
        let t = MatchTrigger::SelectionChanged;

        assert_eq!(evaluate(&[Coord::new(0, 0)], &b, &cfg, 10, 0, t), MatchOutcome::Pending);
        assert_eq!(
            evaluate(&[Coord::new(0, 0), Coord::new(0, 1)], &b, &cfg, 10, 0, t),
            MatchOutcome::Success {
                points: 10,
                coords: vec![Coord::new(0, 0), Coord::new(0, 1)]
            }
        );
        assert_eq!(evaluate(&[Coord::new(2, 1)], &b, &cfg, 8, 0, t), MatchOutcome::Failure);
        assert_eq!(evaluate(&[Coord::new(1, 1)], &b, &cfg, 8, 0, t), MatchOutcome::Pending);
    }

    #[test]
    fn test_tap_ignores_release() {
        let b = board();
        let sel = [Coord::new(0, 0), Coord::new(0, 1)];
        assert_eq!(
            evaluate(&sel, &b, &tap(GameMode::Sum), 10, 0, MatchTrigger::PointerReleased),
            MatchOutcome::Pending
        );
    }

    #[test]
    fn test_drag_only_on_release() {
        let b = board();
        let cfg = drag(GameMode::Sum);
        let sel = [Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)];

        assert_eq!(
            evaluate(&sel, &b, &cfg, 8, 0, MatchTrigger::SelectionChanged),
            MatchOutcome::Pending
        );
        assert_eq!(
            evaluate(&sel, &b, &cfg, 8, 2, MatchTrigger::PointerReleased),
            MatchOutcome::Success {
                points: 10, // ceil(8 * 1.2) = 10
                coords: vec![Coord::new(1, 0), Coord::new(1, 2)]
            }
        );
        assert_eq!(
            evaluate(&sel, &b, &cfg, 9, 0, MatchTrigger::PointerReleased),
            MatchOutcome::Failure
        );
    }

    #[test]
    fn test_drag_all_bonus_is_failure() {
        let b = board();
        assert_eq!(
            evaluate(
                &[Coord::new(1, 1)],
                &b,
                &drag(GameMode::Sum),
                5,
                0,
                MatchTrigger::PointerReleased
            ),
            MatchOutcome::Failure
        );
    }

    #[test]
    fn test_multiply_points_use_sum() {
        let b = board();
        let sel = [Coord::new(0, 0), Coord::new(0, 2)];
        assert_eq!(
            evaluate(&sel, &b, &tap(GameMode::Multiply), 8, 0, MatchTrigger::SelectionChanged),
            MatchOutcome::Success {
                points: 6,
                coords: sel.to_vec()
            }
        );
    }
}

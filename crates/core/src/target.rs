//! Target derivation
//!
//! A turn's target is built from tiles that are actually on the board, so it
//! is always reachable when it is generated: a short random walk over
//! 4-adjacent number tiles is combined with the game's rule (sum or product).

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::rng::RandomSource;
use crate::scoring::combine;
use crate::types::{Coord, GameMode, DEFAULT_TARGET};

/// Longest walk used to build a target
pub const MAX_WALK_LEN: usize = 3;

/// A derived target and the tiles that produce it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub value: u32,
    /// Empty when the board could not supply two number tiles
    pub path: Vec<Coord>,
}

/// Derive a target value for `board`. See [`derive_target_path`].
pub fn derive_target<R: RandomSource>(board: &Board, mode: GameMode, rng: &mut R) -> u32 {
    derive_target_path(board, mode, rng).value
}

/// Derive a target together with the tiles used.
///
/// The walk starts from a uniformly random number tile that has at least one
/// number-tile neighbour, picks a length of 2 or 3, and extends to a uniformly
/// random unvisited 4-adjacent number neighbour each step, stopping early when
/// none is left. When no two number tiles touch, two shuffled number tiles are
/// used instead; with fewer than two number tiles the target is
/// [`DEFAULT_TARGET`].
///
/// The start is not uniform over all number tiles: isolated number tiles are
/// never chosen, so every walk reaches at least two tiles and the target can
/// always be matched by a contiguous selection.
pub fn derive_target_path<R: RandomSource>(board: &Board, mode: GameMode, rng: &mut R) -> Target {
    let numbers = board.number_coords();
    if numbers.len() < 2 {
        return Target {
            value: DEFAULT_TARGET,
            path: Vec::new(),
        };
    }

    let starts: Vec<Coord> = numbers
        .iter()
        .copied()
        .filter(|&coord| !board.number_neighbors4(coord).is_empty())
        .collect();

    let mut path: ArrayVec<Coord, MAX_WALK_LEN> = ArrayVec::new();
    if let Some(&start) = rng.choose(&starts) {
        let len = 2 + rng.next_range(2) as usize;
        path.push(start);
        while path.len() < len {
            let last = path[path.len() - 1];
            let options: ArrayVec<Coord, 4> = board
                .number_neighbors4(last)
                .into_iter()
                .filter(|coord| !path.contains(coord))
                .collect();
            match rng.choose(&options) {
                Some(&next) => path.push(next),
                None => break,
            }
        }
    }

    if path.len() < 2 {
        let mut pool = numbers;
        rng.shuffle(&mut pool);
        path.clear();
        path.extend(pool.into_iter().take(2));
    }

    let values = path
        .iter()
        .filter_map(|&coord| board.get(coord).and_then(|tile| tile.value()))
        .map(u64::from);
    let value = u32::try_from(combine(values, mode)).unwrap_or(u32::MAX);

    Target {
        value,
        path: path.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::rng::SimpleRng;
    use crate::types::{Tile, TileId};

    fn n(id: u32, v: u32) -> Cell {
        Some(Tile::number(TileId(id), v))
    }

    fn b(id: u32) -> Cell {
        Some(Tile::bonus(TileId(id)))
    }

    #[test]
    fn test_default_when_too_few_numbers() {
        let board = Board::from_rows(vec![vec![b(1), b(2)], vec![n(3, 4), None]]).unwrap();
        let mut rng = SimpleRng::new(1);
        let target = derive_target_path(&board, GameMode::Sum, &mut rng);
        assert_eq!(target.value, DEFAULT_TARGET);
        assert!(target.path.is_empty());
    }

    #[test]
    fn test_walk_is_contiguous_and_matches_value() {
        let board = Board::from_rows(vec![
            vec![n(1, 1), n(2, 2), n(3, 3)],
            vec![n(4, 4), n(5, 5), n(6, 6)],
            vec![n(7, 7), n(8, 8), n(9, 9)],
        ])
        .unwrap();

        for seed in 1..200 {
            let mut rng = SimpleRng::new(seed);
            let target = derive_target_path(&board, GameMode::Sum, &mut rng);
            assert!((2..=3).contains(&target.path.len()));
            for pair in target.path.windows(2) {
                assert!(pair[0].is_adjacent4(pair[1]));
            }
            let sum: u32 = target
                .path
                .iter()
                .map(|&c| board.get(c).unwrap().value().unwrap())
                .sum();
            assert_eq!(target.value, sum);
        }
    }

    #[test]
    fn test_product_mode() {
        let board = Board::from_rows(vec![vec![n(1, 2), n(2, 3)], vec![b(3), b(4)]]).unwrap();
        let mut rng = SimpleRng::new(5);
        let target = derive_target_path(&board, GameMode::Multiply, &mut rng);
        assert_eq!(target.value, 6);
    }

    #[test]
    fn test_fallback_when_numbers_do_not_touch() {
        let board = Board::from_rows(vec![
            vec![n(1, 2), b(2), n(3, 5)],
            vec![b(4), b(5), b(6)],
            vec![b(7), b(8), b(9)],
        ])
        .unwrap();
        let mut rng = SimpleRng::new(8);
        let target = derive_target_path(&board, GameMode::Sum, &mut rng);
        assert_eq!(target.value, 7);
        assert_eq!(target.path.len(), 2);
    }

    #[test]
    fn test_isolated_tile_never_starts_walk() {
        // 9 sits alone behind bonus tiles; 1-2 is the only touching pair
        let board = Board::from_rows(vec![
            vec![n(1, 1), n(2, 2), b(3)],
            vec![b(4), b(5), b(6)],
            vec![b(7), b(8), n(9, 9)],
        ])
        .unwrap();
        for seed in 1..100 {
            let mut rng = SimpleRng::new(seed);
            let target = derive_target_path(&board, GameMode::Sum, &mut rng);
            assert_eq!(target.value, 3);
            assert!(!target.path.contains(&Coord::new(2, 2)));
        }
    }

    #[test]
    fn test_walk_never_uses_bonus_tiles() {
        let board = Board::from_rows(vec![
            vec![n(1, 1), b(2), n(3, 3)],
            vec![n(4, 4), b(5), n(6, 6)],
            vec![n(7, 7), b(8), n(9, 9)],
        ])
        .unwrap();
        for seed in 1..100 {
            let mut rng = SimpleRng::new(seed);
            let target = derive_target_path(&board, GameMode::Sum, &mut rng);
            assert!(target.path.iter().all(|&c| !board.get(c).unwrap().is_bonus()));
        }
    }
}

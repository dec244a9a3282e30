//! Gravity and refill
//!
//! After tiles are cleared, every column is compacted toward the bottom and
//! the emptied cells at the top are refilled with fresh tiles. The compaction
//! is a two-pointer pass per column (read from the bottom, write from the
//! bottom), so relative order inside a column never changes.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::rng::{RandomSource, TileDealer};
use crate::types::{Coord, Difficulty, GameMode, TileId};

/// Compact each column downward and refill the top.
///
/// Each refilled cell is a bonus tile with the `(mode, difficulty)` bonus
/// probability, otherwise a number tile. Returns the new board and the ids of
/// the refilled tiles.
pub fn apply_gravity<R: RandomSource>(
    board: &Board,
    mode: GameMode,
    difficulty: Difficulty,
    dealer: &mut TileDealer<R>,
) -> (Board, BTreeSet<TileId>) {
    let params = difficulty.params(mode);
    let side = board.side();
    let mut next = board.clone();
    let mut new_ids = BTreeSet::new();

    for col in 0..side {
        let mut write_row = side;

        // Scan from bottom to top, moving tiles down to the write position
        for read_row in (0..side).rev() {
            let Some(tile) = board.get(Coord::new(read_row, col)) else {
                continue;
            };
            write_row -= 1;
            if write_row != read_row {
                next.set(Coord::new(write_row, col), Some(tile));
                next.set(Coord::new(read_row, col), None);
            }
        }

        // Refill the remaining rows at the top
        for row in 0..write_row {
            let tile = dealer.refill_tile(&params);
            new_ids.insert(tile.id);
            next.set(Coord::new(row, col), Some(tile));
        }
    }

    (next, new_ids)
}

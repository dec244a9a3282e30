//! Board module - manages the tile grid
//!
//! The board is a square grid where each cell is empty or holds a [`Tile`].
//! Uses a flat row-major vector for cache locality; the side length is chosen
//! per game. Coordinates: `(row, col)` with row 0 at the top, so gravity
//! compacts tiles toward row `side - 1`.
//!
//! Boards are values: every transformation used by the game (clearing,
//! gravity, bonus removal) returns a new board and leaves the input intact.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::rng::{RandomSource, TileDealer};
use crate::types::{Coord, GameConfig, Tile, TileId, MAX_BOARD_SIDE, MIN_BOARD_SIDE};

/// A single grid cell
pub type Cell = Option<Tile>;

/// The square tile grid using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Board {
    side: u8,
    /// Flat vector of cells, row-major order (row * side + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board; the side is clamped to the supported range
    pub fn empty(side: u8) -> Self {
        let side = side.clamp(MIN_BOARD_SIDE, MAX_BOARD_SIDE);
        Self {
            side,
            cells: vec![None; side as usize * side as usize],
        }
    }

    /// Build a board from rows (top row first).
    ///
    /// Returns `None` unless the rows form a square within the supported sizes.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let side = rows.len();
        if side < MIN_BOARD_SIDE as usize || side > MAX_BOARD_SIDE as usize {
            return None;
        }
        if rows.iter().any(|row| row.len() != side) {
            return None;
        }
        Some(Self {
            side: side as u8,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if !coord.in_bounds(self.side) {
            return None;
        }
        Some(coord.row as usize * self.side as usize + coord.col as usize)
    }

    pub fn side(&self) -> u8 {
        self.side
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds(self.side)
    }

    /// Tile at `coord`; `None` when empty or out of bounds
    pub fn get(&self, coord: Coord) -> Option<Tile> {
        self.index(coord).and_then(|idx| self.cells[idx])
    }

    /// Set cell at `coord`. Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All coordinates, row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let side = self.side;
        (0..side).flat_map(move |row| (0..side).map(move |col| Coord::new(row, col)))
    }

    /// Occupied cells with their coordinates, row-major
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.coords()
            .filter_map(move |coord| self.get(coord).map(|tile| (coord, tile)))
    }

    /// Coordinates of every number tile, row-major
    pub fn number_coords(&self) -> Vec<Coord> {
        self.tiles()
            .filter(|(_, tile)| !tile.is_bonus())
            .map(|(coord, _)| coord)
            .collect()
    }

    pub fn number_tile_count(&self) -> usize {
        self.tiles().filter(|(_, tile)| !tile.is_bonus()).count()
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Every tile id on the board
    pub fn tile_ids(&self) -> BTreeSet<TileId> {
        self.tiles().map(|(_, tile)| tile.id).collect()
    }

    /// Locate a tile by id
    pub fn find(&self, id: TileId) -> Option<Coord> {
        self.tiles()
            .find(|(_, tile)| tile.id == id)
            .map(|(coord, _)| coord)
    }

    /// Column contents, top to bottom
    pub fn column(&self, col: u8) -> Vec<Cell> {
        (0..self.side)
            .map(|row| self.get(Coord::new(row, col)))
            .collect()
    }

    /// Index of the bottom row
    pub fn bottom_row(&self) -> u8 {
        self.side - 1
    }

    /// Ids of bonus tiles sitting in `row`
    pub fn bonus_ids_in_row(&self, row: u8) -> BTreeSet<TileId> {
        (0..self.side)
            .filter_map(|col| self.get(Coord::new(row, col)))
            .filter(|tile| tile.is_bonus())
            .map(|tile| tile.id)
            .collect()
    }

    /// 4-adjacent neighbours holding number tiles
    pub fn number_neighbors4(&self, coord: Coord) -> ArrayVec<Coord, 4> {
        let mut out = ArrayVec::new();
        let Coord { row, col } = coord;
        let candidates = [
            row.checked_sub(1).map(|r| Coord::new(r, col)),
            Some(Coord::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coord::new(row, c)),
            Some(Coord::new(row, col + 1)),
        ];
        for candidate in candidates.into_iter().flatten() {
            if matches!(self.get(candidate), Some(tile) if !tile.is_bonus()) {
                out.push(candidate);
            }
        }
        out
    }

    /// Copy of the board with the given cells emptied
    pub fn without_coords(&self, coords: &[Coord]) -> Board {
        let mut next = self.clone();
        for &coord in coords {
            next.set(coord, None);
        }
        next
    }

    /// Copy of the board with the given tiles removed
    pub fn without_tiles(&self, ids: &BTreeSet<TileId>) -> Board {
        let mut next = self.clone();
        for cell in &mut next.cells {
            if matches!(cell, Some(tile) if ids.contains(&tile.id)) {
                *cell = None;
            }
        }
        next
    }
}

/// Fill a new board with number tiles for `config`.
///
/// Returns the board and the ids of every created tile (all of them), which
/// the presentation layer uses to play the initial drop.
pub fn create_board<R: RandomSource>(
    config: &GameConfig,
    dealer: &mut TileDealer<R>,
) -> (Board, BTreeSet<TileId>) {
    let params = config.params();
    let mut board = Board::empty(config.board_side);
    let mut new_ids = BTreeSet::new();
    for cell in &mut board.cells {
        let tile = dealer.number_tile(&params);
        new_ids.insert(tile.id);
        *cell = Some(tile);
    }
    (board, new_ids)
}

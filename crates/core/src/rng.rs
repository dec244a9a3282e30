//! RNG module - seedable randomness and tile dealing
//!
//! The board engine never reaches for a global generator: every function that
//! needs randomness takes a [`RandomSource`]. [`SimpleRng`] is a small LCG that
//! makes whole games reproducible from a seed, and [`TileDealer`] pairs a
//! random source with the tile id counter so new tiles are always unique.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{DifficultyParams, Tile, TileId};

/// Source of uniform randomness
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, max)`; returns 0 when `max` is 0
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Multiply-shift keeps the high bits, which are the good ones for an LCG.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Pick a uniformly random element
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(items.len() as u32) as usize)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the wall clock, for production sessions
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1);
        Self::new((nanos ^ (nanos >> 32)) as u32)
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Creates tiles: random values from a [`RandomSource`], ids from a counter.
#[derive(Debug, Clone)]
pub struct TileDealer<R = SimpleRng> {
    rng: R,
    next_id: u32,
}

impl<R: RandomSource> TileDealer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, next_id: 1 }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Allocate a fresh tile id
    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Number tile with a value uniform over the difficulty's range
    pub fn number_tile(&mut self, params: &DifficultyParams) -> Tile {
        let span = params.max_value.saturating_sub(params.min_value) + 1;
        let value = params.min_value + self.rng.next_range(span);
        Tile::number(self.next_id(), value)
    }

    /// Tile for a refilled cell: bonus with the configured probability,
    /// otherwise a number tile.
    pub fn refill_tile(&mut self, params: &DifficultyParams) -> Tile {
        if self.rng.next_range(100) < params.bonus_chance_percent {
            Tile::bonus(self.next_id())
        } else {
            self.number_tile(params)
        }
    }
}

impl Default for TileDealer<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}

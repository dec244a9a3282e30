//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board engine and the selection/scoring rules.
//! It has **no dependencies** on timers, I/O or presentation, making it:
//!
//! - **Deterministic**: the same seed deals the same tiles and targets
//! - **Testable**: every rule is a plain function over values
//! - **Portable**: usable from the async turn controller, benches or tests
//!
//! # Module Structure
//!
//! - [`board`]: square tile grid and initial board generation
//! - [`gravity`]: column compaction and refill after a clear
//! - [`target`]: target derivation from a random walk over the board
//! - [`scoring`]: selection value, match evaluation and points
//! - [`rng`]: seedable randomness and the tile dealer
//!
//! # Example
//!
//! ```
//! use tile_tally_core::{create_board, derive_target, SimpleRng, TileDealer};
//! use tile_tally_types::GameConfig;
//!
//! let config = GameConfig::default();
//! let mut dealer = TileDealer::new(SimpleRng::new(12345));
//! let (board, new_ids) = create_board(&config, &mut dealer);
//! assert!(board.is_full());
//! assert_eq!(new_ids.len(), board.cells().len());
//!
//! let target = derive_target(&board, config.mode, dealer.rng_mut());
//! assert!(target >= 2);
//! ```

pub mod board;
pub mod gravity;
pub mod rng;
pub mod scoring;
pub mod target;

pub use tile_tally_types as types;

// Re-export commonly used types for convenience
pub use board::{create_board, Board, Cell};
pub use gravity::apply_gravity;
pub use rng::{RandomSource, SimpleRng, TileDealer};
pub use scoring::{
    evaluate, match_points, number_coords, selection_sum, selection_value, MatchOutcome,
    MatchTrigger,
};
pub use target::{derive_target, derive_target_path, Target};

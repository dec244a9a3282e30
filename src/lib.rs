//! Tile Tally (workspace facade crate).
//!
//! A tile-matching puzzle: select adjacent number tiles whose sum (or
//! product) equals the target before the clock runs out. This package
//! re-exports the workspace crates under one roof:
//!
//! - [`types`]: shared plain data (tiles, coordinates, config, input events)
//! - [`core`]: board engine and scoring rules
//! - [`engine`]: game state, actions and the reducer
//! - [`controller`]: turn controller, session drivers and timing config
//! - [`input`]: crossterm key and mouse mapping

pub use tile_tally_controller as controller;
pub use tile_tally_core as core;
pub use tile_tally_engine as engine;
pub use tile_tally_input as input;
pub use tile_tally_types as types;

//! Game state and reducer
//!
//! This crate owns the single authoritative [`GameState`] and the total
//! transition function [`reduce`]. Every legal transition is an [`Action`]
//! variant; the reducer is synchronous, never suspends and never performs
//! I/O. Side effects (sounds, persisted preferences) go through the
//! [`Platform`] trait, called by the session driver at the boundary.
//!
//! # Example
//!
//! ```
//! use tile_tally_core::{create_board, SimpleRng, TileDealer};
//! use tile_tally_engine::{reduce, Action, Deal, GameState};
//! use tile_tally_types::{GameConfig, GameStatus};
//!
//! let config = GameConfig::default();
//! let mut dealer = TileDealer::new(SimpleRng::new(7));
//! let deal = Deal::from(create_board(&config, &mut dealer));
//!
//! let state = GameState::new();
//! let state = reduce(&state, Action::StartGame { config, deal });
//! assert_eq!(state.status(), GameStatus::Playing);
//!
//! let state = reduce(&state, Action::PauseGame);
//! assert_eq!(state.status(), GameStatus::Paused);
//! ```

pub mod action;
pub mod platform;
pub mod reducer;
pub mod state;

pub use tile_tally_core as core;
pub use tile_tally_types as types;

pub use action::Action;
pub use platform::{
    load_preferences, persist_changes, MemoryPlatform, Platform, PreferenceKey, PreferenceValue,
};
pub use reducer::reduce;
pub use state::{
    AnimationFlags, Announcement, Deal, GameState, NumberParticle, Particle, PointerPosition,
    Preferences,
};

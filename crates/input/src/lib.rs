//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` events into [`crate::types::InputEvent`]s. Mouse
//! positions are resolved to board cells through a [`BoardViewport`]; keys
//! map to menu and preference events. Nothing here depends on a UI framework
//! or on the game state beyond the small [`KeyContext`] snapshot.

pub mod map;
pub mod pointer;

pub use tile_tally_types as types;

pub use map::{handle_key_event, should_quit, KeyContext};
pub use pointer::{map_mouse_event, BoardViewport};

//! Turn controller and session drivers
//!
//! The reducer only knows about single transitions. This crate turns them
//! into a playable game: the [`TurnController`] derives follow-up timers from
//! the state's phase flags, [`Session`] runs them in virtual time together
//! with match evaluation and platform side effects, and
//! [`spawn_session`] drives a session on a tokio task with a real clock.
//!
//! # Example
//!
//! ```
//! use tile_tally_controller::{Session, TimingConfig};
//! use tile_tally_types::{GameConfig, InputEvent};
//!
//! let mut session = Session::with_seed(42, TimingConfig::default());
//! session.handle_input(InputEvent::StartGame(GameConfig::default()));
//! assert_eq!(session.state().target(), 0);
//!
//! session.advance(450);
//! assert!(session.state().target() > 0);
//! ```

pub mod config;
pub mod error;
pub mod runtime;
pub mod session;
pub mod timers;
pub mod turn;

pub use tile_tally_core as core;
pub use tile_tally_engine as engine;
pub use tile_tally_types as types;

pub use config::TimingConfig;
pub use error::ControllerError;
pub use runtime::{spawn_session, Command, SessionHandle};
pub use session::Session;
pub use timers::{PendingTimer, TimerKey, TimerQueue};
pub use turn::TurnController;

//! Action catalogue
//!
//! Every legal state transition is one variant. Board-changing actions carry
//! the board computed by the board engine, so the reducer never needs a
//! random source.

use std::collections::BTreeSet;

use crate::state::{Announcement, Deal, Preferences};
use crate::types::{Coord, GameConfig, Theme, TileId};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fresh game for `config` on the dealt board
    StartGame { config: GameConfig, deal: Deal },
    /// Fresh game with the current config
    RestartGame { deal: Deal },
    PauseGame,
    ResumeGame,
    ReturnToMenu,
    /// One second of the countdown clock
    Tick,
    GameOver,
    PointerDown(Option<Coord>),
    PointerMove {
        coord: Option<Coord>,
        x: f32,
        y: f32,
    },
    PointerUp,
    /// `points` are already combo-weighted
    MatchSuccess { points: u32, coords: Vec<Coord> },
    MatchFailure,
    /// Post-gravity board after the cleared tiles were removed
    FinishClearing(Deal),
    StartBonusFall {
        tile_ids: BTreeSet<TileId>,
        time_to_add: u32,
    },
    /// Post-gravity board after the bonus tiles fell off
    FinishBonusFall(Deal),
    FinishTurn { target: u32 },
    ResetAnimations,
    AddAnnouncement(Announcement),
    RemoveAnnouncement(u32),
    RemoveParticle(u32),
    RemoveNumberParticle(u32),
    ToggleValueIndicatorPreference,
    SetVolume(f32),
    SetTheme(Theme),
    /// Values read from persistent storage at startup
    LoadPreferences {
        preferences: Preferences,
        best_score: u32,
    },
}

impl Action {
    /// Short name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::StartGame { .. } => "startGame",
            Action::RestartGame { .. } => "restartGame",
            Action::PauseGame => "pauseGame",
            Action::ResumeGame => "resumeGame",
            Action::ReturnToMenu => "returnToMenu",
            Action::Tick => "tick",
            Action::GameOver => "gameOver",
            Action::PointerDown(_) => "pointerDown",
            Action::PointerMove { .. } => "pointerMove",
            Action::PointerUp => "pointerUp",
            Action::MatchSuccess { .. } => "matchSuccess",
            Action::MatchFailure => "matchFailure",
            Action::FinishClearing(_) => "finishClearing",
            Action::StartBonusFall { .. } => "startBonusFall",
            Action::FinishBonusFall(_) => "finishBonusFall",
            Action::FinishTurn { .. } => "finishTurn",
            Action::ResetAnimations => "resetAnimations",
            Action::AddAnnouncement(_) => "addAnnouncement",
            Action::RemoveAnnouncement(_) => "removeAnnouncement",
            Action::RemoveParticle(_) => "removeParticle",
            Action::RemoveNumberParticle(_) => "removeNumberParticle",
            Action::ToggleValueIndicatorPreference => "toggleValueIndicatorPreference",
            Action::SetVolume(_) => "setVolume",
            Action::SetTheme(_) => "setTheme",
            Action::LoadPreferences { .. } => "loadPreferences",
        }
    }

    /// True for actions that originate from the player's pointer
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Action::PointerDown(_) | Action::PointerMove { .. } | Action::PointerUp
        )
    }
}

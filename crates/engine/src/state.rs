//! Game state - the single authoritative snapshot
//!
//! A [`GameState`] is only ever changed through [`crate::reduce`] /
//! [`GameState::apply`]. Everything a presentation layer needs is here:
//! screen, phase, board, selection, clock, score, combo and the transient
//! animation markers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{scoring, Board};
use crate::types::{Coord, FallStage, GameConfig, GameStatus, Screen, Theme, TileId};

/// A board plus the ids of the tiles freshly created for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub board: Board,
    pub new_ids: BTreeSet<TileId>,
}

impl Deal {
    pub fn new(board: Board, new_ids: BTreeSet<TileId>) -> Self {
        Self { board, new_ids }
    }

    /// A deal with no drop animation
    pub fn settled(board: Board) -> Self {
        Self {
            board,
            new_ids: BTreeSet::new(),
        }
    }
}

impl From<(Board, BTreeSet<TileId>)> for Deal {
    fn from((board, new_ids): (Board, BTreeSet<TileId>)) -> Self {
        Self { board, new_ids }
    }
}

/// One-shot animation cues, cleared by `ResetAnimations`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationFlags {
    pub score_flash: bool,
    pub target_matched: bool,
    pub incorrect_selection: bool,
}

impl AnimationFlags {
    pub fn any(&self) -> bool {
        self.score_flash || self.target_matched || self.incorrect_selection
    }
}

/// Timed banner message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: u32,
    pub text: String,
}

impl Announcement {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Burst effect over a cleared tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub coord: Coord,
}

/// Floating "+points" effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberParticle {
    pub id: u32,
    pub coord: Coord,
    pub points: u32,
}

/// Persisted player preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// 0.0 ..= 1.0
    pub volume: f32,
    pub theme: Theme,
    pub show_value_indicator: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 0.7,
            theme: Theme::default(),
            show_value_indicator: true,
        }
    }
}

/// Raw pointer position in presentation coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) screen: Screen,
    pub(crate) status: GameStatus,
    pub(crate) config: GameConfig,
    /// Monotonic session id (increments on start, restart and return to menu).
    ///
    /// Delayed follow-ups carry the id they were scheduled under and are
    /// dropped when it no longer matches.
    pub(crate) session: u32,
    pub(crate) board: Board,
    /// Zero while the first target of a game is pending
    pub(crate) target: u32,
    pub(crate) time_left: u32,
    pub(crate) score: u32,
    pub(crate) best_score: u32,
    pub(crate) combo: u32,
    pub(crate) selection: Vec<Coord>,
    pub(crate) is_selecting: bool,
    pub(crate) indicator_visible: bool,
    pub(crate) pointer: Option<PointerPosition>,
    pub(crate) clearing: Vec<Coord>,
    pub(crate) fall_stage: FallStage,
    pub(crate) dropping: BTreeSet<TileId>,
    pub(crate) falling_off: BTreeSet<TileId>,
    pub(crate) flags: AnimationFlags,
    pub(crate) announcements: Vec<Announcement>,
    pub(crate) particles: Vec<Particle>,
    pub(crate) number_particles: Vec<NumberParticle>,
    pub(crate) next_effect_id: u32,
    pub(crate) preferences: Preferences,
}

impl GameState {
    /// Start screen state with default preferences
    pub fn new() -> Self {
        Self::with_preferences(Preferences::default(), 0)
    }

    /// Start screen state with persisted values
    pub fn with_preferences(preferences: Preferences, best_score: u32) -> Self {
        let config = GameConfig::default();
        Self {
            screen: Screen::Start,
            status: GameStatus::Ready,
            config,
            session: 0,
            board: Board::empty(config.board_side),
            target: 0,
            time_left: 0,
            score: 0,
            best_score,
            combo: 0,
            selection: Vec::new(),
            is_selecting: false,
            indicator_visible: false,
            pointer: None,
            clearing: Vec::new(),
            fall_stage: FallStage::default(),
            dropping: BTreeSet::new(),
            falling_off: BTreeSet::new(),
            flags: AnimationFlags::default(),
            announcements: Vec::new(),
            particles: Vec::new(),
            number_particles: Vec::new(),
            next_effect_id: 1,
            preferences,
        }
    }

    /// Fresh game for `config`, keeping what outlives a game
    pub(crate) fn fresh_game(&self, config: GameConfig, deal: Deal) -> Self {
        let mut next = Self::with_preferences(self.preferences, self.best_score);
        next.screen = Screen::Game;
        next.status = GameStatus::Playing;
        next.config = config;
        next.session = self.session.wrapping_add(1);
        next.board = deal.board;
        next.dropping = deal.new_ids;
        next.time_left = config.params().start_seconds;
        next
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> u32 {
        self.session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn selection(&self) -> &[Coord] {
        &self.selection
    }

    pub fn is_selecting(&self) -> bool {
        self.is_selecting
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    pub fn pointer(&self) -> Option<PointerPosition> {
        self.pointer
    }

    pub fn clearing(&self) -> &[Coord] {
        &self.clearing
    }

    pub fn fall_stage(&self) -> FallStage {
        self.fall_stage
    }

    pub fn dropping(&self) -> &BTreeSet<TileId> {
        &self.dropping
    }

    pub fn falling_off(&self) -> &BTreeSet<TileId> {
        &self.falling_off
    }

    pub fn flags(&self) -> AnimationFlags {
        self.flags
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn number_particles(&self) -> &[NumberParticle] {
        &self.number_particles
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Current value of the selection under the game's mode
    pub fn selection_value(&self) -> u64 {
        scoring::selection_value(&self.selection, &self.board, self.config.mode)
    }

    /// Value for the drag indicator, when it is shown
    pub fn indicator_value(&self) -> Option<u64> {
        (self.indicator_visible && self.preferences.show_value_indicator)
            .then(|| self.selection_value())
    }

    /// True while any one-shot animation marker is pending cleanup
    pub fn has_transient_animations(&self) -> bool {
        self.flags.any() || !self.dropping.is_empty()
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing && self.target > 0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();
        assert_eq!(state.status(), GameStatus::Ready);
        assert_eq!(state.screen(), Screen::Start);
        assert_eq!(state.session(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.target(), 0);
        assert!(state.selection().is_empty());
        assert!(!state.has_transient_animations());
    }

    #[test]
    fn test_fresh_game_keeps_best_and_preferences() {
        let prefs = Preferences {
            volume: 0.2,
            theme: Theme::Neon,
            show_value_indicator: false,
        };
        let state = GameState::with_preferences(prefs, 250);
        let config = GameConfig {
            difficulty: Difficulty::Hard,
            ..GameConfig::default()
        };
        let board = Board::empty(config.board_side);
        let next = state.fresh_game(config, Deal::settled(board));

        assert_eq!(next.best_score(), 250);
        assert_eq!(next.preferences(), &prefs);
        assert_eq!(next.session(), 1);
        assert_eq!(next.time_left(), 60);
        assert_eq!(next.status(), GameStatus::Playing);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new();
        let v = serde_json::to_value(&state).unwrap();
        assert_eq!(v["status"], "ready");
        assert_eq!(v["screen"], "start");
        assert!(v.get("board").is_some());
        assert!(v.get("dropping").is_some());
    }
}

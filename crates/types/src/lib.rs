//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond small helpers, so they can
//! be shared by the board engine, the reducer, the turn controller and any
//! presentation layer that consumes state snapshots.
//!
//! # Board
//!
//! - **Side**: square grid, [`DEFAULT_BOARD_SIDE`] cells per side unless configured
//! - **Coordinates**: `(row, col)`, row 0 is the top row, gravity pulls toward
//!   the last row
//!
//! # Timing Constants
//!
//! Animation durations are in milliseconds and are mirrored by the turn
//! controller's timing configuration:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 1000 | Countdown clock period |
//! | `DROP_ANIMATION_MS` | 450 | Tiles dropping into place |
//! | `CLEAR_ANIMATION_MS` | 300 | Matched tiles vanishing |
//! | `FALL_OFF_ANIMATION_MS` | 500 | Bonus tiles falling off the bottom row |
//! | `ANIMATION_RESET_MS` | 600 | Lifetime of one-shot flashes and shakes |
//! | `ANNOUNCEMENT_MS` | 1500 | Banner display time |
//!
//! # Scoring
//!
//! Points for a match are `ceil(sum × (1 + combo × 0.1))`, computed in whole
//! tenths so that no floating point rounding leaks into the score.
//!
//! # Examples
//!
//! ```
//! use tile_tally_types::{Coord, Difficulty, GameMode, SelectionMode};
//!
//! assert_eq!(GameMode::from_str("multiply"), Some(GameMode::Multiply));
//! assert_eq!(SelectionMode::from_str("TAP"), Some(SelectionMode::Tap));
//!
//! let params = Difficulty::Medium.params(GameMode::Sum);
//! assert_eq!((params.min_value, params.max_value), (1, 9));
//!
//! let a = Coord::new(2, 2);
//! assert!(a.is_adjacent8(Coord::new(3, 3)));
//! assert!(!a.is_adjacent8(Coord::new(4, 2)));
//! ```

use serde::{Deserialize, Serialize};

/// Default board side length (6x6 grid)
pub const DEFAULT_BOARD_SIDE: u8 = 6;

/// Smallest supported board side
pub const MIN_BOARD_SIDE: u8 = 2;

/// Largest supported board side
pub const MAX_BOARD_SIDE: u8 = 12;

/// Target used when the board cannot supply two number tiles
pub const DEFAULT_TARGET: u32 = 10;

/// Seconds credited for each bonus tile that reaches the bottom row
pub const BONUS_SECONDS_PER_TILE: u32 = 10;

/// Combo multiplier step, in tenths (0.1 per consecutive match)
pub const COMBO_STEP_TENTHS: u64 = 1;

/// Combo count from which a banner is announced
pub const COMBO_ANNOUNCE_MIN: u32 = 3;

/// Countdown clock period (1 Hz)
pub const TICK_MS: u64 = 1000;

/// Tile drop animation length
pub const DROP_ANIMATION_MS: u64 = 450;

/// Matched-tile clear animation length
pub const CLEAR_ANIMATION_MS: u64 = 300;

/// Bonus tile fall-off animation length
pub const FALL_OFF_ANIMATION_MS: u64 = 500;

/// Lifetime of one-shot animation flags
pub const ANIMATION_RESET_MS: u64 = 600;

/// Banner display time
pub const ANNOUNCEMENT_MS: u64 = 1500;


/// Opaque tile identity, unique for the lifetime of one tile dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// What a tile is worth.
///
/// - **Number**: contributes its value to a selection
/// - **Bonus**: contributes nothing; grants time when it reaches the bottom row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum TileKind {
    Number(u32),
    Bonus,
}

/// A placed tile. Immutable; a refill always creates a new tile with a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
}

impl Tile {
    pub fn number(id: TileId, value: u32) -> Self {
        Self {
            id,
            kind: TileKind::Number(value),
        }
    }

    pub fn bonus(id: TileId) -> Self {
        Self {
            id,
            kind: TileKind::Bonus,
        }
    }

    /// Numeric value, `None` for bonus tiles
    pub fn value(&self) -> Option<u32> {
        match self.kind {
            TileKind::Number(v) => Some(v),
            TileKind::Bonus => None,
        }
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, TileKind::Bonus)
    }
}

/// A grid position, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Chebyshev (king-move) distance
    pub fn chebyshev(&self, other: Coord) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// 8-directional neighbour (excludes self)
    pub fn is_adjacent8(&self, other: Coord) -> bool {
        self.chebyshev(other) == 1
    }

    /// 4-directional neighbour
    pub fn is_adjacent4(&self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    pub fn in_bounds(&self, side: u8) -> bool {
        self.row < side && self.col < side
    }
}

/// How selected tiles are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Sum,
    Multiply,
}

impl GameMode {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sum" | "add" => Some(GameMode::Sum),
            "multiply" | "product" | "mul" => Some(GameMode::Multiply),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Sum => "sum",
            GameMode::Multiply => "multiply",
        }
    }
}

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Tuning for one `(difficulty, mode)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyParams {
    /// Smallest number tile value (inclusive)
    pub min_value: u32,
    /// Largest number tile value (inclusive)
    pub max_value: u32,
    /// Clock at game start, in seconds
    pub start_seconds: u32,
    /// Chance that a refilled cell becomes a bonus tile
    pub bonus_chance_percent: u32,
}

impl Difficulty {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "m" | "normal" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Multiply mode uses smaller values so products stay readable.
    pub fn params(&self, mode: GameMode) -> DifficultyParams {
        let (min_value, max_value, start_seconds, bonus_chance_percent) = match (mode, self) {
            (GameMode::Sum, Difficulty::Easy) => (1, 5, 120, 10),
            (GameMode::Sum, Difficulty::Medium) => (1, 9, 90, 7),
            (GameMode::Sum, Difficulty::Hard) => (2, 15, 60, 5),
            (GameMode::Multiply, Difficulty::Easy) => (1, 4, 120, 10),
            (GameMode::Multiply, Difficulty::Medium) => (1, 6, 90, 7),
            (GameMode::Multiply, Difficulty::Hard) => (2, 9, 60, 5),
        };
        DifficultyParams {
            min_value,
            max_value,
            start_seconds,
            bonus_chance_percent,
        }
    }
}

/// How the player builds a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Continuous pointer drag through 8-adjacent tiles
    #[default]
    Drag,
    /// Discrete taps toggling membership
    Tap,
}

impl SelectionMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drag" => Some(SelectionMode::Drag),
            "tap" => Some(SelectionMode::Tap),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Drag => "drag",
            SelectionMode::Tap => "tap",
        }
    }
}

/// Per-game configuration, fixed from StartGame until the next reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub selection_mode: SelectionMode,
    pub board_side: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            selection_mode: SelectionMode::default(),
            board_side: DEFAULT_BOARD_SIDE,
        }
    }
}

impl GameConfig {
    pub fn new(mode: GameMode, difficulty: Difficulty, selection_mode: SelectionMode) -> Self {
        Self {
            mode,
            difficulty,
            selection_mode,
            board_side: DEFAULT_BOARD_SIDE,
        }
    }

    /// Board side clamped to `MIN_BOARD_SIDE..=MAX_BOARD_SIDE`
    pub fn with_board_side(mut self, side: u8) -> Self {
        self.board_side = side.clamp(MIN_BOARD_SIDE, MAX_BOARD_SIDE);
        self
    }

    pub fn params(&self) -> DifficultyParams {
        self.difficulty.params(self.mode)
    }
}

/// Game phase state machine
///
/// `Clearing` and `Falling` are transient and only entered through the turn
/// controller's follow-up actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Ready,
    Playing,
    Paused,
    Clearing,
    Falling,
    GameOver,
}

/// Sub-phase of `GameStatus::Falling`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallStage {
    /// Post-clear drop; bottom row not yet reviewed for bonus tiles
    #[default]
    Settling,
    /// Bonus tiles are animating off the board
    FallingOff,
    /// Post-bonus drop; the next target is pending
    Resettling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Start,
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Dark,
    Neon,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Theme::Classic),
            "dark" => Some(Theme::Dark),
            "neon" => Some(Theme::Neon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Dark => "dark",
            Theme::Neon => "neon",
        }
    }
}

/// Sound cues handed to the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundKey {
    Select,
    Match,
    Fail,
    Bonus,
    GameOver,
}

impl SoundKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKey::Select => "select",
            SoundKey::Match => "match",
            SoundKey::Fail => "fail",
            SoundKey::Bonus => "bonus",
            SoundKey::GameOver => "game_over",
        }
    }
}

/// Discrete input events consumed by a game session
///
/// Pointer coordinates are already resolved to a grid cell (or `None` when
/// the pointer is outside the board). `x`/`y` carry the raw pointer position
/// for the selection-value indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Option<Coord>),
    PointerMove { coord: Option<Coord>, x: f32, y: f32 },
    PointerUp,
    /// Countdown clock tick (1 Hz)
    Tick,
    StartGame(GameConfig),
    Restart,
    Pause,
    Resume,
    ReturnToMenu,
    ToggleValueIndicator,
    SetVolume(f32),
    SetTheme(Theme),
}

//! Key mapping from terminal events to game input.

use crate::types::{GameConfig, GameStatus, InputEvent, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Volume change per key press
const VOLUME_STEP: f32 = 0.1;

/// What the key map needs to know about the current game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyContext {
    pub status: GameStatus,
    /// Config used when a game is started from the keyboard
    pub config: GameConfig,
    pub volume: f32,
    pub theme: Theme,
}

/// Map keyboard input to game input events.
pub fn handle_key_event(key: KeyEvent, ctx: &KeyContext) -> Option<InputEvent> {
    match key.code {
        // Start a game from the menu or the game-over screen
        KeyCode::Enter => match ctx.status {
            GameStatus::Ready | GameStatus::GameOver => Some(InputEvent::StartGame(ctx.config)),
            _ => None,
        },

        // Pause toggles
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => match ctx.status {
            GameStatus::Playing => Some(InputEvent::Pause),
            GameStatus::Paused => Some(InputEvent::Resume),
            _ => None,
        },

        KeyCode::Char('r') | KeyCode::Char('R') => match ctx.status {
            GameStatus::Ready => None,
            _ => Some(InputEvent::Restart),
        },
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => Some(InputEvent::ReturnToMenu),

        // Preferences
        KeyCode::Char('v') | KeyCode::Char('V') => Some(InputEvent::ToggleValueIndicator),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(InputEvent::SetVolume((ctx.volume + VOLUME_STEP).min(1.0)))
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            Some(InputEvent::SetVolume((ctx.volume - VOLUME_STEP).max(0.0)))
        }
        KeyCode::Char('t') | KeyCode::Char('T') => Some(InputEvent::SetTheme(next_theme(ctx.theme))),

        _ => None,
    }
}

fn next_theme(theme: Theme) -> Theme {
    match theme {
        Theme::Classic => Theme::Dark,
        Theme::Dark => Theme::Neon,
        Theme::Neon => Theme::Classic,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

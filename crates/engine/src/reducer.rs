//! Reducer - the total transition function
//!
//! [`reduce`] never mutates its input and never performs I/O. Actions whose
//! precondition does not hold leave the state unchanged; [`GameState::apply`]
//! reports whether anything changed so callers can skip redundant work.

use crate::action::Action;
use crate::core::Board;
use crate::state::{GameState, NumberParticle, Particle, PointerPosition};
use crate::types::{Coord, FallStage, GameStatus, SelectionMode};

/// Apply `action` to a copy of `state`
pub fn reduce(state: &GameState, action: Action) -> GameState {
    let mut next = state.clone();
    next.apply(action);
    next
}

impl GameState {
    /// Apply an action in place. Returns false when the action was a no-op.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::StartGame { config, deal } => {
                *self = self.fresh_game(config, deal);
                true
            }
            Action::RestartGame { deal } => {
                let config = self.config;
                *self = self.fresh_game(config, deal);
                true
            }
            Action::PauseGame => {
                if self.status != GameStatus::Playing {
                    return false;
                }
                self.status = GameStatus::Paused;
                // An interrupted drag can never be released, so drop its path
                if self.config.selection_mode == SelectionMode::Drag {
                    self.selection.clear();
                }
                self.end_drag();
                true
            }
            Action::ResumeGame => {
                if self.status != GameStatus::Paused {
                    return false;
                }
                self.status = GameStatus::Playing;
                true
            }
            Action::ReturnToMenu => {
                let mut next = Self::with_preferences(self.preferences, self.best_score);
                next.config = self.config;
                next.board = Board::empty(self.config.board_side);
                next.session = self.session.wrapping_add(1);
                *self = next;
                true
            }
            Action::Tick => {
                if self.status != GameStatus::Playing || self.time_left == 0 {
                    return false;
                }
                self.time_left -= 1;
                true
            }
            Action::GameOver => {
                if self.status == GameStatus::GameOver {
                    return false;
                }
                self.status = GameStatus::GameOver;
                self.selection.clear();
                self.end_drag();
                true
            }
            Action::PointerDown(coord) => self.pointer_down(coord),
            Action::PointerMove { coord, x, y } => self.pointer_move(coord, x, y),
            Action::PointerUp => {
                if self.config.selection_mode != SelectionMode::Drag || !self.is_selecting {
                    return false;
                }
                self.end_drag();
                true
            }
            Action::MatchSuccess { points, coords } => self.match_success(points, coords),
            Action::MatchFailure => {
                self.flags.incorrect_selection = true;
                self.selection.clear();
                self.end_drag();
                self.combo = 0;
                true
            }
            Action::FinishClearing(deal) => {
                if self.status != GameStatus::Clearing {
                    return false;
                }
                self.board = deal.board;
                self.dropping = deal.new_ids;
                self.clearing.clear();
                self.status = GameStatus::Falling;
                self.fall_stage = FallStage::Settling;
                true
            }
            Action::StartBonusFall {
                tile_ids,
                time_to_add,
            } => {
                if self.status != GameStatus::Falling || self.fall_stage != FallStage::Settling {
                    return false;
                }
                self.falling_off = tile_ids;
                self.time_left = self.time_left.saturating_add(time_to_add);
                self.fall_stage = FallStage::FallingOff;
                true
            }
            Action::FinishBonusFall(deal) => {
                if self.status != GameStatus::Falling || self.fall_stage != FallStage::FallingOff {
                    return false;
                }
                self.board = deal.board;
                self.dropping = deal.new_ids;
                self.falling_off.clear();
                self.fall_stage = FallStage::Resettling;
                true
            }
            Action::FinishTurn { target } => {
                let awaiting_first = self.status == GameStatus::Playing && self.target == 0;
                if self.status != GameStatus::Falling && !awaiting_first {
                    return false;
                }
                self.status = GameStatus::Playing;
                self.fall_stage = FallStage::Settling;
                self.target = target;
                self.selection.clear();
                true
            }
            Action::ResetAnimations => {
                if !self.has_transient_animations() {
                    return false;
                }
                self.flags = Default::default();
                self.dropping.clear();
                true
            }
            Action::AddAnnouncement(announcement) => {
                if self.announcements.iter().any(|a| a.id == announcement.id) {
                    return false;
                }
                self.announcements.push(announcement);
                true
            }
            Action::RemoveAnnouncement(id) => {
                let before = self.announcements.len();
                self.announcements.retain(|a| a.id != id);
                self.announcements.len() != before
            }
            Action::RemoveParticle(id) => {
                let before = self.particles.len();
                self.particles.retain(|p| p.id != id);
                self.particles.len() != before
            }
            Action::RemoveNumberParticle(id) => {
                let before = self.number_particles.len();
                self.number_particles.retain(|p| p.id != id);
                self.number_particles.len() != before
            }
            Action::ToggleValueIndicatorPreference => {
                self.preferences.show_value_indicator = !self.preferences.show_value_indicator;
                true
            }
            Action::SetVolume(volume) => {
                if volume.is_nan() {
                    return false;
                }
                self.preferences.volume = volume.clamp(0.0, 1.0);
                true
            }
            Action::SetTheme(theme) => {
                if self.preferences.theme == theme {
                    return false;
                }
                self.preferences.theme = theme;
                true
            }
            Action::LoadPreferences {
                preferences,
                best_score,
            } => {
                self.preferences = preferences;
                self.best_score = self.best_score.max(best_score);
                true
            }
        }
    }

    fn end_drag(&mut self) {
        self.is_selecting = false;
        self.indicator_visible = false;
        self.pointer = None;
    }

    fn pointer_down(&mut self, coord: Option<Coord>) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(coord) = coord else {
            return false;
        };
        if !self.board.is_occupied(coord) {
            return false;
        }

        match self.config.selection_mode {
            SelectionMode::Tap => {
                match self.selection.iter().position(|&c| c == coord) {
                    Some(pos) => {
                        self.selection.remove(pos);
                    }
                    None => self.selection.push(coord),
                }
                true
            }
            SelectionMode::Drag => {
                self.selection = vec![coord];
                self.is_selecting = true;
                self.indicator_visible = true;
                true
            }
        }
    }

    fn pointer_move(&mut self, coord: Option<Coord>, x: f32, y: f32) -> bool {
        if self.config.selection_mode != SelectionMode::Drag
            || !self.is_selecting
            || self.status != GameStatus::Playing
        {
            return false;
        }
        self.pointer = Some(PointerPosition { x, y });

        let Some(coord) = coord else {
            return true;
        };
        if !self.board.is_occupied(coord) {
            return true;
        }

        let len = self.selection.len();
        if len >= 2 && self.selection[len - 2] == coord {
            // Backtracking onto the previous tile undoes the last step
            self.selection.pop();
        } else if self.selection.contains(&coord) {
            // Re-entering an earlier tile is ignored
        } else if self
            .selection
            .last()
            .is_some_and(|last| last.is_adjacent8(coord))
        {
            self.selection.push(coord);
        }
        true
    }

    fn match_success(&mut self, points: u32, coords: Vec<Coord>) -> bool {
        self.score = self.score.saturating_add(points);
        self.best_score = self.best_score.max(self.score);
        self.combo = self.combo.saturating_add(1);
        self.status = GameStatus::Clearing;
        self.selection.clear();
        self.end_drag();

        for &coord in &coords {
            let id = self.next_effect_id();
            self.particles.push(Particle { id, coord });
        }
        if let Some(&coord) = coords.last() {
            let id = self.next_effect_id();
            self.number_particles.push(NumberParticle { id, coord, points });
        }

        self.clearing = coords;
        self.flags.score_flash = true;
        self.flags.target_matched = true;
        true
    }

    fn next_effect_id(&mut self) -> u32 {
        let id = self.next_effect_id;
        self.next_effect_id = self.next_effect_id.wrapping_add(1);
        id
    }
}

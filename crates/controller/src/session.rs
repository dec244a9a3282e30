//! Synchronous game session
//!
//! [`Session`] glues the pieces together in virtual time: it owns the state,
//! the turn controller, the tile dealer and the platform. Input goes in
//! through [`Session::handle_input`], time moves forward through
//! [`Session::advance`], and every state change passes through
//! [`Session::dispatch`].

use tracing::{debug, info};

use crate::config::TimingConfig;
use crate::core::{
    apply_gravity, create_board, derive_target, scoring, MatchOutcome, MatchTrigger,
    RandomSource, SimpleRng, TileDealer,
};
use crate::engine::{
    load_preferences, persist_changes, Action, Announcement, Deal, GameState, MemoryPlatform,
    Platform,
};
use crate::timers::{PendingTimer, TimerKey};
use crate::turn::TurnController;
use crate::types::{
    Coord, GameConfig, GameStatus, InputEvent, SoundKey, BONUS_SECONDS_PER_TILE,
    COMBO_ANNOUNCE_MIN,
};

#[derive(Debug)]
pub struct Session<R = SimpleRng, P = MemoryPlatform> {
    state: GameState,
    controller: TurnController,
    dealer: TileDealer<R>,
    platform: P,
    now_ms: u64,
    next_announcement_id: u32,
}

impl Session<SimpleRng, MemoryPlatform> {
    /// Seeded session on an in-memory platform
    pub fn with_seed(seed: u32, timing: TimingConfig) -> Self {
        Self::new(SimpleRng::new(seed), MemoryPlatform::new(), timing)
    }
}

impl<R: RandomSource, P: Platform> Session<R, P> {
    /// New session on the start screen, with preferences loaded from `platform`
    pub fn new(rng: R, platform: P, timing: TimingConfig) -> Self {
        let (preferences, best_score) = load_preferences(&platform);
        let mut state = GameState::new();
        state.apply(Action::LoadPreferences {
            preferences,
            best_score,
        });
        Self {
            state,
            controller: TurnController::new(timing),
            dealer: TileDealer::new(rng),
            platform,
            now_ms: 0,
            next_announcement_id: 1,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timing(&self) -> TimingConfig {
        *self.controller.timing()
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Absolute time of the next pending timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.controller.next_due()
    }

    /// Apply one action and run the boundary side effects.
    ///
    /// Returns false when the reducer left the state unchanged.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let kind = action.as_str();
        let mut next = self.state.clone();
        if !next.apply(action) {
            debug!(action = kind, "no-op");
            return false;
        }
        debug!(action = kind, session = next.session(), "dispatch");
        let before = std::mem::replace(&mut self.state, next);

        self.play_cues(&before);
        persist_changes(&mut self.platform, &before, &self.state);
        self.log_lifecycle(&before);

        let combo = self.state.combo();
        if combo > before.combo() && combo >= COMBO_ANNOUNCE_MIN {
            self.announce(format!("Combo x{combo}"));
        }

        self.controller.observe(&self.state, self.now_ms);
        true
    }

    fn play_cues(&mut self, before: &GameState) {
        let after = &self.state;
        let mut cues = Vec::new();
        if after.selection().len() > before.selection().len() {
            cues.push(SoundKey::Select);
        }
        if after.status() == GameStatus::Clearing && before.status() != GameStatus::Clearing {
            cues.push(SoundKey::Match);
        }
        if after.flags().incorrect_selection && !before.flags().incorrect_selection {
            cues.push(SoundKey::Fail);
        }
        if !after.falling_off().is_empty() && before.falling_off().is_empty() {
            cues.push(SoundKey::Bonus);
        }
        if after.status() == GameStatus::GameOver && before.status() != GameStatus::GameOver {
            cues.push(SoundKey::GameOver);
        }
        for cue in cues {
            self.platform.play(cue);
        }
    }

    fn log_lifecycle(&self, before: &GameState) {
        let state = &self.state;
        if state.session() != before.session() && state.status() == GameStatus::Playing {
            info!(
                session = state.session(),
                mode = state.config().mode.as_str(),
                difficulty = state.config().difficulty.as_str(),
                "game started"
            );
        }
        if state.status() == GameStatus::GameOver && before.status() != GameStatus::GameOver {
            info!(
                session = state.session(),
                score = state.score(),
                best_score = state.best_score(),
                "game over"
            );
        }
    }

    fn announce(&mut self, text: String) {
        let id = self.next_announcement_id;
        self.next_announcement_id = self.next_announcement_id.wrapping_add(1);
        self.dispatch(Action::AddAnnouncement(Announcement::new(id, text)));
    }

    /// Feed one input event, then fire anything already due
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let changed = match event {
            InputEvent::PointerDown(coord) => {
                let coord = self.on_board(coord);
                let changed = self.dispatch(Action::PointerDown(coord));
                if changed {
                    self.evaluate(MatchTrigger::SelectionChanged);
                }
                changed
            }
            InputEvent::PointerMove { coord, x, y } => {
                let coord = self.on_board(coord);
                self.dispatch(Action::PointerMove { coord, x, y })
            }
            InputEvent::PointerUp => {
                let changed = self.dispatch(Action::PointerUp);
                if changed {
                    self.evaluate(MatchTrigger::PointerReleased);
                }
                changed
            }
            InputEvent::Tick => self.dispatch(Action::Tick),
            InputEvent::StartGame(config) => self.start_game(config),
            InputEvent::Restart => self.restart(),
            InputEvent::Pause => self.dispatch(Action::PauseGame),
            InputEvent::Resume => self.dispatch(Action::ResumeGame),
            InputEvent::ReturnToMenu => self.dispatch(Action::ReturnToMenu),
            InputEvent::ToggleValueIndicator => {
                self.dispatch(Action::ToggleValueIndicatorPreference)
            }
            InputEvent::SetVolume(volume) => self.dispatch(Action::SetVolume(volume)),
            InputEvent::SetTheme(theme) => self.dispatch(Action::SetTheme(theme)),
        };
        self.run_due();
        changed
    }

    fn on_board(&self, coord: Option<Coord>) -> Option<Coord> {
        coord.filter(|&c| self.state.board().in_bounds(c))
    }

    fn start_game(&mut self, config: GameConfig) -> bool {
        let config = config.with_board_side(config.board_side);
        let deal = Deal::from(create_board(&config, &mut self.dealer));
        self.dispatch(Action::StartGame { config, deal })
    }

    fn restart(&mut self) -> bool {
        let config = *self.state.config();
        info!(session = self.state.session(), "restart");
        let deal = Deal::from(create_board(&config, &mut self.dealer));
        self.dispatch(Action::RestartGame { deal })
    }

    fn evaluate(&mut self, trigger: MatchTrigger) {
        let state = &self.state;
        if !state.playable() {
            return;
        }
        let outcome = scoring::evaluate(
            state.selection(),
            state.board(),
            state.config(),
            state.target(),
            state.combo(),
            trigger,
        );
        match outcome {
            MatchOutcome::Success { points, coords } => {
                self.dispatch(Action::MatchSuccess { points, coords });
            }
            MatchOutcome::Failure => {
                self.dispatch(Action::MatchFailure);
            }
            MatchOutcome::Pending => {}
        }
    }

    /// Move virtual time forward, firing due timers in order
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.advance_to(self.now_ms.saturating_add(elapsed_ms));
    }

    /// Move virtual time to `target_ms` (never backwards)
    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some(timer) = self.controller.pop_due(target_ms) {
            self.now_ms = self.now_ms.max(timer.due_ms);
            self.fire(timer);
        }
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Fire timers already due at the current time
    pub fn run_due(&mut self) {
        self.advance_to(self.now_ms);
    }

    fn fire(&mut self, timer: PendingTimer) {
        if !self.controller.is_live(&timer, &self.state) {
            debug!(timer = timer.key.as_str(), session = timer.session, "skip stale timer");
            return;
        }
        debug!(timer = timer.key.as_str(), now_ms = self.now_ms, "fire");

        let config = *self.state.config();
        match timer.key {
            TimerKey::FirstTarget => {
                self.finish_turn();
                self.dispatch(Action::ResetAnimations);
            }
            TimerKey::Clear => {
                let emptied = self.state.board().without_coords(self.state.clearing());
                let deal = apply_gravity(&emptied, config.mode, config.difficulty, &mut self.dealer);
                self.dispatch(Action::FinishClearing(deal.into()));
            }
            TimerKey::FallReview => {
                let board = self.state.board();
                let bonus = board.bonus_ids_in_row(board.bottom_row());
                if bonus.is_empty() {
                    self.finish_turn();
                } else {
                    let seconds = BONUS_SECONDS_PER_TILE.saturating_mul(bonus.len() as u32);
                    if self.dispatch(Action::StartBonusFall {
                        tile_ids: bonus,
                        time_to_add: seconds,
                    }) {
                        self.announce(format!("+{seconds}s"));
                    }
                }
            }
            TimerKey::BonusFallOff => {
                let remaining = self.state.board().without_tiles(self.state.falling_off());
                let deal =
                    apply_gravity(&remaining, config.mode, config.difficulty, &mut self.dealer);
                self.dispatch(Action::FinishBonusFall(deal.into()));
            }
            TimerKey::FinalTarget => self.finish_turn(),
            TimerKey::AnimationReset => {
                self.dispatch(Action::ResetAnimations);
            }
            TimerKey::Timeout => {
                self.dispatch(Action::GameOver);
            }
            TimerKey::AnnouncementExpiry(id) => {
                self.dispatch(Action::RemoveAnnouncement(id));
            }
        }
    }

    fn finish_turn(&mut self) {
        let target = derive_target(
            self.state.board(),
            self.state.config().mode,
            self.dealer.rng_mut(),
        );
        self.dispatch(Action::FinishTurn { target });
    }
}

//! Turn controller
//!
//! The controller never holds callbacks. After every transition it looks at
//! the state's phase flags, works out which follow-up timers should be
//! pending and reconciles its queue against that. A turn therefore runs as a
//! chain of timers, each one scheduled by the state the previous one left
//! behind:
//!
//! ```text
//! Playing(target 0) --FirstTarget--> Playing
//! Clearing --Clear--> Falling/Settling --FallReview--> Playing
//!                                        \--> Falling/FallingOff --BonusFallOff-->
//!                                             Falling/Resettling --FinalTarget--> Playing
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::TimingConfig;
use crate::engine::{AnimationFlags, GameState};
use crate::timers::{PendingTimer, TimerKey, TimerQueue};
use crate::types::{FallStage, GameStatus, TileId};

const PHASE_TIMERS: [TimerKey; 6] = [
    TimerKey::FirstTarget,
    TimerKey::Clear,
    TimerKey::FallReview,
    TimerKey::BonusFallOff,
    TimerKey::FinalTarget,
    TimerKey::Timeout,
];

/// Snapshot of the one-shot animation markers
#[derive(Debug, Clone, PartialEq, Eq)]
struct Markers {
    flags: AnimationFlags,
    dropping: BTreeSet<TileId>,
}

impl Markers {
    fn of(state: &GameState) -> Self {
        Self {
            flags: state.flags(),
            dropping: state.dropping().clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurnController {
    timing: TimingConfig,
    queue: TimerQueue,
    markers: Option<Markers>,
}

impl TurnController {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            queue: TimerQueue::new(),
            markers: None,
        }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn queue(&self) -> &TimerQueue {
        &self.queue
    }

    /// Delay before `key` should fire, or `None` when the state does not
    /// want it. Only meaningful for phase timers.
    fn phase_delay(&self, key: TimerKey, state: &GameState) -> Option<u64> {
        let status = state.status();
        let falling = |stage| status == GameStatus::Falling && state.fall_stage() == stage;
        let wanted = match key {
            TimerKey::FirstTarget => {
                status == GameStatus::Playing && state.target() == 0 && state.time_left() > 0
            }
            TimerKey::Clear => status == GameStatus::Clearing && !state.clearing().is_empty(),
            TimerKey::FallReview => falling(FallStage::Settling),
            TimerKey::BonusFallOff => falling(FallStage::FallingOff),
            TimerKey::FinalTarget => falling(FallStage::Resettling),
            TimerKey::Timeout => status == GameStatus::Playing && state.time_left() == 0,
            TimerKey::AnimationReset | TimerKey::AnnouncementExpiry(_) => false,
        };
        let delay = match key {
            TimerKey::FirstTarget | TimerKey::FallReview | TimerKey::FinalTarget => {
                self.timing.drop_ms
            }
            TimerKey::Clear => self.timing.clear_ms,
            TimerKey::BonusFallOff => self.timing.fall_off_ms,
            _ => 0,
        };
        wanted.then_some(delay)
    }

    /// Reconcile pending timers with `state` at virtual time `now_ms`
    pub fn observe(&mut self, state: &GameState, now_ms: u64) {
        let session = state.session();
        let before = self.queue.len();
        self.queue.retain(|t| t.session == session);
        if self.queue.len() != before {
            debug!(session, dropped = before - self.queue.len(), "dropped stale timers");
        }

        for key in PHASE_TIMERS {
            match (self.phase_delay(key, state), self.queue.contains(key)) {
                (Some(delay), false) => self.schedule(key, session, now_ms + delay),
                (None, true) => {
                    self.queue.cancel(key);
                }
                _ => {}
            }
        }

        // Any change in the marker set restarts the reset watch
        let markers = Markers::of(state);
        if state.has_transient_animations() {
            if self.markers.as_ref() != Some(&markers)
                || !self.queue.contains(TimerKey::AnimationReset)
            {
                self.schedule(
                    TimerKey::AnimationReset,
                    session,
                    now_ms + self.timing.animation_reset_ms,
                );
            }
        } else {
            self.queue.cancel(TimerKey::AnimationReset);
        }
        self.markers = Some(markers);

        let live: BTreeSet<u32> = state.announcements().iter().map(|a| a.id).collect();
        self.queue.retain(|t| match t.key {
            TimerKey::AnnouncementExpiry(id) => live.contains(&id),
            _ => true,
        });
        for id in live {
            let key = TimerKey::AnnouncementExpiry(id);
            if !self.queue.contains(key) {
                self.schedule(key, session, now_ms + self.timing.announcement_ms);
            }
        }
    }

    fn schedule(&mut self, key: TimerKey, session: u32, due_ms: u64) {
        debug!(timer = key.as_str(), session, due_ms, "schedule");
        self.queue.schedule(key, session, due_ms);
    }

    pub fn next_due(&self) -> Option<u64> {
        self.queue.next_due()
    }

    pub fn pop_due(&mut self, now_ms: u64) -> Option<PendingTimer> {
        self.queue.pop_due(now_ms)
    }

    /// Liveness check for a fired timer against the freshest state
    pub fn is_live(&self, timer: &PendingTimer, state: &GameState) -> bool {
        if timer.session != state.session() {
            return false;
        }
        match timer.key {
            TimerKey::AnimationReset => state.has_transient_animations(),
            TimerKey::AnnouncementExpiry(id) => state.announcements().iter().any(|a| a.id == id),
            key => self.phase_delay(key, state).is_some(),
        }
    }

    /// Forget everything pending
    pub fn reset(&mut self) {
        self.queue.clear();
        self.markers = None;
    }
}

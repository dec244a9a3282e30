//! Keyed timer queue
//!
//! A small virtual-time queue. Each pending timer is keyed, so scheduling a
//! key that is already pending replaces it (this is how a watch restarts),
//! and carries the session id it was scheduled under.

/// Follow-up timers owned by the turn controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// First target of a game, after the initial drop
    FirstTarget,
    /// Matched tiles finished vanishing
    Clear,
    /// Post-clear drop finished; review the bottom row for bonus tiles
    FallReview,
    /// Bonus tiles finished falling off
    BonusFallOff,
    /// Post-bonus drop finished; pick the next target
    FinalTarget,
    /// One-shot animation markers expire
    AnimationReset,
    /// Countdown reached zero
    Timeout,
    /// Banner with this id expires
    AnnouncementExpiry(u32),
}

impl TimerKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerKey::FirstTarget => "first_target",
            TimerKey::Clear => "clear",
            TimerKey::FallReview => "fall_review",
            TimerKey::BonusFallOff => "bonus_fall_off",
            TimerKey::FinalTarget => "final_target",
            TimerKey::AnimationReset => "animation_reset",
            TimerKey::Timeout => "timeout",
            TimerKey::AnnouncementExpiry(_) => "announcement_expiry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub key: TimerKey,
    /// Session id at scheduling time
    pub session: u32,
    /// Absolute due time in milliseconds
    pub due_ms: u64,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<PendingTimer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key`, replacing any pending timer with the same key
    pub fn schedule(&mut self, key: TimerKey, session: u32, due_ms: u64) {
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingTimer {
            key,
            session,
            due_ms,
            seq,
        });
    }

    /// Returns true when a pending timer was removed
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.key != key);
        self.pending.len() != before
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&PendingTimer) -> bool) {
        self.pending.retain(|t| keep(t));
    }

    pub fn get(&self, key: TimerKey) -> Option<&PendingTimer> {
        self.pending.iter().find(|t| t.key == key)
    }

    pub fn contains(&self, key: TimerKey) -> bool {
        self.get(key).is_some()
    }

    /// Earliest due time, if anything is pending
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.due_ms).min()
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    ///
    /// Ties resolve in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<PendingTimer> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(pos, _)| pos)?;
        Some(self.pending.swap_remove(pos))
    }

    pub fn keys(&self) -> impl Iterator<Item = TimerKey> + '_ {
        self.pending.iter().map(|t| t.key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

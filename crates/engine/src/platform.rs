//! Platform collaborator - audio and persisted preferences
//!
//! The game never touches global audio or storage. A session is handed a
//! [`Platform`] and calls it at the boundary: sounds after actions, reads
//! once at startup, writes whenever a persisted value changes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::state::{GameState, Preferences};
use crate::types::{SoundKey, Theme};

/// Persisted setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    BestScore,
    Volume,
    Theme,
    ShowValueIndicator,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::BestScore => "bestScore",
            PreferenceKey::Volume => "volume",
            PreferenceKey::Theme => "theme",
            PreferenceKey::ShowValueIndicator => "showValueIndicator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreferenceValue {
    Score(u32),
    Volume(f32),
    Theme(Theme),
    Flag(bool),
}

/// Audio and storage capabilities provided by the host
pub trait Platform {
    fn play(&mut self, sound: SoundKey);
    fn preference(&self, key: PreferenceKey) -> Option<PreferenceValue>;
    fn set_preference(&mut self, key: PreferenceKey, value: PreferenceValue);
}

impl<P: Platform + ?Sized> Platform for Box<P> {
    fn play(&mut self, sound: SoundKey) {
        (**self).play(sound)
    }

    fn preference(&self, key: PreferenceKey) -> Option<PreferenceValue> {
        (**self).preference(key)
    }

    fn set_preference(&mut self, key: PreferenceKey, value: PreferenceValue) {
        (**self).set_preference(key, value)
    }
}

/// Read persisted preferences and best score, falling back to defaults
pub fn load_preferences<P: Platform + ?Sized>(platform: &P) -> (Preferences, u32) {
    let defaults = Preferences::default();
    let volume = match platform.preference(PreferenceKey::Volume) {
        Some(PreferenceValue::Volume(v)) if !v.is_nan() => v.clamp(0.0, 1.0),
        _ => defaults.volume,
    };
    let theme = match platform.preference(PreferenceKey::Theme) {
        Some(PreferenceValue::Theme(t)) => t,
        _ => defaults.theme,
    };
    let show_value_indicator = match platform.preference(PreferenceKey::ShowValueIndicator) {
        Some(PreferenceValue::Flag(f)) => f,
        _ => defaults.show_value_indicator,
    };
    let best_score = match platform.preference(PreferenceKey::BestScore) {
        Some(PreferenceValue::Score(s)) => s,
        _ => 0,
    };
    (
        Preferences {
            volume,
            theme,
            show_value_indicator,
        },
        best_score,
    )
}

/// Write every persisted value that differs between two snapshots.
///
/// Returns the keys written.
pub fn persist_changes<P: Platform + ?Sized>(
    platform: &mut P,
    before: &GameState,
    after: &GameState,
) -> Vec<PreferenceKey> {
    let mut written = Vec::new();
    if after.best_score() != before.best_score() {
        platform.set_preference(
            PreferenceKey::BestScore,
            PreferenceValue::Score(after.best_score()),
        );
        written.push(PreferenceKey::BestScore);
    }

    let (old, new) = (before.preferences(), after.preferences());
    if new.volume != old.volume {
        platform.set_preference(PreferenceKey::Volume, PreferenceValue::Volume(new.volume));
        written.push(PreferenceKey::Volume);
    }
    if new.theme != old.theme {
        platform.set_preference(PreferenceKey::Theme, PreferenceValue::Theme(new.theme));
        written.push(PreferenceKey::Theme);
    }
    if new.show_value_indicator != old.show_value_indicator {
        platform.set_preference(
            PreferenceKey::ShowValueIndicator,
            PreferenceValue::Flag(new.show_value_indicator),
        );
        written.push(PreferenceKey::ShowValueIndicator);
    }
    written
}

#[derive(Debug, Default)]
struct MemoryInner {
    preferences: HashMap<PreferenceKey, PreferenceValue>,
    played: Vec<SoundKey>,
}

/// In-memory platform for headless sessions and tests.
///
/// Clones share the same storage, so a test can keep a handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlatform {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sounds played so far, oldest first
    pub fn played(&self) -> Vec<SoundKey> {
        self.lock().played.clone()
    }

    pub fn stored(&self, key: PreferenceKey) -> Option<PreferenceValue> {
        self.lock().preferences.get(&key).copied()
    }
}

impl Platform for MemoryPlatform {
    fn play(&mut self, sound: SoundKey) {
        self.lock().played.push(sound);
    }

    fn preference(&self, key: PreferenceKey) -> Option<PreferenceValue> {
        self.stored(key)
    }

    fn set_preference(&mut self, key: PreferenceKey, value: PreferenceValue) {
        self.lock().preferences.insert(key, value);
    }
}

//! Timing configuration
//!
//! Every delay the turn controller uses matches an animation length. Values
//! default to the constants in `tile_tally_types` and can be overridden from
//! the environment:
//!
//! - `TILE_TALLY_DROP_MS`
//! - `TILE_TALLY_CLEAR_MS`
//! - `TILE_TALLY_FALL_OFF_MS`
//! - `TILE_TALLY_ANIMATION_RESET_MS`
//! - `TILE_TALLY_ANNOUNCEMENT_MS`
//! - `TILE_TALLY_TICK_MS`

use tracing::warn;

use crate::error::ControllerError;
use crate::types::{
    ANIMATION_RESET_MS, ANNOUNCEMENT_MS, CLEAR_ANIMATION_MS, DROP_ANIMATION_MS,
    FALL_OFF_ANIMATION_MS, TICK_MS,
};

/// Animation-matched delays, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub drop_ms: u64,
    pub clear_ms: u64,
    pub fall_off_ms: u64,
    pub animation_reset_ms: u64,
    pub announcement_ms: u64,
    /// Countdown clock period
    pub tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            drop_ms: DROP_ANIMATION_MS,
            clear_ms: CLEAR_ANIMATION_MS,
            fall_off_ms: FALL_OFF_ANIMATION_MS,
            animation_reset_ms: ANIMATION_RESET_MS,
            announcement_ms: ANNOUNCEMENT_MS,
            tick_ms: TICK_MS,
        }
    }
}

const ENV_NAMES: [&str; 6] = [
    "TILE_TALLY_DROP_MS",
    "TILE_TALLY_CLEAR_MS",
    "TILE_TALLY_FALL_OFF_MS",
    "TILE_TALLY_ANIMATION_RESET_MS",
    "TILE_TALLY_ANNOUNCEMENT_MS",
    "TILE_TALLY_TICK_MS",
];

impl TimingConfig {
    /// Defaults with environment overrides; unparsable values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        for name in ENV_NAMES {
            let Ok(value) = std::env::var(name) else {
                continue;
            };
            if let Err(err) = config.set(name, &value) {
                warn!(%err, "ignoring timing override");
            }
        }
        config
    }

    /// Defaults with the given `(name, value)` overrides applied strictly.
    ///
    /// Unknown names are skipped; a known name with a bad value is an error.
    pub fn parse_overrides<'a, I>(pairs: I) -> Result<Self, ControllerError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (name, value) in pairs {
            if ENV_NAMES.contains(&name) {
                config.set(name, value)?;
            }
        }
        Ok(config)
    }

    /// Reject settings the runtime cannot drive. Struct literals skip the
    /// parsing checks, so the runtime calls this before starting.
    pub fn validate(&self) -> Result<(), ControllerError> {
        if self.tick_ms == 0 {
            return Err(ControllerError::InvalidSetting {
                name: "TILE_TALLY_TICK_MS".to_string(),
                value: self.tick_ms.to_string(),
            });
        }
        Ok(())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), ControllerError> {
        let invalid = || ControllerError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        };
        let ms: u64 = value.trim().parse().map_err(|_| invalid())?;
        let slot = match name {
            "TILE_TALLY_DROP_MS" => &mut self.drop_ms,
            "TILE_TALLY_CLEAR_MS" => &mut self.clear_ms,
            "TILE_TALLY_FALL_OFF_MS" => &mut self.fall_off_ms,
            "TILE_TALLY_ANIMATION_RESET_MS" => &mut self.animation_reset_ms,
            "TILE_TALLY_ANNOUNCEMENT_MS" => &mut self.announcement_ms,
            "TILE_TALLY_TICK_MS" => {
                // A zero period would spin the clock
                if ms == 0 {
                    return Err(invalid());
                }
                &mut self.tick_ms
            }
            _ => return Err(invalid()),
        };
        *slot = ms;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_animation_constants() {
        let config = TimingConfig::default();
        assert_eq!(config.drop_ms, DROP_ANIMATION_MS);
        assert_eq!(config.clear_ms, CLEAR_ANIMATION_MS);
        assert_eq!(config.tick_ms, 1000);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = TimingConfig::from_env();
    }

    #[test]
    fn test_parse_overrides() {
        let config = TimingConfig::parse_overrides([
            ("TILE_TALLY_DROP_MS", "10"),
            ("TILE_TALLY_CLEAR_MS", " 20 "),
            ("UNRELATED", "x"),
        ])
        .unwrap();
        assert_eq!(config.drop_ms, 10);
        assert_eq!(config.clear_ms, 20);
        assert_eq!(config.fall_off_ms, FALL_OFF_ANIMATION_MS);
    }

    #[test]
    fn test_parse_overrides_rejects_bad_values() {
        let err = TimingConfig::parse_overrides([("TILE_TALLY_FALL_OFF_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ControllerError::InvalidSetting { .. }));
        assert!(TimingConfig::parse_overrides([("TILE_TALLY_TICK_MS", "0")]).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        assert!(TimingConfig::default().validate().is_ok());
        let stalled = TimingConfig {
            tick_ms: 0,
            ..TimingConfig::default()
        };
        assert!(matches!(
            stalled.validate(),
            Err(ControllerError::InvalidSetting { .. })
        ));
    }
}

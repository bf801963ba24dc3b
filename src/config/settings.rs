//! Playback and history settings
//!
//! These are the knobs the controller and the snapshot store are built
//! from. Everything is `#[serde(default)]` so a partial config file only
//! overrides what it names.
//!
//! # Main Types
//!
//! - [`PlaybackConfig`] - Base delay, initial speed, auto-play and loop flags
//! - [`HistoryConfig`] - Snapshot history bound

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, SortVisError};
use crate::playback::{DEFAULT_BASE_DELAY_MS, MAX_SPEED, MIN_SPEED};

/// Default number of snapshots kept in history
pub const DEFAULT_MAX_SNAPSHOTS: usize = 100;

/// Playback behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between automatic advances at speed 1.0
    pub base_delay_ms: u64,

    /// Speed multiplier a new controller starts with
    pub default_speed: f64,

    /// Start playing as soon as steps are loaded
    pub auto_play: bool,

    /// Restart from the first step after completing
    pub loop_playback: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            default_speed: 1.0,
            auto_play: false,
            loop_playback: false,
        }
    }
}

impl PlaybackConfig {
    /// Base delay as a Duration
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_delay_ms == 0 {
            return Err(SortVisError::Config(
                "playback.base_delay_ms must be greater than zero".to_string(),
            ));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.default_speed) {
            return Err(SortVisError::Config(format!(
                "playback.default_speed must be within [{}, {}], got {}",
                MIN_SPEED, MAX_SPEED, self.default_speed
            )));
        }
        Ok(())
    }
}

/// Snapshot history behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Oldest snapshots are evicted beyond this count
    pub max_snapshots: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_snapshots == 0 {
            return Err(SortVisError::Config(
                "history.max_snapshots must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

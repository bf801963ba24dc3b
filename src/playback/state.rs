//! Playback state

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Steps loaded (or none), cursor parked
    #[default]
    Idle,
    /// Advancing on the timer
    Playing,
    /// Auto-advance suspended mid-sequence
    Paused,
    /// Cursor ran to the final step
    Completed,
}

impl PlaybackState {
    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused)
    }

    /// Check if playback ran to the end
    pub fn is_completed(&self) -> bool {
        matches!(self, PlaybackState::Completed)
    }

    /// Display name for the state
    pub fn display_name(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Completed => "Completed",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_state() {
        assert!(PlaybackState::Playing.is_playing());
        assert!(PlaybackState::Paused.is_paused());
        assert!(PlaybackState::Completed.is_completed());
        assert!(!PlaybackState::Idle.is_playing());
        assert_eq!(PlaybackState::default(), PlaybackState::Idle);
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&PlaybackState::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}

//! Playback of generated step sequences
//!
//! # Main Types
//!
//! - [`PlaybackController`] - Cursor, transport and auto-advance over a sequence
//! - [`PlaybackState`] - Idle, Playing, Paused or Completed
//! - [`AdvanceTimer`] - Single-slot cancellable scheduling
//! - [`Clock`] - Time source ([`MonotonicClock`], [`ManualClock`])
//!
//! # State Machine
//!
//! ```text
//! Idle ──play──▶ Playing ──pause──▶ Paused ──play──▶ Playing
//!                   │
//!                   └── last step reached ──▶ Completed ──(loop)──▶ Playing
//!
//! stop() returns to Idle from anywhere
//! ```

pub mod controller;
pub mod state;
pub mod timer;

pub use controller::PlaybackController;
pub use state::PlaybackState;
pub use timer::{
    AdvanceTimer, Clock, ManualClock, MonotonicClock, ScheduledTask, TimerTask, TimerToken,
};

/// Slowest accepted speed multiplier
pub const MIN_SPEED: f64 = 0.1;

/// Fastest accepted speed multiplier
pub const MAX_SPEED: f64 = 5.0;

/// Delay between automatic advances at speed 1.0
pub const DEFAULT_BASE_DELAY_MS: u64 = 600;

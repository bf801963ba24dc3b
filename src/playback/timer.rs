//! Cancellable single-slot scheduling for auto-advance
//!
//! Playback runs on a cooperative, single-threaded loop: the owner calls
//! [`AdvanceTimer::take_due`] from its update hook and the timer never fires
//! on its own. The timer holds at most one pending task. Scheduling replaces
//! whatever was pending and cancelling is idempotent, so there is no way to
//! end up with two advances queued.
//!
//! Time comes from a [`Clock`]: [`MonotonicClock`] for real runs and
//! [`ManualClock`] when a test needs to move time by hand.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Identifies one scheduling; never reused by the same timer
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl fmt::Debug for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerToken({})", self.0)
    }
}

/// Work to run when the timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Move to the next step
    Advance,
    /// Rewind a completed looping session and start again
    LoopRestart,
}

/// A pending task and the clock time at which it becomes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub token: TimerToken,
    pub task: TimerTask,
    pub due: Duration,
}

/// Single-slot timer
#[derive(Debug, Default)]
pub struct AdvanceTimer {
    next_token: u64,
    pending: Option<ScheduledTask>,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` at `due`, replacing any pending task
    pub fn schedule(&mut self, task: TimerTask, due: Duration) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        if let Some(replaced) = self.pending.replace(ScheduledTask { token, task, due }) {
            tracing::trace!(?replaced, "replacing pending timer task");
        }
        tracing::trace!(?token, ?task, due_ms = due.as_millis() as u64, "scheduled timer task");
        token
    }

    /// Cancel the pending task, if any
    pub fn cancel(&mut self) -> Option<ScheduledTask> {
        let cancelled = self.pending.take();
        if let Some(task) = &cancelled {
            tracing::trace!(token = ?task.token, "cancelled timer task");
        }
        cancelled
    }

    pub fn pending(&self) -> Option<&ScheduledTask> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Check whether `token` is the task currently waiting
    pub fn is_current(&self, token: TimerToken) -> bool {
        self.pending.is_some_and(|p| p.token == token)
    }

    /// Remove and return the pending task if it is due at `now`
    pub fn take_due(&mut self, now: Duration) -> Option<ScheduledTask> {
        match self.pending {
            Some(task) if task.due <= now => self.pending.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_pending() {
        let mut timer = AdvanceTimer::new();
        let first = timer.schedule(TimerTask::Advance, Duration::from_millis(600));
        let second = timer.schedule(TimerTask::Advance, Duration::from_millis(300));

        assert_ne!(first, second);
        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));
        assert_eq!(timer.pending().map(|p| p.due), Some(Duration::from_millis(300)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = AdvanceTimer::new();
        timer.schedule(TimerTask::LoopRestart, Duration::from_millis(10));
        assert!(timer.cancel().is_some());
        assert!(timer.cancel().is_none());
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_take_due_only_when_due() {
        let mut timer = AdvanceTimer::new();
        let token = timer.schedule(TimerTask::Advance, Duration::from_millis(100));
        assert!(timer.take_due(Duration::from_millis(99)).is_none());
        assert!(timer.is_pending());

        let fired = timer.take_due(Duration::from_millis(100)).unwrap();
        assert_eq!(fired.token, token);
        assert_eq!(fired.task, TimerTask::Advance);
        assert!(!timer.is_pending());
        assert!(timer.take_due(Duration::from_secs(10)).is_none());
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance_ms(250);
        assert_eq!(clock.now(), Duration::from_millis(250));
        clock.set(Duration::ZERO);
        assert_eq!(handle.now(), Duration::ZERO);
    }

    #[test]
    fn test_monotonic_clock_moves_forward() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}

//! Playback controller for stepping through a generated sequence

use std::fmt;
use std::time::Duration;

use crate::config::PlaybackConfig;
use crate::error::{Result, SortVisError};
use crate::generator::StepSequence;
use crate::render::{RenderConfig, RenderSurface, StepRenderer};
use crate::types::Step;

use super::state::PlaybackState;
use super::timer::{AdvanceTimer, Clock, ScheduledTask, TimerTask};
use super::{MAX_SPEED, MIN_SPEED};

/// Interactive cursor over an immutable step sequence
///
/// Index changes are pushed to the attached renderer immediately. Automatic
/// advancing is cooperative: call [`PlaybackController::update`] from the
/// owner's event loop and any due advance runs there.
pub struct PlaybackController {
    /// Loaded sequence, if any
    steps: Option<StepSequence>,
    /// Cursor into `steps`
    current_index: usize,
    state: PlaybackState,
    /// Playback speed multiplier (1.0 = base delay between steps)
    speed: f64,
    loop_playback: bool,
    auto_play: bool,
    base_delay: Duration,
    timer: AdvanceTimer,
    clock: Box<dyn Clock>,
    renderer: Box<dyn StepRenderer>,
    render_config: RenderConfig,
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("steps", &self.steps.as_ref().map(|s| s.len()))
            .field("current_index", &self.current_index)
            .field("state", &self.state)
            .field("speed", &self.speed)
            .field("loop_playback", &self.loop_playback)
            .field("pending", &self.timer.pending())
            .finish_non_exhaustive()
    }
}

impl PlaybackController {
    /// Create a controller with nothing loaded
    pub fn new(
        config: &PlaybackConfig,
        clock: Box<dyn Clock>,
        renderer: Box<dyn StepRenderer>,
    ) -> Self {
        Self {
            steps: None,
            current_index: 0,
            state: PlaybackState::Idle,
            speed: config.default_speed.clamp(MIN_SPEED, MAX_SPEED),
            loop_playback: config.loop_playback,
            auto_play: config.auto_play,
            // update() only terminates with a non-zero delay
            base_delay: config.base_delay().max(Duration::from_millis(1)),
            timer: AdvanceTimer::new(),
            clock,
            renderer,
            render_config: RenderConfig::default(),
        }
    }

    /// Use the given display options for every rendered step
    pub fn with_render_config(mut self, render_config: RenderConfig) -> Self {
        self.render_config = render_config;
        self
    }

    // ==================== Accessors ====================

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn steps(&self) -> Option<&StepSequence> {
        self.steps.as_ref()
    }

    pub fn has_steps(&self) -> bool {
        self.steps.is_some()
    }

    /// Number of loaded steps (0 when nothing is loaded)
    pub fn len(&self) -> usize {
        self.steps.as_ref().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Step at the cursor
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.as_ref().and_then(|s| s.get(self.current_index))
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn loop_playback(&self) -> bool {
        self.loop_playback
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Delay between automatic advances at the current speed
    pub fn advance_delay(&self) -> Duration {
        self.base_delay.div_f64(self.speed)
    }

    /// The scheduled advance or loop restart, if any
    pub fn pending(&self) -> Option<ScheduledTask> {
        self.timer.pending().copied()
    }

    /// Playback progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        match self.steps.as_ref().map(|s| s.last_index()) {
            None => 0.0,
            Some(0) => 1.0,
            Some(last) => self.current_index as f64 / last as f64,
        }
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    // ==================== Settings ====================

    pub fn set_auto_play(&mut self, enabled: bool) {
        self.auto_play = enabled;
    }

    /// Enable or disable looping; disabling drops a pending loop restart
    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_playback = enabled;
        let restart_pending = self
            .timer
            .pending()
            .is_some_and(|p| p.task == TimerTask::LoopRestart);
        if !enabled && restart_pending {
            self.timer.cancel();
        }
    }

    /// Change the speed multiplier
    ///
    /// While playing, the pending advance is rescheduled from now with the new
    /// delay, so no step is skipped or repeated.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(SortVisError::InvalidArgument(format!(
                "speed must be within [{}, {}], got {}",
                MIN_SPEED, MAX_SPEED, speed
            )));
        }
        self.speed = speed;
        if self.state.is_playing() {
            let due = self.clock.now() + self.advance_delay();
            self.timer.schedule(TimerTask::Advance, due);
        }
        tracing::debug!(speed, "Playback speed changed");
        Ok(())
    }

    /// Swap in a new renderer
    ///
    /// The new renderer is initialized first; on failure the current one stays.
    pub fn set_renderer(
        &mut self,
        mut renderer: Box<dyn StepRenderer>,
        surface: &RenderSurface,
    ) -> Result<()> {
        renderer.initialize(surface, &self.render_config)?;
        let mut old = std::mem::replace(&mut self.renderer, renderer);
        old.dispose();
        self.render_current();
        Ok(())
    }

    /// Release the renderer's resources
    pub fn dispose(&mut self) {
        self.timer.cancel();
        self.renderer.dispose();
    }

    // ==================== Loading ====================

    /// Load a sequence and park the cursor on its first step
    pub fn load_steps(&mut self, steps: StepSequence) -> Result<()> {
        self.ensure_not_playing("load steps")?;

        self.timer.cancel();
        tracing::info!(steps = steps.len(), "Loaded step sequence");
        self.steps = Some(steps);
        self.current_index = 0;
        self.state = PlaybackState::Idle;
        self.render_current();

        if self.auto_play {
            self.play();
        }
        Ok(())
    }

    /// Drop the loaded sequence
    pub fn unload(&mut self) {
        self.timer.cancel();
        self.steps = None;
        self.current_index = 0;
        self.state = PlaybackState::Idle;
    }

    /// Install previously captured session fields
    ///
    /// Validated before anything changes. A restored `Playing` state gets
    /// exactly one fresh advance scheduled.
    pub fn restore(
        &mut self,
        steps: Option<StepSequence>,
        current_index: usize,
        state: PlaybackState,
    ) -> Result<()> {
        let len = steps.as_ref().map_or(0, |s| s.len());
        let (current_index, state) = if steps.is_none() {
            (0, PlaybackState::Idle)
        } else if current_index >= len {
            return Err(SortVisError::IndexOutOfRange {
                index: current_index,
                len,
            });
        } else {
            (current_index, state)
        };

        self.timer.cancel();
        self.steps = steps;
        self.current_index = current_index;
        self.state = state;
        self.render_current();

        if state.is_playing() {
            let due = self.clock.now() + self.advance_delay();
            self.timer.schedule(TimerTask::Advance, due);
        }
        tracing::debug!(index = current_index, %state, "Restored playback session");
        Ok(())
    }

    // ==================== Transport ====================

    /// Start or resume playback
    ///
    /// Returns `false` when nothing changed (no steps loaded, already
    /// playing, or completed with looping off).
    pub fn play(&mut self) -> bool {
        if self.steps.is_none() {
            return false;
        }

        match self.state {
            PlaybackState::Idle | PlaybackState::Paused => {}
            PlaybackState::Completed if self.loop_playback => {
                self.current_index = 0;
                self.render_current();
            }
            PlaybackState::Completed => {
                tracing::debug!("Ignoring play: sequence completed and looping is off");
                return false;
            }
            PlaybackState::Playing => return false,
        }

        self.state = PlaybackState::Playing;
        let due = self.clock.now() + self.advance_delay();
        self.timer.schedule(TimerTask::Advance, due);
        tracing::debug!(index = self.current_index, "Playback started");
        true
    }

    /// Pause playback; returns `false` unless it was playing
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.timer.cancel();
        self.state = PlaybackState::Paused;
        tracing::debug!(index = self.current_index, "Playback paused");
        true
    }

    /// Stop playback and reset to the first step
    ///
    /// Returns `false` when already idle on the first step.
    pub fn stop(&mut self) -> bool {
        if self.state == PlaybackState::Idle && self.current_index == 0 {
            return false;
        }
        self.timer.cancel();
        self.current_index = 0;
        self.state = PlaybackState::Idle;
        self.render_current();
        tracing::debug!("Playback stopped");
        true
    }

    /// Step forward by one step
    ///
    /// At the last step this marks the sequence completed instead.
    pub fn next_step(&mut self) -> Result<()> {
        self.ensure_not_playing("step forward")?;
        let Some(last) = self.last_index() else {
            return Ok(());
        };

        self.timer.cancel();
        if self.current_index < last {
            self.current_index += 1;
            self.render_current();
        } else if self.state != PlaybackState::Completed {
            self.state = PlaybackState::Completed;
            tracing::debug!("Reached final step");
        }
        Ok(())
    }

    /// Step backward by one step
    pub fn previous_step(&mut self) -> Result<()> {
        self.ensure_not_playing("step backward")?;
        let Some(last) = self.last_index() else {
            return Ok(());
        };

        self.timer.cancel();
        if self.current_index > 0 {
            self.current_index -= 1;
            self.render_current();
        }
        self.leave_completed_if_moved(last);
        Ok(())
    }

    /// Move the cursor to `index`
    pub fn jump_to_step(&mut self, index: usize) -> Result<()> {
        self.ensure_not_playing("jump")?;
        let len = self.len();
        if index >= len {
            return Err(SortVisError::IndexOutOfRange { index, len });
        }

        self.timer.cancel();
        self.current_index = index;
        self.render_current();
        self.leave_completed_if_moved(len - 1);
        Ok(())
    }

    /// Run every timer task that is due
    ///
    /// Returns the number of tasks fired. Follow-up tasks are scheduled
    /// relative to the previous due time, so a late call catches up exactly.
    pub fn update(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some(task) = self.timer.take_due(now) {
            fired += 1;
            match task.task {
                TimerTask::Advance => self.on_advance(task.due),
                TimerTask::LoopRestart => self.on_loop_restart(task.due),
            }
        }
        fired
    }

    // ==================== Internals ====================

    fn on_advance(&mut self, at: Duration) {
        if !self.state.is_playing() {
            return;
        }
        let Some(last) = self.last_index() else {
            return;
        };

        if self.current_index < last {
            self.current_index += 1;
            self.render_current();
        }

        if self.current_index >= last {
            self.state = PlaybackState::Completed;
            tracing::debug!("Playback completed");
            if self.loop_playback {
                self.timer
                    .schedule(TimerTask::LoopRestart, at + self.advance_delay());
            }
        } else {
            self.timer.schedule(TimerTask::Advance, at + self.advance_delay());
        }
    }

    fn on_loop_restart(&mut self, at: Duration) {
        if self.state != PlaybackState::Completed || !self.loop_playback {
            return;
        }

        self.current_index = 0;
        self.state = PlaybackState::Idle;
        self.render_current();

        self.state = PlaybackState::Playing;
        self.timer.schedule(TimerTask::Advance, at + self.advance_delay());
        tracing::debug!("Looping playback from the first step");
    }

    fn leave_completed_if_moved(&mut self, last: usize) {
        if self.state == PlaybackState::Completed && self.current_index != last {
            self.state = PlaybackState::Paused;
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.steps.as_ref().map(|s| s.last_index())
    }

    fn ensure_not_playing(&self, operation: &'static str) -> Result<()> {
        if self.state.is_playing() {
            return Err(SortVisError::state_conflict(operation, self.state));
        }
        Ok(())
    }

    fn render_current(&mut self) {
        if let Some(step) = self.steps.as_ref().and_then(|s| s.get(self.current_index)) {
            self.renderer.render_step(step, &self.render_config);
        }
    }
}

//! Application context
//!
//! [`Visualizer`] ties the generator, the playback controller and the
//! snapshot store together. It is constructed once from an [`AppConfig`] and
//! passed around by reference; nothing in the crate keeps global state.
//!
//! Every meaningful mutation records a snapshot after it succeeds:
//!
//! | Operation         | Snapshot description     |
//! |-------------------|--------------------------|
//! | `set_data`        | `Data changed`           |
//! | `set_algorithm`   | `Algorithm changed`      |
//! | `start_sort`      | `Sort started`           |
//! | `play`            | `Playback started`       |
//! | `pause`           | `Playback paused`        |
//! | `stop`            | `Playback stopped`       |
//! | `jump_to_step`    | `Jumped to step N`       |
//! | `set_speed`       | `Speed set to Nx`        |
//!
//! Transport calls that change nothing (pausing while idle, playing while
//! already playing) record nothing. Single steps and timer-driven advances
//! are not recorded either.

use crate::config::AppConfig;
use crate::error::{Result, SortVisError};
use crate::generator::{StepGenerator, StepSequence};
use crate::history::{CapturedState, HistoryBundle, SnapshotId, SnapshotStore};
use crate::playback::{Clock, PlaybackController, PlaybackState};
use crate::render::StepRenderer;
use crate::types::{Algorithm, Step};
use crate::validator;

/// The visualizer session
#[derive(Debug)]
pub struct Visualizer {
    config: AppConfig,
    data: Vec<i64>,
    generator: StepGenerator,
    controller: PlaybackController,
    history: SnapshotStore,
}

impl Visualizer {
    /// Create a session with no data loaded
    pub fn new(
        config: AppConfig,
        clock: Box<dyn Clock>,
        renderer: Box<dyn StepRenderer>,
    ) -> Result<Self> {
        config.validate()?;

        let generator =
            StepGenerator::with_palette(Algorithm::default(), config.render.palette.clone());
        let controller = PlaybackController::new(&config.playback, clock, renderer)
            .with_render_config(config.render.clone());
        let history = SnapshotStore::from_config(&config.history);

        Ok(Self {
            config,
            data: Vec::new(),
            generator,
            controller,
            history,
        })
    }

    // ==================== Accessors ====================

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.generator.algorithm()
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn history(&self) -> &SnapshotStore {
        &self.history
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.controller.current_step()
    }

    pub fn steps(&self) -> Option<&StepSequence> {
        self.controller.steps()
    }

    // ==================== Session Mutations ====================

    /// Replace the input data, discarding any generated steps
    pub fn set_data(&mut self, data: Vec<i64>) -> Result<()> {
        if data.is_empty() {
            return Err(SortVisError::InvalidInput(
                "data must contain at least one value".to_string(),
            ));
        }

        self.controller.stop();
        self.controller.unload();
        self.data = data;
        self.record("Data changed");
        Ok(())
    }

    /// Select a different algorithm, discarding any generated steps
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.controller.stop();
        self.controller.unload();
        self.generator =
            StepGenerator::with_palette(algorithm, self.config.render.palette.clone());
        self.record("Algorithm changed");
    }

    /// Generate steps for the current data and load them
    pub fn start_sort(&mut self) -> Result<()> {
        if self.controller.is_playing() {
            return Err(SortVisError::state_conflict("start a sort", self.controller.state()));
        }

        let steps = self.generator.generate(&self.data)?;
        if !validator::validate_result(&self.data, &steps) {
            return Err(SortVisError::InvalidStep(format!(
                "{} produced an unsorted final step",
                self.generator.algorithm().display_name()
            )));
        }

        self.controller.load_steps(steps)?;
        self.record("Sort started");
        Ok(())
    }

    /// Start or resume playback; records a snapshot only if the state changed
    pub fn play(&mut self) -> bool {
        let changed = self.controller.play();
        if changed {
            self.record("Playback started");
        }
        changed
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.controller.pause();
        if changed {
            self.record("Playback paused");
        }
        changed
    }

    pub fn stop(&mut self) -> bool {
        let changed = self.controller.stop();
        if changed {
            self.record("Playback stopped");
        }
        changed
    }

    pub fn next_step(&mut self) -> Result<()> {
        self.controller.next_step()
    }

    pub fn previous_step(&mut self) -> Result<()> {
        self.controller.previous_step()
    }

    pub fn jump_to_step(&mut self, index: usize) -> Result<()> {
        self.controller.jump_to_step(index)?;
        self.record(format!("Jumped to step {}", index));
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        self.controller.set_speed(speed)?;
        self.record(format!("Speed set to {}x", speed));
        Ok(())
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.controller.set_loop(enabled);
    }

    pub fn set_auto_play(&mut self, enabled: bool) {
        self.controller.set_auto_play(enabled);
    }

    /// Walk the remaining steps by hand until the sequence completes
    ///
    /// Pauses first if auto-advance is running. Returns how many steps the
    /// cursor moved; nothing happens when no steps are loaded.
    pub fn step_to_end(&mut self) -> Result<usize> {
        if !self.controller.has_steps() {
            return Ok(0);
        }
        self.pause();

        let start = self.controller.current_index();
        while self.controller.state() != PlaybackState::Completed {
            self.controller.next_step()?;
        }
        Ok(self.controller.current_index() - start)
    }

    /// Event-loop hook; see [`PlaybackController::update`]
    pub fn update(&mut self) -> usize {
        self.controller.update()
    }

    // ==================== Time Travel ====================

    /// Put the session back to how it was when `id` was recorded
    pub fn restore_snapshot(&mut self, id: SnapshotId) -> Result<()> {
        if self.controller.is_playing() {
            tracing::warn!(%id, "Rejected snapshot restore during playback");
            return Err(SortVisError::state_conflict(
                "restore a snapshot",
                self.controller.state(),
            ));
        }

        let captured = self.history.begin_restore(id)?;
        match self.apply(captured) {
            Ok(()) => {
                self.history.finish_restore(id);
                Ok(())
            }
            Err(e) => {
                self.history.abort_restore();
                Err(e)
            }
        }
    }

    /// Restore the snapshot before the current one
    ///
    /// Returns the restored id, or `None` at the start of history.
    pub fn travel_back(&mut self) -> Result<Option<SnapshotId>> {
        match self.history.previous_id() {
            Some(id) => self.restore_snapshot(id).map(|()| Some(id)),
            None => Ok(None),
        }
    }

    /// Restore the snapshot after the current one
    pub fn travel_forward(&mut self) -> Result<Option<SnapshotId>> {
        match self.history.next_id() {
            Some(id) => self.restore_snapshot(id).map(|()| Some(id)),
            None => Ok(None),
        }
    }

    pub fn export_history(&self) -> HistoryBundle {
        self.history.export_history()
    }

    pub fn import_history(&mut self, bundle: HistoryBundle) -> Result<usize> {
        self.history.import_history(bundle)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ==================== Internals ====================

    fn capture(&self) -> CapturedState {
        CapturedState {
            algorithm: self.generator.algorithm(),
            data: self.data.clone(),
            current_index: self.controller.current_index(),
            state: self.controller.state(),
            steps: self.controller.steps().cloned(),
        }
    }

    fn record(&mut self, description: impl Into<String>) -> Option<SnapshotId> {
        let captured = self.capture();
        self.history.save_snapshot(description, captured)
    }

    fn apply(&mut self, captured: CapturedState) -> Result<()> {
        // the controller validates before changing anything
        self.controller
            .restore(captured.steps, captured.current_index, captured.state)?;
        if captured.algorithm != self.generator.algorithm() {
            self.generator =
                StepGenerator::with_palette(captured.algorithm, self.config.render.palette.clone());
        }
        self.data = captured.data;
        Ok(())
    }
}

//! Mock construction helpers

use std::cell::RefCell;
use std::rc::Rc;

use sortvis_rs::app::Visualizer;
use sortvis_rs::config::AppConfig;
use sortvis_rs::playback::ManualClock;
use sortvis_rs::render::{RenderConfig, RenderSurface, StepRenderer};
use sortvis_rs::types::Step;
use sortvis_rs::Result;

/// Renderer that records the sequence number of every step it is handed
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Rc<RefCell<Vec<u32>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence numbers rendered so far, shared with every clone
    pub fn frames(&self) -> Vec<u32> {
        self.frames.borrow().clone()
    }

    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }
}

impl StepRenderer for RecordingRenderer {
    fn initialize(&mut self, _surface: &RenderSurface, _config: &RenderConfig) -> Result<()> {
        Ok(())
    }

    fn render_step(&mut self, step: &Step, _config: &RenderConfig) {
        self.frames.borrow_mut().push(step.sequence_number());
    }

    fn capability_supported(&self) -> bool {
        true
    }

    fn dispose(&mut self) {}
}

/// Visualizer on a hand-driven clock with a recording renderer
pub fn create_test_visualizer(config: AppConfig) -> (Visualizer, ManualClock, RecordingRenderer) {
    let clock = ManualClock::new();
    let renderer = RecordingRenderer::new();
    let vis = Visualizer::new(config, Box::new(clock.clone()), Box::new(renderer.clone()))
        .expect("test config is valid");
    (vis, clock, renderer)
}

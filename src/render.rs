//! Renderer collaborator interface
//!
//! The playback controller hands exactly one [`StepRenderer`] the step at the
//! current index whenever that index changes. Whether the backend is
//! GPU-accelerated or a software fallback is decided by whoever constructs
//! the renderer; see [`first_supported`] for the usual selection.
//!
//! Two implementations ship with the crate:
//!
//! - [`NullRenderer`] - discards frames (headless runs, benchmarks)
//! - [`TextRenderer`] - software fallback drawing horizontal bars into a string

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::error::{Result, SortVisError};
use crate::types::{Palette, Step};

/// Drawing surface dimensions, in cells for text backends or pixels otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSurface {
    pub width: u16,
    pub height: u16,
}

impl RenderSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Renderer-facing display options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum bar length in cells
    pub max_bar_width: usize,
    /// Print the numeric value next to each bar
    pub show_values: bool,
    /// Print the operation description under the bars
    pub show_description: bool,
    /// Colours for each role
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_bar_width: 40,
            show_values: true,
            show_description: true,
            palette: Palette::default(),
        }
    }
}

/// Something that can draw a step
#[cfg_attr(test, mockall::automock)]
pub trait StepRenderer {
    /// Prepare the backend for a surface
    fn initialize(&mut self, surface: &RenderSurface, config: &RenderConfig) -> Result<()>;

    /// Draw one step
    fn render_step(&mut self, step: &Step, config: &RenderConfig);

    /// Whether this backend can run in the current environment
    fn capability_supported(&self) -> bool;

    /// Release backend resources
    fn dispose(&mut self);
}

/// Pick the first renderer whose capability check passes
pub fn first_supported(
    candidates: Vec<Box<dyn StepRenderer>>,
) -> Option<Box<dyn StepRenderer>> {
    candidates.into_iter().find(|r| r.capability_supported())
}

// ==================== Null Renderer ====================

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl StepRenderer for NullRenderer {
    fn initialize(&mut self, _surface: &RenderSurface, _config: &RenderConfig) -> Result<()> {
        Ok(())
    }

    fn render_step(&mut self, _step: &Step, _config: &RenderConfig) {}

    fn capability_supported(&self) -> bool {
        true
    }

    fn dispose(&mut self) {}
}

// ==================== Text Renderer ====================

/// Software renderer producing one horizontal bar per element
#[derive(Debug, Default)]
pub struct TextRenderer {
    surface: Option<RenderSurface>,
    frame: String,
    frames_rendered: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently drawn frame
    pub fn last_frame(&self) -> &str {
        &self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn bar_width(&self, config: &RenderConfig) -> usize {
        let surface_limit = self
            .surface
            .map(|s| (s.width as usize).saturating_sub(24))
            .unwrap_or(usize::MAX);
        config.max_bar_width.min(surface_limit).max(1)
    }

    fn marker(step: &Step, index: usize) -> &'static str {
        let state = step.array_state();
        if state.swap_pair().is_some_and(|(a, b)| a == index || b == index) {
            "<>"
        } else if state
            .comparison_pair()
            .is_some_and(|(a, b)| a == index || b == index)
        {
            "??"
        } else if state.highlighted_indices().contains(&index) {
            "**"
        } else if state.is_sorted_index(index) {
            "ok"
        } else {
            "  "
        }
    }

    /// Render a step into a fresh string without recording it
    pub fn draw(&self, step: &Step, config: &RenderConfig) -> String {
        let data = step.data();
        let max_abs = data.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0).max(1) as u128;
        let width = self.bar_width(config);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "step {} [{}]",
            step.sequence_number(),
            step.operation().kind().display_name()
        );
        for (i, &value) in data.iter().enumerate() {
            let len = (value.unsigned_abs() as u128 * width as u128).div_ceil(max_abs) as usize;
            let fill = if value < 0 { '-' } else { '#' };
            let bar: String = std::iter::repeat(fill).take(len).collect();
            let _ = write!(out, "{:>3} {} |{:<w$}", i, Self::marker(step, i), bar, w = width);
            if config.show_values {
                let _ = write!(out, " {}", value);
            }
            out.push('\n');
        }
        if config.show_description {
            let _ = writeln!(out, "{}", step.operation().description());
        }
        out
    }
}

impl StepRenderer for TextRenderer {
    fn initialize(&mut self, surface: &RenderSurface, _config: &RenderConfig) -> Result<()> {
        if surface.width < 32 {
            return Err(SortVisError::InvalidArgument(format!(
                "text surface too narrow: {} columns",
                surface.width
            )));
        }
        self.surface = Some(*surface);
        self.frame.clear();
        Ok(())
    }

    fn render_step(&mut self, step: &Step, config: &RenderConfig) {
        self.frame = self.draw(step, config);
        self.frames_rendered += 1;
    }

    fn capability_supported(&self) -> bool {
        true
    }

    fn dispose(&mut self) {
        self.surface = None;
        self.frame.clear();
    }
}

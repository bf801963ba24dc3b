//! # SortVis-RS: Step-by-step sorting visualizer core
//!
//! Runs a sorting algorithm into a fully materialized timeline of steps and
//! turns that timeline into an interactive playback session, with a bounded
//! history of session snapshots for rewinding.
//!
//! ## Architecture
//!
//! - **Generator**: Bubble, selection and insertion sort emitting immutable [`types::Step`]s
//! - **Validator**: Structural and result checks over a step sequence
//! - **Playback**: Cursor state machine with a cooperative, cancellable auto-advance timer
//! - **History**: Snapshot ring buffer with JSON export/import
//! - **Render**: Collaborator trait handed the step at the current index
//!
//! ## Configuration
//!
//! Settings are read from `config.toml` in the platform config directory
//! under `sortvis-rs` (see [`config`]).
//!
//! ## Example
//!
//! ```ignore
//! use sortvis_rs::{
//!     app::Visualizer,
//!     config::AppConfig,
//!     playback::MonotonicClock,
//!     render::TextRenderer,
//!     types::Algorithm,
//! };
//!
//! let mut vis = Visualizer::new(
//!     AppConfig::load_or_default(),
//!     Box::new(MonotonicClock::new()),
//!     Box::new(TextRenderer::new()),
//! )?;
//! vis.set_algorithm(Algorithm::Insertion);
//! vis.set_data(vec![5, 3, 1, 4])?;
//! vis.start_sort()?;
//! vis.play();
//! loop {
//!     vis.update();
//!     if vis.state().is_completed() {
//!         break;
//!     }
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod playback;
pub mod render;
pub mod types;
pub mod validator;

pub use app::Visualizer;
pub use error::{Result, SortVisError};
pub use generator::{generate, StepGenerator, StepSequence};
pub use playback::{PlaybackController, PlaybackState};
pub use types::{Algorithm, Step};

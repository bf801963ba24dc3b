//! Error handling for SortVis-RS
//!
//! This module defines the error taxonomy shared by the generator, the
//! playback controller and the snapshot store, plus a Result alias for use
//! throughout the crate. Every fallible operation fails before touching any
//! state, so a returned error always means "nothing changed".

use thiserror::Error;

use crate::history::SnapshotId;
use crate::playback::PlaybackState;

/// Main error type for SortVis-RS operations
#[derive(Error, Debug)]
pub enum SortVisError {
    /// Input rejected by the step generator (e.g. an empty array)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Jump target outside the loaded step sequence
    #[error("Step index {index} out of range (sequence has {len} steps)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Argument outside its accepted domain (e.g. playback speed)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not permitted in the current playback state
    #[error("Cannot {operation} while {state}")]
    StateConflict {
        operation: &'static str,
        state: PlaybackState,
    },

    /// Unknown snapshot id
    #[error("Snapshot {0} not found")]
    NotFound(SnapshotId),

    /// Structurally invalid step or step sequence
    #[error("Invalid step data: {0}")]
    InvalidStep(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SortVisError>,
    },
}

impl SortVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SortVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a state conflict error
    pub fn state_conflict(operation: &'static str, state: PlaybackState) -> Self {
        SortVisError::StateConflict { operation, state }
    }

    /// Strip any context wrappers and return the underlying error
    pub fn root(&self) -> &SortVisError {
        match self {
            SortVisError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for SortVisError {
    fn from(err: serde_json::Error) -> Self {
        SortVisError::Serialization(err.to_string())
    }
}

/// Result type alias for SortVis-RS operations
pub type Result<T> = std::result::Result<T, SortVisError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

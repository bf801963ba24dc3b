//! Snapshot types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generator::StepSequence;
use crate::playback::PlaybackState;
use crate::types::Algorithm;

/// Unique identifier for a snapshot
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub u64);

impl fmt::Debug for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnapshotId({})", self.0)
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Session fields captured by a snapshot
///
/// `steps` shares its storage with the live session. Steps are immutable,
/// so sharing cannot leak mutations in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedState {
    #[serde(rename = "selectedAlgorithm")]
    pub algorithm: Algorithm,
    pub data: Vec<i64>,
    pub current_index: usize,
    pub state: PlaybackState,
    pub steps: Option<StepSequence>,
}

/// One entry in the snapshot history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: SnapshotId,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(rename = "capturedState")]
    pub captured: CapturedState,
}

impl Snapshot {
    pub fn new(id: SnapshotId, description: impl Into<String>, captured: CapturedState) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            description: description.into(),
            captured,
        }
    }
}

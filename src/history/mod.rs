//! Snapshot history ("time travel")
//!
//! After every meaningful session mutation the [`crate::app::Visualizer`]
//! records a [`Snapshot`] of the session fields into a bounded
//! [`SnapshotStore`]. Any stored snapshot can be restored, and the whole
//! history can be exported as a [`HistoryBundle`] and imported again later.

pub mod snapshot;
pub mod store;

pub use snapshot::{CapturedState, Snapshot, SnapshotId};
pub use store::{HistoryBundle, SnapshotStore};

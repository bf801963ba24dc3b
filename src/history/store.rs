//! Bounded snapshot history with export and import

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::path::Path;

use crate::config::HistoryConfig;
use crate::error::{Result, ResultExt, SortVisError};

use super::snapshot::{CapturedState, Snapshot, SnapshotId};

/// Serializable copy of the whole history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryBundle {
    pub snapshots: Vec<Snapshot>,
    pub total_count: usize,
    pub export_time: DateTime<Utc>,
}

impl HistoryBundle {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the bundle as pretty JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(SortVisError::from)
            .with_context(|| format!("Failed to write history to {:?}", path))?;
        tracing::debug!(snapshots = self.snapshots.len(), "Saved history to {:?}", path);
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(SortVisError::from)
            .with_context(|| format!("Failed to read history from {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {:?}", path))
    }
}

/// Ring buffer of session snapshots
///
/// Holds at most `max_snapshots` entries; saving past the bound drops the
/// oldest. A single `restoring` flag turns [`SnapshotStore::save_snapshot`]
/// into a no-op while a restore is being applied, so replaying a snapshot
/// never records new ones.
#[derive(Debug)]
pub struct SnapshotStore {
    snapshots: VecDeque<Snapshot>,
    max_snapshots: usize,
    next_id: u64,
    restoring: bool,
    /// Position of the most recently saved or restored snapshot
    cursor: Option<usize>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}

impl SnapshotStore {
    /// Create a store keeping at most `max_snapshots` entries (at least one)
    pub fn new(max_snapshots: usize) -> Self {
        let max_snapshots = max_snapshots.max(1);
        Self {
            snapshots: VecDeque::with_capacity(max_snapshots.min(1024)),
            max_snapshots,
            next_id: 1,
            restoring: false,
            cursor: None,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.max_snapshots)
    }

    // ==================== Accessors ====================

    pub fn max_snapshots(&self) -> usize {
        self.max_snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub fn get(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// Snapshots, oldest first
    pub fn list(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The snapshot before the cursor
    pub fn previous_id(&self) -> Option<SnapshotId> {
        let prev = self.cursor?.checked_sub(1)?;
        self.snapshots.get(prev).map(|s| s.id)
    }

    /// The snapshot after the cursor
    pub fn next_id(&self) -> Option<SnapshotId> {
        let next = self.cursor? + 1;
        self.snapshots.get(next).map(|s| s.id)
    }

    // ==================== Recording ====================

    /// Append a snapshot, evicting the oldest beyond the bound
    ///
    /// Returns `None` without recording while a restore is in progress.
    pub fn save_snapshot(
        &mut self,
        description: impl Into<String>,
        captured: CapturedState,
    ) -> Option<SnapshotId> {
        if self.restoring {
            tracing::trace!("Skipping snapshot while restoring");
            return None;
        }

        let id = SnapshotId(self.next_id);
        self.next_id += 1;

        let snapshot = Snapshot::new(id, description, captured);
        tracing::debug!(%id, description = %snapshot.description, "Saved snapshot");
        self.snapshots.push_back(snapshot);
        self.cursor = Some(self.snapshots.len() - 1);

        while self.snapshots.len() > self.max_snapshots {
            self.evict_oldest();
        }
        Some(id)
    }

    fn evict_oldest(&mut self) {
        if let Some(evicted) = self.snapshots.pop_front() {
            tracing::debug!(id = %evicted.id, "Evicted oldest snapshot");
            self.cursor = self.cursor.and_then(|c| c.checked_sub(1));
        }
    }

    // ==================== Restoring ====================

    /// Look up `id` and raise the restore guard
    ///
    /// Returns a copy of the captured state for the caller to apply. Every
    /// successful call must be paired with [`finish_restore`](Self::finish_restore)
    /// or [`abort_restore`](Self::abort_restore).
    pub fn begin_restore(&mut self, id: SnapshotId) -> Result<CapturedState> {
        let captured = self
            .get(id)
            .map(|s| s.captured.clone())
            .ok_or(SortVisError::NotFound(id))?;
        self.restoring = true;
        Ok(captured)
    }

    /// Clear the guard and move the cursor to the restored snapshot
    pub fn finish_restore(&mut self, id: SnapshotId) {
        self.restoring = false;
        if let Some(pos) = self.snapshots.iter().position(|s| s.id == id) {
            self.cursor = Some(pos);
        }
        tracing::debug!(%id, "Restored snapshot");
    }

    /// Clear the guard after a restore that could not be applied
    pub fn abort_restore(&mut self) {
        self.restoring = false;
    }

    // ==================== Bulk Operations ====================

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
        tracing::debug!("Cleared snapshot history");
    }

    /// Copy the history into a serializable bundle
    pub fn export_history(&self) -> HistoryBundle {
        HistoryBundle {
            snapshots: self.snapshots.iter().cloned().collect(),
            total_count: self.snapshots.len(),
            export_time: Utc::now(),
        }
    }

    /// Replace the history wholesale with an exported bundle
    ///
    /// Bundles larger than the bound keep their newest entries. Returns the
    /// number of snapshots now held.
    pub fn import_history(&mut self, bundle: HistoryBundle) -> Result<usize> {
        if bundle.total_count != bundle.snapshots.len() {
            return Err(SortVisError::Serialization(format!(
                "history bundle declares {} snapshots but contains {}",
                bundle.total_count,
                bundle.snapshots.len()
            )));
        }

        let mut seen = HashSet::with_capacity(bundle.snapshots.len());
        if let Some(dup) = bundle.snapshots.iter().find(|s| !seen.insert(s.id)) {
            return Err(SortVisError::Serialization(format!(
                "history bundle contains snapshot {} twice",
                dup.id
            )));
        }

        let total = bundle.snapshots.len();
        let skip = total.saturating_sub(self.max_snapshots);
        if skip > 0 {
            tracing::warn!(
                dropped = skip,
                max = self.max_snapshots,
                "Imported history exceeds bound, keeping newest snapshots"
            );
        }

        self.snapshots = bundle.snapshots.into_iter().skip(skip).collect();
        self.cursor = self.snapshots.len().checked_sub(1);
        if let Some(highest) = self.snapshots.iter().map(|s| s.id.0).max() {
            self.next_id = self.next_id.max(highest + 1);
        }

        tracing::info!(snapshots = self.snapshots.len(), "Imported snapshot history");
        Ok(self.snapshots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::playback::PlaybackState;
    use crate::types::Algorithm;

    fn captured(index: usize) -> CapturedState {
        let data = vec![3, 1, 2];
        CapturedState {
            algorithm: Algorithm::Bubble,
            steps: Some(generate(Algorithm::Bubble, &data).unwrap()),
            data,
            current_index: index,
            state: PlaybackState::Paused,
        }
    }

    #[test]
    fn test_ids_increase() {
        let mut store = SnapshotStore::new(10);
        let a = store.save_snapshot("a", captured(0)).unwrap();
        let b = store.save_snapshot("b", captured(1)).unwrap();
        assert!(b > a);
        assert_eq!(store.len(), 2);
        assert_eq!(store.latest().map(|s| s.id), Some(b));
    }

    #[test]
    fn test_eviction_keeps_bound() {
        let mut store = SnapshotStore::new(3);
        let ids: Vec<_> = (0..5)
            .map(|i| store.save_snapshot(format!("s{}", i), captured(0)).unwrap())
            .collect();

        assert_eq!(store.len(), 3);
        assert!(store.get(ids[0]).is_none());
        assert!(store.get(ids[1]).is_none());
        let kept: Vec<_> = store.list().map(|s| s.description.as_str()).collect();
        assert_eq!(kept, ["s2", "s3", "s4"]);
        assert_eq!(store.cursor(), Some(2));
    }

    #[test]
    fn test_restore_guard_blocks_saves() {
        let mut store = SnapshotStore::new(10);
        let id = store.save_snapshot("first", captured(2)).unwrap();
        store.save_snapshot("second", captured(0)).unwrap();

        let state = store.begin_restore(id).unwrap();
        assert_eq!(state.current_index, 2);
        assert!(store.is_restoring());
        assert!(store.save_snapshot("during restore", captured(1)).is_none());

        store.finish_restore(id);
        assert!(!store.is_restoring());
        assert_eq!(store.len(), 2);
        assert_eq!(store.cursor(), Some(0));
        assert!(store.save_snapshot("after", captured(1)).is_some());
    }

    #[test]
    fn test_restore_unknown_id() {
        let mut store = SnapshotStore::new(10);
        let err = store.begin_restore(SnapshotId(42)).unwrap_err();
        assert!(matches!(err, SortVisError::NotFound(SnapshotId(42))));
        assert!(!store.is_restoring());
    }

    #[test]
    fn test_cursor_navigation() {
        let mut store = SnapshotStore::new(10);
        let a = store.save_snapshot("a", captured(0)).unwrap();
        let b = store.save_snapshot("b", captured(0)).unwrap();
        let c = store.save_snapshot("c", captured(0)).unwrap();

        assert_eq!(store.previous_id(), Some(b));
        assert_eq!(store.next_id(), None);

        store.begin_restore(a).unwrap();
        store.finish_restore(a);
        assert_eq!(store.previous_id(), None);
        assert_eq!(store.next_id(), Some(b));

        store.begin_restore(c).unwrap();
        store.abort_restore();
        assert_eq!(store.cursor(), Some(0));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = SnapshotStore::new(10);
        for i in 0..4 {
            store.save_snapshot(format!("s{}", i), captured(i)).unwrap();
        }
        let bundle = store.export_history();
        assert_eq!(bundle.total_count, 4);

        let json = bundle.to_json().unwrap();
        assert!(json.contains("\"totalCount\": 4"));
        assert!(json.contains("\"exportTime\""));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), None);

        let restored = HistoryBundle::from_json(&json).unwrap();
        assert_eq!(store.import_history(restored).unwrap(), 4);
        for (original, imported) in bundle.snapshots.iter().zip(store.list()) {
            assert_eq!(original.description, imported.description);
            assert_eq!(original.captured, imported.captured);
        }

        let fresh = store.save_snapshot("new", captured(0)).unwrap();
        assert!(bundle.snapshots.iter().all(|s| s.id < fresh));
    }

    #[test]
    fn test_import_rejects_count_mismatch() {
        let mut store = SnapshotStore::new(10);
        store.save_snapshot("keep", captured(0)).unwrap();
        let mut bundle = store.export_history();
        bundle.total_count = 9;

        assert!(matches!(
            store.import_history(bundle),
            Err(SortVisError::Serialization(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_truncates_to_newest() {
        let mut big = SnapshotStore::new(10);
        for i in 0..6 {
            big.save_snapshot(format!("s{}", i), captured(0)).unwrap();
        }

        let mut small = SnapshotStore::new(4);
        assert_eq!(small.import_history(big.export_history()).unwrap(), 4);
        assert_eq!(small.list().next().unwrap().description, "s2");
        assert_eq!(small.cursor(), Some(3));
    }

    #[test]
    fn test_bundle_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = SnapshotStore::new(5);
        store.save_snapshot("Sort started", captured(1)).unwrap();
        let bundle = store.export_history();
        bundle.save_to_file(&path).unwrap();

        let loaded = HistoryBundle::load_from_file(&path).unwrap();
        assert_eq!(loaded, bundle);

        let missing = HistoryBundle::load_from_file(dir.path().join("missing.json"));
        assert!(matches!(
            missing.unwrap_err().root(),
            SortVisError::Io(_)
        ));
    }
}

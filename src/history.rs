//! Snapshot-based undo/redo history.
//!
//! The history is a linear sequence of whole [`SegmentationData`]
//! snapshots plus a current index. Committing a new snapshot while undone
//! truncates the redo tail; undo/redo move the index and are no-ops at
//! the boundaries. Invariant: `index < snapshots.len()` always holds and
//! the sequence is never empty (it starts with the initial state).

use crate::model::SegmentationData;

/// Configuration for the history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of snapshots to keep.
    pub max_snapshots: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_snapshots: crate::constants::history::MAX_SNAPSHOTS,
        }
    }
}

/// Linear undo/redo history of segmentation snapshots.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<SegmentationData>,
    index: usize,
    config: HistoryConfig,
}

impl History {
    /// Create a history seeded with the initial state.
    pub fn new(initial: SegmentationData) -> Self {
        Self::with_config(initial, HistoryConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(initial: SegmentationData, config: HistoryConfig) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
            config,
        }
    }

    /// The snapshot at the current index.
    pub fn current(&self) -> &SegmentationData {
        &self.snapshots[self.index]
    }

    /// Commit a new snapshot.
    ///
    /// Any redo-able future beyond the current index is discarded first;
    /// then the snapshot is appended and the index advances. The oldest
    /// snapshots are dropped beyond `max_snapshots`.
    pub fn push(&mut self, snapshot: SegmentationData) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index += 1;

        while self.snapshots.len() > self.config.max_snapshots.max(1) {
            self.snapshots.remove(0);
            self.index -= 1;
        }
        log::debug!("📝 History: snapshot {}/{}", self.index + 1, self.snapshots.len());
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Step back one snapshot. Returns the restored state, or `None` at
    /// the beginning of history.
    pub fn undo(&mut self) -> Option<&SegmentationData> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        log::debug!("⏪ Undo to snapshot {}/{}", self.index + 1, self.snapshots.len());
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. Returns the restored state, or `None`
    /// at the end of history.
    pub fn redo(&mut self) -> Option<&SegmentationData> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        log::debug!("⏩ Redo to snapshot {}/{}", self.index + 1, self.snapshots.len());
        Some(&self.snapshots[self.index])
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// A history always holds at least the initial snapshot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The current snapshot index.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Polygon, PolygonKind};
    use mseg_geom::Point;

    fn state_with(n: usize) -> SegmentationData {
        let mut data = SegmentationData::new(100, 100);
        for i in 0..n {
            data.polygons.push(Polygon::new(
                format!("p{i}"),
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(10.0, 0.0),
                    Point::new(5.0, 8.0),
                ],
                PolygonKind::External,
            ));
        }
        data
    }

    #[test]
    fn test_undo_redo_restores_exactly() {
        let a = state_with(0);
        let b = state_with(1);

        let mut history = History::new(a.clone());
        history.push(b.clone());

        assert_eq!(history.undo(), Some(&a));
        assert_eq!(history.redo(), Some(&b));
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut history = History::new(state_with(0));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_after_undo_discards_redo() {
        let mut history = History::new(state_with(0));
        history.push(state_with(1));
        history.push(state_with(2));

        history.undo();
        assert!(history.can_redo());

        let c = state_with(3);
        history.push(c.clone());
        assert!(!history.can_redo());
        assert_eq!(history.current(), &c);
        assert_eq!(history.len(), 3); // initial, state(1), state(3)
    }

    #[test]
    fn test_max_snapshots_drops_oldest() {
        let mut history =
            History::with_config(state_with(0), HistoryConfig { max_snapshots: 3 });
        for i in 1..=5 {
            history.push(state_with(i));
        }
        assert_eq!(history.len(), 3);
        // Newest state is still current and undo bottoms out at state(3).
        assert_eq!(history.current(), &state_with(5));
        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current(), &state_with(3));
    }

    #[test]
    fn test_index_tracks_position() {
        let mut history = History::new(state_with(0));
        assert_eq!(history.index(), 0);
        history.push(state_with(1));
        assert_eq!(history.index(), 1);
        history.undo();
        assert_eq!(history.index(), 0);
    }
}

// Snapshot history for timeline playback

use crate::model::ModelState;
use crate::parser::Operation;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// State of the model right after one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub sequence_index: usize,
    pub operation: Operation,
    pub source_line: usize,
    pub model: ModelState,
    /// Short human-readable description of what the operation did
    pub effect: String,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(
        sequence_index: usize,
        operation: Operation,
        model: ModelState,
        effect: String,
    ) -> Self {
        Snapshot {
            sequence_index,
            source_line: operation.source_line,
            operation,
            model,
            effect,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, read-only snapshot sequence of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
}

impl Timeline {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Timeline { snapshots }
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the final snapshot, `None` when empty
    pub fn last_index(&self) -> Option<usize> {
        self.snapshots.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

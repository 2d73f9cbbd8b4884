//! Diagnostics emitted while merging rows
//!
//! The merge pipeline reports what it did through a [`MergeObserver`] rather
//! than writing anywhere itself. The CLI uses [`TracingObserver`]; tests
//! collect events into a `Vec<MergeEvent>`.

use crate::mapping::Mapping;

/// Something noteworthy that happened during a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// An index column was joined onto its referencing column
    Joined {
        ref_column: String,
        index_column: String,
        /// Rows in the working table after the join
        rows: usize,
    },
    /// Both sides of a join populate the same columns, so it was not applied
    JoinSkipped {
        ref_column: String,
        index_column: String,
        entity: String,
        overlap: Vec<String>,
    },
    /// The header holds no index/referencing column pairs
    NoMappings,
}

impl MergeEvent {
    pub(crate) fn joined(mapping: &Mapping, rows: usize) -> Self {
        MergeEvent::Joined {
            ref_column: mapping.ref_column.clone(),
            index_column: mapping.index_column.clone(),
            rows,
        }
    }

    pub(crate) fn skipped(mapping: &Mapping, overlap: Vec<String>) -> Self {
        MergeEvent::JoinSkipped {
            ref_column: mapping.ref_column.clone(),
            index_column: mapping.index_column.clone(),
            entity: mapping.entity().to_string(),
            overlap,
        }
    }

    /// True for events that indicate data could not be merged
    pub fn is_warning(&self) -> bool {
        !matches!(self, MergeEvent::Joined { .. })
    }
}

/// Receiver for merge diagnostics
pub trait MergeObserver {
    /// Called once per event, in the order events occur
    fn on_event(&mut self, event: &MergeEvent);
}

/// Records every event, for inspection after the merge
impl MergeObserver for Vec<MergeEvent> {
    fn on_event(&mut self, event: &MergeEvent) {
        self.push(event.clone());
    }
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MergeObserver for TracingObserver {
    fn on_event(&mut self, event: &MergeEvent) {
        match event {
            MergeEvent::Joined {
                ref_column,
                index_column,
                rows,
            } => {
                tracing::info!(rows, "Joining {} onto {}", index_column, ref_column);
            }
            MergeEvent::JoinSkipped {
                ref_column,
                index_column,
                entity,
                overlap,
            } => {
                tracing::warn!(
                    %ref_column,
                    %entity,
                    "Encountered overlapping columns when trying to merge {}: {}",
                    index_column,
                    overlap.join(", ")
                );
            }
            MergeEvent::NoMappings => {
                tracing::warn!(
                    "Failed to find any join operations which could be performed. \
                     Maybe the export has no index columns (*.id or *.@id)?"
                );
            }
        }
    }
}

// src/sync.rs
use crate::history::LoggedSet;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Remote sync target '{0}' rejected the record: {1}")]
    Rejected(String, String),
    #[error("Remote sync target '{0}' is unreachable")]
    Unreachable(String),
}

/// Record pushed to the remote sheet. Column order follows `to_row`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SyncRecord {
    pub timestamp: DateTime<Utc>,
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    pub notes: String,
}

impl From<&LoggedSet> for SyncRecord {
    fn from(entry: &LoggedSet) -> Self {
        Self {
            timestamp: entry.timestamp,
            exercise: entry.exercise_name.clone(),
            weight: entry.weight,
            reps: entry.reps,
            notes: entry.notes.clone(),
        }
    }
}

impl SyncRecord {
    /// Sheet row: Date, Exercise, Weight, Reps, Notes.
    #[must_use]
    pub fn to_row(&self) -> [String; 5] {
        [
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.exercise.clone(),
            self.weight.to_string(),
            self.reps.to_string(),
            self.notes.clone(),
        ]
    }
}

/// Outcome of forwarding a logged set to the remote target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No sheet URL configured.
    Skipped,
    /// A sheet URL is configured but has no extractable ID.
    InvalidTarget,
    Sent,
    Failed(String),
}

/// Remote-sync collaborator. Best effort: callers never undo local state on failure.
pub trait RemoteSync {
    /// # Errors
    /// Returns `SyncError` if the target does not accept the record.
    fn push(&self, sheet_id: &str, record: &SyncRecord) -> Result<(), SyncError>;
}

/// Stand-in target until a real endpoint exists: logs the row and accepts it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalOnlySync;

impl RemoteSync for LocalOnlySync {
    fn push(&self, sheet_id: &str, record: &SyncRecord) -> Result<(), SyncError> {
        info!(
            "Sheet {}: row {:?} kept locally, no remote endpoint configured",
            sheet_id,
            record.to_row()
        );
        Ok(())
    }
}

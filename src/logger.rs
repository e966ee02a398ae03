// src/logger.rs
use crate::catalog::Exercise;
use crate::history::{HistoryStore, LoggedSet};
use crate::settings::Settings;
use crate::sheet;
use crate::storage::StorageError;
use crate::sync::{LocalOnlySync, RemoteSync, SyncRecord, SyncStatus};
use chrono::{SubsecRound, Utc};
use std::cell::RefCell;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No exercise selected.")]
    MissingExercise,
    #[error("Weight is missing or not a number: '{0}'")]
    MissingOrInvalidWeight(String),
    #[error("Reps are missing or not a whole number: '{0}'")]
    MissingOrInvalidReps(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to save workout history: {0}")]
    Storage(#[from] StorageError),
}

/// Raw form input for one set, exactly as the user typed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSetParams<'a> {
    pub exercise: Option<&'a Exercise>,
    pub weight: &'a str,
    pub reps: &'a str,
    pub notes: &'a str,
    pub category: &'a str,
}

/// Validated weight and reps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetInput<'a> {
    pub exercise: &'a Exercise,
    pub weight: f64,
    pub reps: u32,
}

/// Checks exercise, weight and reps in that order, stopping at the first failure.
/// # Errors
/// Returns the `ValidationError` for the first invalid field.
pub fn validate<'a>(params: &LogSetParams<'a>) -> Result<SetInput<'a>, ValidationError> {
    let exercise = params.exercise.ok_or(ValidationError::MissingExercise)?;

    let weight = params
        .weight
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| ValidationError::MissingOrInvalidWeight(params.weight.to_string()))?;

    let reps = params
        .reps
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::MissingOrInvalidReps(params.reps.to_string()))?;

    Ok(SetInput {
        exercise,
        weight,
        reps,
    })
}

/// Turns form input into a committed `LoggedSet`: validate, timestamp,
/// persist locally, then forward to the remote target if one is configured.
pub struct WorkoutLogger {
    remote: Box<dyn RemoteSync>,
    last_sync: RefCell<Option<SyncStatus>>,
}

impl Default for WorkoutLogger {
    fn default() -> Self {
        Self::new(Box::new(LocalOnlySync))
    }
}

impl WorkoutLogger {
    pub fn new(remote: Box<dyn RemoteSync>) -> Self {
        Self {
            remote,
            last_sync: RefCell::new(None),
        }
    }

    /// Validates and records one set. History is only touched on success.
    ///
    /// # Errors
    /// - `SubmitError::Validation` if the input is incomplete or malformed.
    /// - `SubmitError::Storage` if the updated history cannot be persisted.
    pub fn submit(
        &self,
        history: &mut HistoryStore,
        settings: &Settings,
        params: LogSetParams<'_>,
    ) -> Result<LoggedSet, SubmitError> {
        let input = validate(&params)?;

        let entry = LoggedSet {
            exercise_name: input.exercise.name.to_string(),
            weight: input.weight,
            reps: input.reps,
            notes: params.notes.to_string(),
            category: params.category.to_string(),
            timestamp: Utc::now().trunc_subsecs(3),
        };

        history.append(entry.clone())?;
        info!(
            "Logged {} x {} for '{}' ({})",
            entry.weight, entry.reps, entry.exercise_name, entry.category
        );

        let status = self.forward(settings, &entry);
        *self.last_sync.borrow_mut() = Some(status);
        Ok(entry)
    }

    /// Outcome of the sync attempt made by the most recent successful `submit`.
    pub fn last_sync_status(&self) -> Option<SyncStatus> {
        self.last_sync.borrow().clone()
    }

    // One attempt, no retry or queue. Local history is already committed.
    fn forward(&self, settings: &Settings, entry: &LoggedSet) -> SyncStatus {
        if !settings.has_sheet_url() {
            return SyncStatus::Skipped;
        }
        let sheet_id = match sheet::extract_id(&settings.sheet_url) {
            Ok(id) => id,
            Err(e) => {
                warn!("Remote sync skipped: {}", e);
                return SyncStatus::InvalidTarget;
            }
        };
        match self.remote.push(sheet_id, &SyncRecord::from(entry)) {
            Ok(()) => SyncStatus::Sent,
            Err(e) => {
                warn!("Remote sync failed, set kept locally: {}", e);
                SyncStatus::Failed(e.to_string())
            }
        }
    }
}

// src/history.rs
use crate::storage::{KeyValueStore, StorageError, HISTORY_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, warn};

/// Maximum number of logged sets kept, newest first.
pub const HISTORY_CAPACITY: usize = 20;

/// A completed set. Created once by the logger, never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedSet {
    #[serde(alias = "exercise")] // Older history entries use this name
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub category: String, // Program key
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-03-01T18:04:05.123Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

/// Bounded, append-only history of logged sets, mirrored to the key-value store.
pub struct HistoryStore {
    backend: Rc<dyn KeyValueStore>,
    entries: Vec<LoggedSet>,
}

impl HistoryStore {
    /// Creates an empty store. Call `load` to restore persisted entries.
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            entries: Vec::new(),
        }
    }

    /// Restores the persisted history. Absent, unreadable or corrupt data
    /// yields an empty history.
    pub fn load(&mut self) -> Vec<LoggedSet> {
        self.entries = match self.backend.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LoggedSet>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_CAPACITY);
                    entries
                }
                Err(e) => {
                    warn!("Discarding corrupt workout history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read workout history, starting empty: {}", e);
                Vec::new()
            }
        };
        debug!("Loaded {} logged sets", self.entries.len());
        self.entries.clone()
    }

    /// Inserts `entry` as the most recent set, evicting the oldest beyond
    /// capacity, persists the result and returns it.
    ///
    /// # Errors
    /// Returns `StorageError` if the new view cannot be serialized or written;
    /// the in-memory view is unchanged in that case.
    pub fn append(&mut self, entry: LoggedSet) -> Result<Vec<LoggedSet>, StorageError> {
        let mut updated = Vec::with_capacity(HISTORY_CAPACITY);
        updated.push(entry);
        updated.extend(
            self.entries
                .iter()
                .take(HISTORY_CAPACITY - 1)
                .cloned(),
        );

        let raw = serde_json::to_string(&updated).map_err(|source| StorageError::Serialize {
            key: HISTORY_KEY.to_string(),
            source,
        })?;
        self.backend.set(HISTORY_KEY, &raw)?;

        self.entries = updated;
        Ok(self.entries.clone())
    }

    /// The first `n` entries of the in-memory view, newest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[LoggedSet] {
        &self.entries[..n.min(self.entries.len())]
    }

    #[must_use]
    pub fn entries(&self) -> &[LoggedSet] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

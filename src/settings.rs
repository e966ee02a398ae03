// src/settings.rs
use crate::sheet::SheetIdError;
use crate::storage::{KeyValueStore, StorageError, SHEET_URL_KEY};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    InvalidUrl(#[from] SheetIdError),
    #[error("Failed to save settings: {0}")]
    Storage(#[from] StorageError),
}

/// User-editable settings persisted in the key-value store.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sheet_url: String, // Empty = remote sync not configured
}

impl Settings {
    #[must_use]
    pub fn has_sheet_url(&self) -> bool {
        !self.sheet_url.is_empty()
    }
}

/// Lazily-loaded settings record. The first `load` reads the backend; later
/// loads return the cached value, which `save` keeps in step.
pub struct SettingsStore {
    backend: Rc<dyn KeyValueStore>,
    cached: Option<Settings>,
}

impl SettingsStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            cached: None,
        }
    }

    /// Returns the current settings. Missing or unreadable storage yields the defaults.
    pub fn load(&mut self) -> Settings {
        if let Some(settings) = &self.cached {
            return settings.clone();
        }
        let settings = match self.backend.get(SHEET_URL_KEY) {
            Ok(Some(sheet_url)) => Settings { sheet_url },
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("Could not read settings, using defaults: {}", e);
                Settings::default()
            }
        };
        self.cached = Some(settings.clone());
        settings
    }

    /// Persists `settings`; subsequent `load` calls observe the new value.
    /// # Errors
    /// Returns `StorageError` if the backend write fails. The cached value is left unchanged.
    pub fn save(&mut self, settings: Settings) -> Result<(), StorageError> {
        self.backend.set(SHEET_URL_KEY, &settings.sheet_url)?;
        debug!("Saved settings (sheet URL set: {})", settings.has_sheet_url());
        self.cached = Some(settings);
        Ok(())
    }
}

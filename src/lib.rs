use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// --- Declare modules ---
pub mod catalog;
mod config;
pub mod export;
pub mod history;
pub mod logger;
pub mod settings;
pub mod sheet;
pub mod storage;
pub mod sync;

// --- Expose public types ---
pub use catalog::{CatalogError, Exercise, ExerciseKind, Program, ProgramCatalog};
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, Config, ConfigError, StandardColor, Theme, Units,
};
pub use history::{HistoryStore, LoggedSet, HISTORY_CAPACITY};
pub use logger::{LogSetParams, SubmitError, ValidationError, WorkoutLogger};
pub use settings::{Settings, SettingsError, SettingsStore};
pub use sheet::{extract_id, SheetIdError};
pub use storage::{
    get_db_path as get_db_path_util, KeyValueStore, MemoryStore, SqliteStore, StorageError,
};
pub use sync::{LocalOnlySync, RemoteSync, SyncError, SyncRecord, SyncStatus};

/// Upper bound accepted for `Config::recent_limit`; history never holds more.
pub const MAX_RECENT_LIMIT: usize = HISTORY_CAPACITY;

pub struct AppService {
    pub config: Config,
    pub catalog: ProgramCatalog,
    pub settings: SettingsStore,
    pub history: HistoryStore,
    pub logger: WorkoutLogger,
    pub db_path: PathBuf,
    pub config_path: PathBuf,
}

impl AppService {
    /// Initializes the application service from the user's config and data directories.
    /// # Errors
    /// Returns `anyhow::Error` if config/db path determination, loading, or initialization fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        let db_path = storage::get_db_path().context("Failed to determine database path")?;
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database at {db_path:?}"))?;

        Ok(Self::with_backend(
            config,
            config_path,
            db_path,
            Rc::new(store),
            WorkoutLogger::default(),
        ))
    }

    /// Builds a service over an explicit storage backend and sync collaborator,
    /// restoring persisted settings and history from it.
    pub fn with_backend(
        config: Config,
        config_path: PathBuf,
        db_path: PathBuf,
        backend: Rc<dyn KeyValueStore>,
        logger: WorkoutLogger,
    ) -> Self {
        let mut settings = SettingsStore::new(Rc::clone(&backend));
        settings.load();
        let mut history = HistoryStore::new(backend);
        history.load();

        Self {
            config,
            catalog: ProgramCatalog::reference(),
            settings,
            history,
            logger,
            db_path,
            config_path,
        }
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    /// Sets the weight units shown in tables and exports.
    /// # Errors
    /// Returns `ConfigError` variants if saving fails.
    pub fn set_units(&mut self, units: Units) -> Result<(), ConfigError> {
        self.config.units = units;
        self.save_config()
    }

    /// Sets how many sets `recent` shows by default.
    /// # Errors
    /// - `ConfigError::InvalidRecentLimit` if `limit` is 0 or above the history capacity.
    /// - `ConfigError` variants if saving fails.
    pub fn set_recent_limit(&mut self, limit: usize) -> Result<(), ConfigError> {
        if limit == 0 || limit > MAX_RECENT_LIMIT {
            return Err(ConfigError::InvalidRecentLimit {
                got: limit,
                max: MAX_RECENT_LIMIT,
            });
        }
        self.config.recent_limit = limit;
        self.save_config()
    }

    /// Looks up a program by key.
    /// # Errors
    /// Returns `CatalogError::NotFound` for unknown keys.
    pub fn get_program(&self, key: &str) -> Result<&'static Program, CatalogError> {
        self.catalog.get_program(key)
    }

    /// Validates and records one set, then attempts remote sync.
    /// # Errors
    /// Returns `SubmitError` on invalid input or if history cannot be persisted.
    pub fn log_set(&mut self, params: LogSetParams<'_>) -> Result<LoggedSet, SubmitError> {
        let settings = self.settings.load();
        self.logger.submit(&mut self.history, &settings, params)
    }

    pub fn last_sync_status(&self) -> Option<SyncStatus> {
        self.logger.last_sync_status()
    }

    #[must_use]
    pub fn recent(&self, n: usize) -> &[LoggedSet] {
        self.history.recent(n)
    }

    pub fn settings(&mut self) -> Settings {
        self.settings.load()
    }

    /// Validates and stores the sheet URL. Blank input clears it.
    /// Returns the extracted sheet ID when a URL was set.
    /// # Errors
    /// - `SettingsError::InvalidUrl` if the URL has no sheet ID; settings are unchanged.
    /// - `SettingsError::Storage` if the new value cannot be persisted.
    pub fn set_sheet_url(&mut self, url: &str) -> Result<Option<String>, SettingsError> {
        let trimmed = url.trim();
        let sheet_id = if trimmed.is_empty() {
            None
        } else {
            Some(sheet::extract_id(trimmed)?.to_string())
        };
        self.settings.save(Settings {
            sheet_url: trimmed.to_string(),
        })?;
        Ok(sheet_id)
    }

    /// # Errors
    /// Returns `SettingsError::Storage` if the cleared value cannot be persisted.
    pub fn clear_sheet_url(&mut self) -> Result<(), SettingsError> {
        self.set_sheet_url("").map(|_| ())
    }

    /// Writes the full history as CSV.
    /// # Errors
    /// Returns `anyhow::Error` if writing fails.
    pub fn export_history_csv<W: Write>(&self, out: W) -> Result<()> {
        export::write_history_csv(out, self.history.entries(), self.config.units)
            .context("Failed to write history CSV")
    }
}

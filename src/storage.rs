// src/storage.rs
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const DB_FILE_NAME: &str = "gymflow.sqlite";
const APP_DATA_DIR: &str = "gymflow";
const DATA_ENV_VAR: &str = "GYMFLOW_DATA_DIR";

/// Persisted key of the sync target URL.
pub const SHEET_URL_KEY: &str = "settings.sheetUrl";
/// Persisted key of the logged-set history (JSON array, newest first).
pub const HISTORY_KEY: &str = "history.loggedSets";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed")]
    Connection(#[from] rusqlite::Error),
    #[error("Failed to get application data directory")]
    DataDir,
    #[error("I/O error accessing database file")]
    Io(#[from] std::io::Error),
    #[error("Storage read failed for key '{key}': {source}")]
    ReadFailed {
        key: String,
        source: rusqlite::Error,
    },
    #[error("Storage write failed for key '{key}': {source}")]
    WriteFailed {
        key: String,
        source: rusqlite::Error,
    },
    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// Process-local string key-value persistence shared by the settings and history stores.
pub trait KeyValueStore {
    /// # Errors
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Inserts or replaces the value under `key`.
    /// # Errors
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed store; values survive process restarts.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and its schema.
    /// # Errors
    /// Returns `StorageError::Connection` if the file cannot be opened or initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = open_db(path)?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// # Errors
    /// Returns `StorageError::Connection` if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!("Reading key '{}'", key);
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|source| StorageError::ReadFailed {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!("Writing key '{}' ({} bytes)", key, value.len());
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|source| StorageError::WriteFailed {
                key: key.to_string(),
                source,
            })
    }
}

/// Gets the path to the SQLite database file within the app's data directory.
/// Creates the directory if it doesn't exist.
/// # Errors
/// Returns `StorageError::DataDir` if no data directory is known, or `Io` if it cannot be created.
pub fn get_db_path() -> Result<PathBuf, StorageError> {
    let app_dir = match std::env::var_os(DATA_ENV_VAR) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_dir()
            .ok_or(StorageError::DataDir)?
            .join(APP_DATA_DIR),
    };
    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir)?;
    }
    Ok(app_dir.join(DB_FILE_NAME))
}

/// Opens a connection to the SQLite database.
/// # Errors
/// Returns `StorageError::Connection` if the database cannot be opened.
pub fn open_db<P: AsRef<Path>>(path: P) -> Result<Connection, StorageError> {
    Connection::open(path).map_err(StorageError::Connection)
}

/// Initializes the key-value table if it doesn't exist.
/// # Errors
/// Returns `StorageError::Connection` if the statement fails.
pub fn init_db(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(StorageError::Connection)?;
    Ok(())
}

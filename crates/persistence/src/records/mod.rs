//! SQLite record store for canonical book records.

mod schema;
mod store;

use std::fmt::Debug;
use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Configuration for the SQLite record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// SQLite-backed store for [`crate::model::Book`] records.
pub struct SqliteRecordStore {
    pool: Pool<SqliteConnectionManager>,
    config: RecordStoreConfig,
}

impl Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecordStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteRecordStore {
    /// Creates an in-memory store.
    ///
    /// The pool is capped at a single connection: every handle must see
    /// the same in-memory database.
    pub fn in_memory() -> StorageResult<Self> {
        let config = RecordStoreConfig {
            max_connections: 1,
            ..Default::default()
        };
        Self::with_config(":memory:", config)
    }

    /// Opens or creates a file-based store with default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, RecordStoreConfig::default())
    }

    /// Creates a store with custom configuration.
    pub fn with_config<P: AsRef<Path>>(
        path: P,
        config: RecordStoreConfig,
    ) -> StorageResult<Self> {
        let manager = SqliteConnectionManager::file(path.as_ref());

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(std::time::Duration::from_millis(
                config.connection_timeout_ms,
            ))
            .build(manager)
            .map_err(|e| StorageError::ConnectionFailed {
                backend: "sqlite",
                message: e.to_string(),
            })?;

        let store = Self { pool, config };

        {
            let conn = store.get_connection()?;
            conn.busy_timeout(std::time::Duration::from_millis(
                store.config.busy_timeout_ms as u64,
            ))
            .map_err(|e| StorageError::sqlite(format!("Failed to set busy timeout: {}", e)))?;
        }

        Ok(store)
    }

    /// Initializes the schema. Safe to call on an existing database.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize(&conn)
    }

    /// Answers whether the store is reachable.
    pub fn ping(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| StorageError::sqlite(format!("Ping failed: {}", e)))
    }

    pub(crate) fn get_connection(
        &self,
    ) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| StorageError::ConnectionFailed {
            backend: "sqlite",
            message: e.to_string(),
        })
    }
}

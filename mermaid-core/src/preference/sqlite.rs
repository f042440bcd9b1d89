//! SQLite-backed durable tier. One table `preferences (key, value)`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::{BackendError, DurableBackend, DurableConnector};

/// Durable backend over a SQLite file.
///
/// Each call opens the file on a blocking thread, so the handle is cheap to share.
pub struct SqliteBackend {
    db_path: PathBuf,
}

impl SqliteBackend {
    /// Opens (or creates) the database file and ensures the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let db_path = path.as_ref().to_path_buf();
        let conn = rusqlite::Connection::open(&db_path)
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
            [],
        )
        .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(Self { db_path })
    }
}

#[async_trait]
impl DurableBackend for SqliteBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let key = key.to_string();
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = rusqlite::Connection::open(&db_path)?;
            let value = conn
                .query_row(
                    "SELECT value FROM preferences WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok::<Option<String>, BackendError>(value)
        })
        .await
        .map_err(|e| BackendError::Operation(e.to_string()))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let key = key.to_string();
        let value = value.to_string();
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = rusqlite::Connection::open(&db_path)?;
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok::<(), BackendError>(())
        })
        .await
        .map_err(|e| BackendError::Operation(e.to_string()))?
    }
}

/// Connects a [`SqliteBackend`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DurableConnector for SqliteConnector {
    async fn connect(&self) -> Result<Arc<dyn DurableBackend>, BackendError> {
        let path = self.path.clone();
        let backend = tokio::task::spawn_blocking(move || SqliteBackend::open(path))
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))??;
        Ok(Arc::new(backend))
    }
}

//! Durable key-value storage
//!
//! Pathway snapshots are stored as a handful of string values under fixed
//! keys. [`SqliteKvStore`] keeps them in the `settings` table of the pathway
//! database; [`MemoryKvStore`] keeps them in process memory for tests and
//! hosts without a writable disk.
//!
//! `put_all` is atomic: either every entry is written or none is.

use crate::db::init_database;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// String key-value storage with atomic multi-key writes
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write all entries atomically
    async fn put_all(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Write a single entry
    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.put_all(&[(key, value)]).await
    }
}

/// Key-value store backed by the SQLite `settings` table
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Open (creating if needed) the database file and wrap it
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = init_database(db_path).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.flatten())
    }

    async fn put_all(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for (key, value) in entries {
            sqlx::query(
                "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
            )
            .bind(*key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!("Persisted {} setting(s)", entries.len());
        Ok(())
    }
}

#[derive(Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    read_only: bool,
}

/// In-process key-value store
///
/// Clones share the same underlying map, so a handle kept outside a
/// pathway store observes every write the store makes.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject all subsequent writes (simulates an exhausted storage quota)
    pub fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.lock()?.read_only = read_only;
        Ok(())
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.values.get(key).cloned())
    }

    async fn put_all(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.read_only {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        for (key, value) in entries {
            inner.values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

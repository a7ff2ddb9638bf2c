//! Tests for database initialization and the SQLite key-value store
//!
//! Covers:
//! - Automatic database creation with default schema
//! - Reopening an existing database
//! - settings-table backed get/put semantics

use pwc_common::db::{init_database, schema_version, SCHEMA_VERSION};
use pwc_common::{KeyValueStore, SqliteKvStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("sub").join("pathways.db");

    let pool = init_database(&db_path).await;
    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("pathways.db");

    let pool1 = init_database(&db_path).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_schema_version_recorded() {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("pathways.db")).await.unwrap();

    assert_eq!(schema_version(&pool).await.unwrap(), SCHEMA_VERSION);
}

#[tokio::test]
async fn test_sqlite_store_missing_key() {
    let temp_dir = TempDir::new().unwrap();
    let store = SqliteKvStore::open(&temp_dir.path().join("pathways.db")).await.unwrap();

    assert_eq!(store.get("pathways").await.unwrap(), None);
}

#[tokio::test]
async fn test_sqlite_store_put_all_and_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let store = SqliteKvStore::open(&temp_dir.path().join("pathways.db")).await.unwrap();

    store
        .put_all(&[("pathways", "{}".to_string()), ("isDarkMode", "false".to_string())])
        .await
        .unwrap();
    store.put("isDarkMode", "true".to_string()).await.unwrap();

    assert_eq!(store.get("pathways").await.unwrap().as_deref(), Some("{}"));
    assert_eq!(store.get("isDarkMode").await.unwrap().as_deref(), Some("true"));
}

#[tokio::test]
async fn test_sqlite_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("pathways.db");

    {
        let store = SqliteKvStore::open(&db_path).await.unwrap();
        store.put("isDarkMode", "true".to_string()).await.unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteKvStore::open(&db_path).await.unwrap();
    assert_eq!(reopened.get("isDarkMode").await.unwrap().as_deref(), Some("true"));
}

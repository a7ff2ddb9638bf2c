//! # Pathway Composer Common Library
//!
//! Shared infrastructure for the Pathway Composer crates:
//! - Error and result types
//! - Root folder resolution and TOML bootstrap configuration
//! - Tracing subscriber initialization
//! - Durable key-value storage (SQLite `settings` table, in-memory variant)
//! - Identifier helpers

pub mod config;
pub mod db;
pub mod error;
pub mod kv;
pub mod logging;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};

//! PInfo Store - persistent key/value backends
//!
//! Provides:
//! - `SqliteKvStore`: SQLite table with embedded migrations, one transaction per batch
//! - `JsonFileStore`: flat JSON settings file replaced atomically on each commit
//! - Migrations framework with checksum verification

pub mod db;
pub mod errors;
pub mod json;
pub mod migrations;
pub mod sqlite_kv;

// Re-export key types
pub use errors::Result;
pub use json::JsonFileStore;
pub use sqlite_kv::SqliteKvStore;

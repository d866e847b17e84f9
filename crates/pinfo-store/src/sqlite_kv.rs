//! SQLite-backed key/value store

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use pinfo_core::kv::{KeyValueStore, KvValue, WriteBatch};
use pinfo_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::db;
use crate::errors::{from_rusqlite, lock_poisoned, Result};
use crate::migrations::apply_migrations;

const BACKEND: &str = "sqlite";

/// Entries live in the `kv_entries` table, one row per key
///
/// Every batch is applied inside a single `IMMEDIATE` transaction, so a
/// failed commit leaves no partial update behind and commits from separate
/// handles on one file are serialized (last writer wins per batch).
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Open (or create) the database at `path` and bring its schema up to date
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or a migration cannot be applied.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Fresh in-memory database with the schema applied
    ///
    /// # Errors
    ///
    /// Fails if the migrations cannot be applied.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        apply_migrations(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap a connection whose schema is already migrated
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn read(&self, key: &str) -> Result<Option<KvValue>> {
        let conn = self.conn.lock().map_err(|_| lock_poisoned(BACKEND))?;
        let row: Option<(Option<String>, Option<i64>)> = conn
            .query_row(
                "SELECT text_value, int_value FROM kv_entries WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(from_rusqlite)?;

        Ok(row.and_then(|(text, int)| match (text, int) {
            (Some(s), None) => Some(KvValue::Text(s)),
            (None, Some(v)) => Some(KvValue::Long(v)),
            _ => None,
        }))
    }

    fn read_or_log(&self, key: &str) -> Option<KvValue> {
        self.read(key)
            .map_err(|e| {
                tracing::warn!(key = key, error = %e, "read failed; using default");
            })
            .ok()
            .flatten()
    }

    fn try_commit(&self, batch: WriteBatch) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| lock_poisoned(BACKEND))?;
        let now = chrono::Utc::now().timestamp_millis();

        // take the write lock up front so a second handle waits instead of
        // failing on a stale read snapshot
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT INTO kv_entries (key, text_value, int_value, updated_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(key) DO UPDATE SET
                        text_value = excluded.text_value,
                        int_value = excluded.int_value,
                        updated_at = excluded.updated_at",
                )
                .map_err(from_rusqlite)?;

            for (key, value) in batch {
                let (text, int) = match value {
                    KvValue::Text(s) => (Some(s), None),
                    KvValue::Long(v) => (None, Some(v)),
                };
                stmt.execute(params![key, text, int, now])
                    .map_err(|e| from_rusqlite(e).with_key(key.clone()))?;
            }
        }
        tx.commit().map_err(from_rusqlite)
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.read_or_log(key) {
            Some(KvValue::Text(s)) => s,
            _ => default.to_string(),
        }
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        match self.read_or_log(key) {
            Some(KvValue::Long(v)) => v,
            _ => default,
        }
    }

    fn commit(&self, batch: WriteBatch) -> bool {
        let started = Instant::now();
        log_op_start!("kv_commit", backend = BACKEND, batch_len = batch.len() as u64);

        match self.try_commit(batch) {
            Ok(()) => {
                log_op_end!("kv_commit", since = started);
                true
            }
            Err(err) => {
                log_op_error!("kv_commit", err, since = started);
                false
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_type() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert!(store.commit(WriteBatch::new().put_string("k", "text")));
        assert!(store.commit(WriteBatch::new().put_i64("k", 7)));

        assert_eq!(store.get_i64("k", 0), 7);
        assert_eq!(store.get_string("k", "default"), "default");
    }

    #[test]
    fn test_empty_batch_commits() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert!(store.commit(WriteBatch::new()));
    }
}

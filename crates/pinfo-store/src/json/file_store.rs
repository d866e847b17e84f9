#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use pinfo_core::kv::{KeyValueStore, KvValue, WriteBatch};
use pinfo_core::{log_op_end, log_op_error, log_op_start};

use super::atomic::atomic_write;
use crate::errors::{io_error, lock_poisoned, serialization_error, Result};

const BACKEND: &str = "json";

type Entries = BTreeMap<String, KvValue>;

/// Settings file holding one flat JSON object
///
/// ```json
/// { "key_dob_millis": 318211200000, "key_email": "test@email.com", "key_name": "Test name" }
/// ```
///
/// Every read goes to disk. A commit reads the current object, merges the
/// batch and replaces the file in one rename of a private temp file. Commits
/// from this handle are serialized; separate handles or processes writing the
/// same file race at rename granularity, so the file always holds the last
/// renamed batch in full.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Use the settings file at `path`; it is created on first commit
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; a missing file is an empty object
    ///
    /// # Errors
    ///
    /// Fails on unreadable files and on content that is not a flat object
    /// of integers and strings.
    pub fn read_entries(&self) -> Result<Entries> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(io_error("read_settings", e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| serialization_error("parse_settings", e))
    }

    fn read_or_log(&self, key: &str) -> Option<KvValue> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::warn!(key = key, error = %e, "settings read failed; using default");
                None
            }
        }
    }

    fn try_commit(&self, batch: WriteBatch) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| lock_poisoned(BACKEND))?;

        let mut entries = self.read_entries()?;
        entries.extend(batch);

        let bytes = serde_json::to_vec_pretty(&entries)
            .map_err(|e| serialization_error("encode_settings", e))?;
        atomic_write(&self.path, &bytes)
    }
}

impl KeyValueStore for JsonFileStore {
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
                log_op_error!("kv_commit", err.with_backend(BACKEND), since = started);
                false
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

//! In-memory key/value backend

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{KeyValueStore, KvValue, WriteBatch};

/// `HashMap` behind a mutex
///
/// Can be switched into a rejecting mode where every commit reports failure
/// and leaves the map untouched, which stands in for a backend that denies
/// writes.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, KvValue>>,
    reject_commits: AtomicBool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose commits always fail
    pub fn rejecting() -> Self {
        let store = Self::new();
        store.set_reject_commits(true);
        store
    }

    pub fn set_reject_commits(&self, reject: bool) {
        self.reject_commits.store(reject, Ordering::SeqCst);
    }

    /// Raw value under `key`, if any
    pub fn get(&self, key: &str) -> Option<KvValue> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(|v| v.as_long()).unwrap_or(default)
    }

    fn commit(&self, batch: WriteBatch) -> bool {
        if self.reject_commits.load(Ordering::SeqCst) {
            tracing::warn!(
                backend = self.backend_name(),
                batch_len = batch.len(),
                "commit rejected"
            );
            return false;
        }

        match self.entries.lock() {
            Ok(mut entries) => {
                entries.extend(batch);
                true
            }
            Err(_) => {
                tracing::error!(backend = self.backend_name(), "store mutex poisoned");
                false
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

//! Flat key/value storage capability
//!
//! Persistence components see storage only through [`KeyValueStore`]:
//! typed reads that fall back to a caller-supplied default, and an atomic
//! batch commit that reports success as a single flag.

pub mod memory;

pub use memory::MemoryKvStore;

use serde::{Deserialize, Serialize};

/// A scalar stored under one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KvValue {
    Long(i64),
    Text(String),
}

impl KvValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            KvValue::Text(s) => Some(s),
            KvValue::Long(_) => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            KvValue::Long(v) => Some(*v),
            KvValue::Text(_) => None,
        }
    }
}

/// Writes applied together by [`KeyValueStore::commit`]
///
/// Later writes to the same key replace earlier ones in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    entries: Vec<(String, KvValue)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a string write
    pub fn put_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.put(key.into(), KvValue::Text(value.into()));
        self
    }

    /// Queue a 64-bit integer write
    pub fn put_i64(mut self, key: impl Into<String>, value: i64) -> Self {
        self.put(key.into(), KvValue::Long(value));
        self
    }

    fn put(&mut self, key: String, value: KvValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> &[(String, KvValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for WriteBatch {
    type Item = (String, KvValue);
    type IntoIter = std::vec::IntoIter<(String, KvValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Injected flat key/value storage
///
/// Reads never fail: a missing key, a value of the other scalar type, or a
/// backend read error all yield `default`. `commit` applies the whole batch
/// or nothing and returns whether it succeeded. Implementations serialize
/// concurrent commits themselves (last writer wins per batch).
pub trait KeyValueStore: Send + Sync {
    /// Read a string, or `default` when absent
    fn get_string(&self, key: &str, default: &str) -> String;

    /// Read a 64-bit integer, or `default` when absent
    fn get_i64(&self, key: &str, default: i64) -> i64;

    /// Atomically apply `batch`; `true` only if every write was committed
    fn commit(&self, batch: WriteBatch) -> bool;

    /// Backend name for logs and error context
    fn backend_name(&self) -> &'static str {
        "unknown"
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_string(&self, key: &str, default: &str) -> String {
        (**self).get_string(key, default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        (**self).get_i64(key, default)
    }

    fn commit(&self, batch: WriteBatch) -> bool {
        (**self).commit(batch)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_string(&self, key: &str, default: &str) -> String {
        (**self).get_string(key, default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        (**self).get_i64(key, default)
    }

    fn commit(&self, batch: WriteBatch) -> bool {
        (**self).commit(batch)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

//! Personal information persistence
//!
//! Maps a [`PersonalInfoRecord`] onto three fixed keys of an injected
//! [`KeyValueStore`]:
//!
//! | Key | Type | Meaning |
//! |---|---|---|
//! | `key_name` | string | profile display name |
//! | `key_dob_millis` | i64 | date of birth, epoch milliseconds |
//! | `key_email` | string | profile email address |

use std::time::Instant;

use chrono::DateTime;

use crate::clock::{Clock, SystemClock};
use crate::errors::PInfoError;
use crate::kv::{KeyValueStore, WriteBatch};
use crate::model::PersonalInfoRecord;
use crate::{log_op_end, log_op_error, log_op_start};

pub const KEY_NAME: &str = "key_name";
pub const KEY_DOB: &str = "key_dob_millis";
pub const KEY_EMAIL: &str = "key_email";

/// Saves and loads one profile record as a unit
///
/// Holds no state besides its collaborators; every call goes to the backing
/// store.
#[derive(Debug)]
pub struct PersonalInfoStore<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> PersonalInfoStore<S> {
    /// Wrap `store`, defaulting the date of birth to wall-clock time
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> PersonalInfoStore<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// The backing store
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Load the saved profile
    ///
    /// Absent keys read as `""` for name and email and as the clock's current
    /// instant for the date of birth. A stored timestamp outside the
    /// representable range is treated as absent.
    pub fn load(&self) -> PersonalInfoRecord {
        let started = Instant::now();
        log_op_start!("load_personal_info", backend = self.store.backend_name());

        let now = self.clock.now();
        let name = self.store.get_string(KEY_NAME, "");
        let dob_millis = self.store.get_i64(KEY_DOB, now.timestamp_millis());
        let date_of_birth = DateTime::from_timestamp_millis(dob_millis).unwrap_or_else(|| {
            tracing::warn!(
                key = KEY_DOB,
                value = dob_millis,
                "stored date of birth out of range; using current time"
            );
            now
        });
        let email = self.store.get_string(KEY_EMAIL, "");

        log_op_end!("load_personal_info", since = started);
        PersonalInfoRecord::new(name, date_of_birth, email)
    }

    /// Persist `record` as one atomic batch
    ///
    /// Returns `true` only if the backend committed all three keys.
    pub fn save(&self, record: &PersonalInfoRecord) -> bool {
        let started = Instant::now();
        let backend = self.store.backend_name();
        log_op_start!("save_personal_info", backend = backend);

        let batch = WriteBatch::new()
            .put_string(KEY_NAME, record.name())
            .put_i64(KEY_DOB, record.date_of_birth_millis())
            .put_string(KEY_EMAIL, record.email());

        let committed = self.store.commit(batch);
        if committed {
            log_op_end!("save_personal_info", since = started);
        } else {
            log_op_error!(
                "save_personal_info",
                PInfoError::SaveFailed {
                    backend: backend.to_string()
                },
                since = started
            );
        }
        committed
    }
}

//! PInfo Core - personal information persistence kernel
//!
//! This crate provides:
//! - `EmailValidator`, a linear-time email syntax check
//! - `PersonalInfoRecord`, the immutable profile record
//! - `KeyValueStore`, the flat storage capability, with an in-memory backend
//! - `PersonalInfoStore`, saving and loading a record with defaults
//! - `ProfileForm`, the populate / revert / submit flow of a profile screen
//! - Structured error and logging facilities shared by the other crates

pub mod clock;
pub mod errors;
pub mod form;
pub mod kv;
pub mod logging_facility;
pub mod model;
pub mod personal_info;
pub mod validation;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ExError, ExErrorKind, PInfoError, Result};
pub use form::{ProfileForm, ProfileInput};
pub use kv::{KeyValueStore, KvValue, MemoryKvStore, WriteBatch};
pub use model::PersonalInfoRecord;
pub use personal_info::{PersonalInfoStore, KEY_DOB, KEY_EMAIL, KEY_NAME};
pub use validation::{EmailRule, EmailValidator};

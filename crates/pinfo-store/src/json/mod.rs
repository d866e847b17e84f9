//! JSON settings file backend
//!
//! Provides:
//! - `JsonFileStore`, a flat JSON object of keys to scalars
//! - Atomic temp-file + rename writes so readers never see a half-written file

mod atomic;
mod file_store;

pub use file_store::JsonFileStore;

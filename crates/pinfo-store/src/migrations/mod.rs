//! Migration framework
//!
//! Provides:
//! - Migration runner with recorded and verified checksums
//! - Idempotent application
//! - Embedded SQL migrations

mod checksums;
mod embedded;
mod runner;

pub use runner::apply_migrations;

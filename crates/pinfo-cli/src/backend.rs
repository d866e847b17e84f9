//! Storage backend selection

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pinfo_core::errors::{ExError, ExErrorKind};
use pinfo_core::KeyValueStore;
use pinfo_store::{JsonFileStore, SqliteKvStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// SQLite database
    Sqlite,
    /// JSON settings file
    Json,
}

impl BackendKind {
    fn default_path(&self) -> PathBuf {
        match self {
            BackendKind::Sqlite => PathBuf::from(".pinfo/profile.db"),
            BackendKind::Json => PathBuf::from(".pinfo/profile.json"),
        }
    }
}

#[derive(Debug, Args)]
pub struct BackendArgs {
    /// Storage backend
    #[arg(long, global = true, value_enum, default_value_t = BackendKind::Sqlite)]
    pub backend: BackendKind,

    /// Path of the database or settings file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

impl BackendArgs {
    pub fn path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| self.backend.default_path())
    }

    /// Open the selected backend, creating its directory if needed
    pub fn open(&self) -> Result<Box<dyn KeyValueStore>, ExError> {
        let path = self.path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExError::new(ExErrorKind::Io)
                    .with_op("create_store_dir")
                    .with_message(format!("{}: {}", parent.display(), e))
            })?;
        }

        Ok(match self.backend {
            BackendKind::Sqlite => Box::new(SqliteKvStore::open(&path)?),
            BackendKind::Json => Box::new(JsonFileStore::new(path)),
        })
    }
}

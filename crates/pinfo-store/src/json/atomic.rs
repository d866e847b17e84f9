//! Atomic write primitives
//!
//! Each write gets its own uniquely named temp file next to the target, so
//! concurrent writers never share scratch space. The target is always either
//! some writer's complete content or the previous file.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically replace `target_path` with `content`
///
/// The temp file is flushed to disk before it is persisted over the target.
/// A temp file that is never persisted is removed when dropped.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = match target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| io_error("create_settings_dir", e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp =
        NamedTempFile::new_in(parent).map_err(|e| io_error("create_settings_temp", e))?;
    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| io_error("write_settings_temp", e))?;

    temp.persist(target_path)
        .map_err(|e| io_error("persist_settings_temp", e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn leftover_files(dir: &Path, keep: &str) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy() != keep)
            .count()
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("profile.json");

        atomic_write(&target, b"{}").unwrap();
        atomic_write(&target, b"{\"key_name\":\"x\"}").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"{\"key_name\":\"x\"}");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested").join("profile.json");

        atomic_write(&target, b"{}").unwrap();

        assert!(target.exists());
    }

    #[test]
    fn test_no_temp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("profile.json");

        atomic_write(&target, b"{}").unwrap();

        assert_eq!(leftover_files(temp_dir.path(), "profile.json"), 0);
    }

    #[test]
    fn test_write_under_a_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        assert!(atomic_write(&blocker.join("profile.json"), b"{}").is_err());
    }

    #[test]
    fn test_concurrent_writers_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let target = Arc::new(temp_dir.path().join("profile.json"));

        let writers: Vec<_> = (0..4u8)
            .map(|w| {
                let target = Arc::clone(&target);
                thread::spawn(move || {
                    (0..50)
                        .map(|_| atomic_write(&target, &[b'0' + w; 64]).is_ok())
                        .all(|ok| ok)
                })
            })
            .collect();

        for writer in writers {
            assert!(writer.join().unwrap());
        }

        let content = fs::read(&*target).unwrap();
        assert_eq!(content.len(), 64);
        assert!(content.iter().all(|b| *b == content[0]));
        assert_eq!(leftover_files(temp_dir.path(), "profile.json"), 0);
    }
}

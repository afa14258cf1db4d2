//! In-memory storage backend
//!
//! Keeps artifacts in a map keyed by normalized path. Writes replace the whole
//! entry under a lock, which gives the same all-or-nothing visibility as the
//! file system backend.

use super::{StorageBackend, StorageError};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory storage backend
#[derive(Debug, Default)]
pub struct MemoryStorageBackend {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(path: &str) -> String {
        path.trim_start_matches('/').to_string()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>, StorageError> {
        self.files
            .lock()
            .map_err(|_| StorageError::IoError("Memory storage lock poisoned".to_string()))
    }
}

impl StorageBackend for MemoryStorageBackend {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.lock()?
            .get(&Self::normalize(path))
            .cloned()
            .ok_or_else(|| StorageError::FileNotFound(path.to_string()))
    }

    fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        self.lock()?
            .insert(Self::normalize(path), content.to_vec());
        Ok(())
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        let dir = Self::normalize(dir);
        let prefix = if dir.is_empty() || dir.ends_with('/') {
            dir
        } else {
            format!("{}/", dir)
        };

        Ok(self
            .lock()?
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.lock()?.contains_key(&Self::normalize(path)))
    }
}

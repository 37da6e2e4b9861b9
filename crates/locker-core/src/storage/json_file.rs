//! JSON-file key-value backend.
//!
//! Stores all keys as one flat JSON object. Every write rewrites the file
//! through a temp file and rename.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::traits::KeyValueStore;
use crate::error::{LockerError, Result};
use crate::fs::write_atomic;

/// Key-value store persisted as a JSON object on disk.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within one process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                LockerError::Storage(format!(
                    "Corrupt session file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(LockerError::Storage(format!(
                "Failed to read session file {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let contents = serde_json::to_vec_pretty(map)?;
        write_atomic(&self.path, &contents).map_err(|e| {
            LockerError::Storage(format!(
                "Failed to write session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.guard();
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.guard();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.guard();
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::Result;

/// Key the event collection blob is stored under.
pub const KEY_EVENTS: &str = "events";

/// Key the tag vocabulary blob is stored under.
pub const KEY_TAGS: &str = "tags";

/// Key the settings blob is stored under.
pub const KEY_SETTINGS: &str = "settings";

/// Key-value persistence backend. Each key holds one JSON blob; there are
/// no partial-key writes, so every store operation is a whole-blob
/// read-modify-write. Concurrent writers race with last-write-wins.
pub trait Storage: Debug {
    /// Reads the blob stored under `key`, `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous blob.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the blob under `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed storage: one `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.lock().expect("storage lock poisoned");
        Ok(data.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.lock().expect("storage lock poisoned");
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut data = self.data.lock().expect("storage lock poisoned");
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("missing").unwrap(), None);

        storage.write("k", "v").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));

        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
        storage.remove("k").unwrap(); // absent key is a no-op
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path().join("data")).unwrap();

        assert_eq!(storage.read(KEY_EVENTS).unwrap(), None);
        storage.write(KEY_EVENTS, "[]").unwrap();
        assert_eq!(storage.read(KEY_EVENTS).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("data/events.json").exists());

        storage.remove(KEY_EVENTS).unwrap();
        assert_eq!(storage.read(KEY_EVENTS).unwrap(), None);
        storage.remove(KEY_EVENTS).unwrap();
    }

    #[test]
    fn test_file_storage_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path().to_path_buf()).unwrap();

        storage.write("k", "first").unwrap();
        storage.write("k", "second").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("second"));
    }
}

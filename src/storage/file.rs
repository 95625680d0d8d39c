//! JSON-file store.
//!
//! The whole store is one JSON object (`{"key": "raw value", ...}`) on disk.
//! Every operation re-reads the file so separate processes sharing a path
//! observe each other's writes. Mutations run under an exclusive `fs2` lock
//! on a sibling `.lock` file and replace the data file atomically.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::{KeyValueStore, StoreError};

type Entries = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// The data file itself is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let lock_path = sibling(&path, "lock");
        Ok(Self { path, lock_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every entry currently on disk, ordered by key.
    pub fn snapshot(&self) -> Result<Entries, StoreError> {
        let lock = self.lock_file()?;
        FileExt::lock_shared(&lock).map_err(|source| StoreError::Lock {
            path: self.lock_path.clone(),
            source,
        })?;
        let entries = self.read_entries();
        let _ = FileExt::unlock(&lock);
        entries
    }

    fn lock_file(&self) -> Result<File, StoreError> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|source| StoreError::Lock {
                path: self.lock_path.clone(),
                source,
            })
    }

    fn read_entries(&self) -> Result<Entries, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| write_err(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        let tmp_path = sibling(&self.path, "tmp");
        let mut tmp = File::create(&tmp_path).map_err(write_err)?;
        tmp.write_all(body.as_bytes()).map_err(write_err)?;
        tmp.sync_all().map_err(write_err)?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(write_err)
    }

    /// Read-modify-write under the exclusive lock.
    fn mutate<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let lock = self.lock_file()?;
        FileExt::lock_exclusive(&lock).map_err(|source| StoreError::Lock {
            path: self.lock_path.clone(),
            source,
        })?;

        let result = self.read_entries().and_then(|mut entries| {
            if f(&mut entries) {
                self.write_entries(&entries)
            } else {
                Ok(())
            }
        });

        let _ = FileExt::unlock(&lock);
        result
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.snapshot()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(key, path = %self.path.display(), "store set");
        self.mutate(|entries| {
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        debug!(key, path = %self.path.display(), "store remove");
        self.mutate(|entries| entries.remove(key).is_some())
    }
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use super::{normalize_key, EntryKind, RemoteEntry, StorageBackend};
use crate::common::errors::{Result, SweepError};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    last_modified: Option<i64>,
}

/// In-memory storage backend. Used by the test suite and by library
/// consumers that want to run detection over an already-materialized
/// set of objects. Keys are sorted, so scan order is deterministic.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    unreadable: RwLock<BTreeSet<String>>,
    offline: RwLock<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object with content and an optional modification time
    pub fn insert(&self, path: &str, bytes: impl Into<Vec<u8>>, last_modified: Option<i64>) {
        self.objects.write().unwrap().insert(
            normalize_key(path),
            StoredObject {
                bytes: bytes.into(),
                last_modified,
            },
        );
    }

    /// Mark an object so that content fetches for it fail
    pub fn poison(&self, path: &str) {
        self.unreadable.write().unwrap().insert(normalize_key(path));
    }

    /// Simulate a backend outage: every call fails with `BackendUnavailable`
    pub fn set_offline(&self, offline: bool) {
        *self.offline.write().unwrap() = offline;
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> Result<()> {
        if *self.offline.read().unwrap() {
            return Err(SweepError::BackendUnavailable {
                resource: "memory".to_string(),
                hint: "backend marked offline".to_string(),
            });
        }
        Ok(())
    }

    fn entry(path: &str, obj: &StoredObject) -> RemoteEntry {
        RemoteEntry {
            path: path.to_string(),
            kind: EntryKind::File,
            size: obj.bytes.len() as u64,
            last_modified: obj.last_modified,
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn list_files(&self, path: &str, recursive: bool) -> Result<Vec<RemoteEntry>> {
        self.check_online()?;
        let key = normalize_key(path);
        let prefix = if key.is_empty() {
            String::new()
        } else {
            format!("{}/", key)
        };

        let objects = self.objects.read().unwrap();
        let mut entries = Vec::new();
        let mut seen_dirs = BTreeSet::new();

        for (name, obj) in objects.iter() {
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            if recursive || !rest.contains('/') {
                entries.push(Self::entry(name, obj));
            } else {
                // Synthesize one directory entry per immediate child prefix
                let dir = rest.split('/').next().unwrap_or(rest);
                if seen_dirs.insert(dir.to_string()) {
                    entries.push(RemoteEntry {
                        path: if prefix.is_empty() {
                            dir.to_string()
                        } else {
                            format!("{}{}", prefix, dir)
                        },
                        kind: EntryKind::Directory,
                        size: 0,
                        last_modified: None,
                    });
                }
            }
        }
        Ok(entries)
    }

    fn get_content(&self, path: &str) -> Result<Vec<u8>> {
        self.check_online()?;
        let key = normalize_key(path);
        if self.unreadable.read().unwrap().contains(&key) {
            return Err(SweepError::ContentUnavailable {
                path: key,
                message: "object marked unreadable".to_string(),
            });
        }
        self.objects
            .read()
            .unwrap()
            .get(&key)
            .map(|o| o.bytes.clone())
            .ok_or(SweepError::NotFound(key))
    }

    fn stat(&self, path: &str) -> Result<RemoteEntry> {
        self.check_online()?;
        let key = normalize_key(path);
        self.objects
            .read()
            .unwrap()
            .get(&key)
            .map(|o| Self::entry(&key, o))
            .ok_or(SweepError::NotFound(key))
    }

    fn put_file(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.check_online()?;
        self.insert(path, bytes.to_vec(), Some(chrono::Utc::now().timestamp_millis()));
        Ok(())
    }

    fn copy_file(&self, from: &str, to: &str) -> Result<()> {
        self.check_online()?;
        let bytes = self.get_content(from)?;
        self.put_file(to, &bytes)
    }

    fn delete_file(&self, path: &str) -> Result<()> {
        self.check_online()?;
        let key = normalize_key(path);
        match self.objects.write().unwrap().remove(&key) {
            Some(_) => Ok(()),
            None => Err(SweepError::NotFound(key)),
        }
    }

    fn exists(&self, path: &str) -> Result<bool> {
        self.check_online()?;
        Ok(self
            .objects
            .read()
            .unwrap()
            .contains_key(&normalize_key(path)))
    }
}

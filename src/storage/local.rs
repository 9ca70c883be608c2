use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use walkdir::WalkDir;

use super::{normalize_key, EntryKind, RemoteEntry, StorageBackend};
use crate::common::errors::{Result, SweepError};

/// Storage backend rooted at a local directory. Keys are '/'-delimited
/// paths relative to the root.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a storage key to an on-disk path. Keys may not escape the root.
    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let key = normalize_key(key);
        if key.split('/').any(|seg| seg == "..") {
            return Err(SweepError::InvalidArgument(format!(
                "path '{}' escapes the storage root",
                key
            )));
        }
        let mut path = self.root.clone();
        for seg in key.split('/').filter(|s| !s.is_empty()) {
            path.push(seg);
        }
        Ok(path)
    }

    /// Turn an on-disk path back into a storage key
    fn key_for(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn entry_for(&self, path: &Path, kind: EntryKind) -> Result<RemoteEntry> {
        let meta = std::fs::metadata(path).map_err(|e| SweepError::Io {
            path: self.key_for(path),
            source: e,
        })?;
        let last_modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64);
        Ok(RemoteEntry {
            path: self.key_for(path),
            kind,
            size: if kind == EntryKind::File { meta.len() } else { 0 },
            last_modified: if kind == EntryKind::File {
                last_modified
            } else {
                None
            },
        })
    }
}

impl StorageBackend for LocalBackend {
    fn list_files(&self, path: &str, recursive: bool) -> Result<Vec<RemoteEntry>> {
        let base = self.resolve(path)?;
        if !base.is_dir() {
            return Err(SweepError::BackendUnavailable {
                resource: normalize_key(path),
                hint: format!("no such directory under root '{}'", self.root.display()),
            });
        }

        let mut entries = Vec::new();
        if recursive {
            for item in WalkDir::new(&base)
                .min_depth(1)
                .follow_links(false)
                .sort_by_file_name()
            {
                let item = item.map_err(|e| SweepError::BackendUnavailable {
                    resource: normalize_key(path),
                    hint: e.to_string(),
                })?;
                if item.file_type().is_file() {
                    entries.push(self.entry_for(item.path(), EntryKind::File)?);
                }
            }
        } else {
            let mut children: Vec<PathBuf> = std::fs::read_dir(&base)
                .map_err(|e| SweepError::Io {
                    path: normalize_key(path),
                    source: e,
                })?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .collect();
            children.sort();

            for child in children {
                if child.is_dir() {
                    entries.push(self.entry_for(&child, EntryKind::Directory)?);
                } else if child.is_file() {
                    entries.push(self.entry_for(&child, EntryKind::File)?);
                }
            }
        }
        Ok(entries)
    }

    fn get_content(&self, path: &str) -> Result<Vec<u8>> {
        let disk = self.resolve(path)?;
        std::fs::read(&disk).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SweepError::NotFound(normalize_key(path)),
            _ => SweepError::ContentUnavailable {
                path: normalize_key(path),
                message: e.to_string(),
            },
        })
    }

    fn stat(&self, path: &str) -> Result<RemoteEntry> {
        let disk = self.resolve(path)?;
        if !disk.is_file() {
            return Err(SweepError::NotFound(normalize_key(path)));
        }
        self.entry_for(&disk, EntryKind::File)
    }

    fn put_file(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let disk = self.resolve(path)?;
        if let Some(dir) = disk.parent() {
            std::fs::create_dir_all(dir).map_err(|e| SweepError::Io {
                path: normalize_key(path),
                source: e,
            })?;
        }
        std::fs::write(&disk, bytes).map_err(|e| SweepError::Io {
            path: normalize_key(path),
            source: e,
        })
    }

    fn copy_file(&self, from: &str, to: &str) -> Result<()> {
        let src = self.resolve(from)?;
        if !src.is_file() {
            return Err(SweepError::NotFound(normalize_key(from)));
        }
        let dst = self.resolve(to)?;
        if let Some(dir) = dst.parent() {
            std::fs::create_dir_all(dir).map_err(|e| SweepError::Io {
                path: normalize_key(to),
                source: e,
            })?;
        }
        std::fs::copy(&src, &dst)
            .map(|_| ())
            .map_err(|e| SweepError::Io {
                path: normalize_key(to),
                source: e,
            })
    }

    fn delete_file(&self, path: &str) -> Result<()> {
        let disk = self.resolve(path)?;
        std::fs::remove_file(&disk).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SweepError::NotFound(normalize_key(path)),
            _ => SweepError::Io {
                path: normalize_key(path),
                source: e,
            },
        })
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.is_file())
    }
}

pub mod local;
pub mod memory;

use crate::common::errors::Result;

pub use local::LocalBackend;
pub use memory::MemoryBackend;

/// Kind of entry returned by a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry in a backend listing. Paths are opaque '/'-delimited keys,
/// unique within a backend, never absolute filesystem paths.
#[derive(Debug, Clone)]
pub struct RemoteEntry {
    pub path: String,
    pub kind: EntryKind,
    pub size: u64,
    /// Epoch milliseconds; None when the backend doesn't report one
    pub last_modified: Option<i64>,
}

/// Capability interface the engine needs from a storage backend.
///
/// Remote adapters (object stores, sync services) live outside this crate;
/// they only need to implement these primitives. Two in-tree backends exist:
/// [`LocalBackend`] over a local directory and [`MemoryBackend`] for tests
/// and embedding.
pub trait StorageBackend: Sync {
    /// List files (and, non-recursively, directories) under `path`.
    /// `recursive = true` performs a full recursive descent.
    fn list_files(&self, path: &str, recursive: bool) -> Result<Vec<RemoteEntry>>;

    /// Fetch the raw byte content of a file
    fn get_content(&self, path: &str) -> Result<Vec<u8>>;

    /// Metadata for a single file
    fn stat(&self, path: &str) -> Result<RemoteEntry>;

    /// Write a file, replacing any existing content
    fn put_file(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Copy a file to a new key
    fn copy_file(&self, from: &str, to: &str) -> Result<()>;

    /// Delete a file. Deleting a missing path reports `NotFound`.
    fn delete_file(&self, path: &str) -> Result<()>;

    /// Whether a file exists
    fn exists(&self, path: &str) -> Result<bool>;
}

/// Normalize a storage key: trim slashes, collapse doubled separators
pub fn normalize_key(path: &str) -> String {
    let mut key = path.trim_matches('/').to_string();
    while key.contains("//") {
        key = key.replace("//", "/");
    }
    key
}

/// The final path segment of a key
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// The parent prefix of a key, or "" for top-level keys
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

use std::collections::BTreeMap;

use tracing::debug;

use super::types::{
    ApiResponse, CopyReceipt, CopyRequest, DeleteOutcome, DeleteReport, DeleteRequest,
    DeleteStatus, ListEntry, ListRequest, UploadReceipt, UploadRequest,
};
use crate::common::errors::{Result, SweepError};
use crate::duplicates::model::FileDescriptor;
use crate::duplicates::resolver;
use crate::storage::{self, EntryKind, StorageBackend};

/// List files and directories under a path
pub fn list_contents(backend: &dyn StorageBackend, req: &ListRequest) -> ApiResponse<Vec<ListEntry>> {
    match backend.list_files(&req.path, req.recursive) {
        Ok(entries) => ApiResponse::ok(
            entries
                .into_iter()
                .map(|e| ListEntry {
                    path: e.path,
                    kind: match e.kind {
                        EntryKind::File => "file".to_string(),
                        EntryKind::Directory => "directory".to_string(),
                    },
                    size: e.size,
                    last_modified: e.last_modified,
                })
                .collect(),
        ),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

/// Copy a file from one key to another
pub fn copy_file(backend: &dyn StorageBackend, req: &CopyRequest) -> ApiResponse<CopyReceipt> {
    match backend.exists(&req.from) {
        Ok(false) => return ApiResponse::err("Source file not found"),
        Err(e) => return ApiResponse::err(e.to_string()),
        Ok(true) => {}
    }
    match backend.copy_file(&req.from, &req.to) {
        Ok(()) => ApiResponse::ok(CopyReceipt {
            from: req.from.clone(),
            to: req.to.clone(),
        }),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

/// Store uploaded bytes under a target key. A target that looks like a
/// directory (trailing '/' or no extension in the final segment) gets the
/// original filename appended.
pub fn upload(backend: &dyn StorageBackend, req: &UploadRequest) -> ApiResponse<UploadReceipt> {
    let target = resolve_upload_target(&req.path, &req.filename);
    match backend.put_file(&target, &req.content) {
        Ok(()) => ApiResponse::ok(UploadReceipt {
            path: target,
            size: req.content.len() as u64,
        }),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

fn resolve_upload_target(path: &str, filename: &str) -> String {
    let treat_as_dir = path.is_empty() || path.ends_with('/') || {
        let last = storage::basename(path.trim_end_matches('/'));
        !last.contains('.')
    };
    let key = storage::normalize_key(path);
    if !treat_as_dir {
        return key;
    }
    if key.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", key, filename)
    }
}

/// Delete a batch of paths, optionally keeping one member per
/// same-basename group under a strategy. Each attempted deletion gets a
/// per-path outcome; the batch never aborts on a missing file.
pub fn delete_batch(backend: &dyn StorageBackend, req: &DeleteRequest) -> ApiResponse<DeleteReport> {
    match run_delete(backend, req) {
        Ok(report) => ApiResponse::ok(report),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

fn run_delete(backend: &dyn StorageBackend, req: &DeleteRequest) -> Result<DeleteReport> {
    let mut results = Vec::new();

    // Group the requested paths by basename; the strategy picks a keeper
    // inside each group of same-named files.
    let mut groups: BTreeMap<String, Vec<FileDescriptor>> = BTreeMap::new();
    for raw in &req.paths {
        let path = storage::normalize_key(raw);
        match backend.stat(&path) {
            Ok(entry) => {
                groups.entry(storage::basename(&path).to_string()).or_default().push(
                    FileDescriptor {
                        path: entry.path,
                        size: entry.size,
                        last_modified: entry.last_modified,
                        is_image: false,
                        dimensions: None,
                    },
                );
            }
            Err(SweepError::NotFound(_)) => {
                results.push(DeleteOutcome {
                    path,
                    status: DeleteStatus::NotFound,
                    message: None,
                });
            }
            Err(e) => return Err(e),
        }
    }

    let mut total_deleted = 0;
    for (basename, files) in &groups {
        let resolution = resolver::resolve(files, req.strategy);
        if let Some(ref keep) = resolution.keep {
            debug!(group = %basename, keep = %keep.path, strategy = %req.strategy, "keeping one member");
        }

        for file in &resolution.delete {
            match backend.delete_file(&file.path) {
                Ok(()) => {
                    total_deleted += 1;
                    results.push(DeleteOutcome {
                        path: file.path.clone(),
                        status: DeleteStatus::Deleted,
                        message: None,
                    });
                }
                Err(SweepError::NotFound(_)) => {
                    // Raced with another caller; idempotent per path
                    results.push(DeleteOutcome {
                        path: file.path.clone(),
                        status: DeleteStatus::NotFound,
                        message: None,
                    });
                }
                Err(e @ SweepError::BackendUnavailable { .. }) => return Err(e),
                Err(e) => {
                    results.push(DeleteOutcome {
                        path: file.path.clone(),
                        status: DeleteStatus::Error,
                        message: Some(e.to_string()),
                    });
                }
            }
        }
    }

    Ok(DeleteReport {
        results,
        total_processed: req.paths.len(),
        total_deleted,
        strategy: req.strategy.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_upload_target() {
        assert_eq!(resolve_upload_target("photos/", "cat.jpg"), "photos/cat.jpg");
        assert_eq!(resolve_upload_target("photos", "cat.jpg"), "photos/cat.jpg");
        assert_eq!(resolve_upload_target("photos/dog.jpg", "cat.jpg"), "photos/dog.jpg");
        assert_eq!(resolve_upload_target("", "cat.jpg"), "cat.jpg");
        assert_eq!(resolve_upload_target("/a//b/", "c.png"), "a/b/c.png");
    }
}

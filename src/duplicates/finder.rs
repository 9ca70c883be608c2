use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::combined;
use super::fingerprint::{content_hash, fingerprint};
use super::grouper;
use super::model::{DetectionMethod, DuplicateCluster, FileDescriptor, GroupKey};
use crate::common::errors::{Result, SweepError};
use crate::imaging::{self, ImageProbe};
use crate::storage::{EntryKind, StorageBackend};

/// Configuration for one detection pass
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Storage prefix to scan
    pub path: String,
    /// Requested detection methods; must be non-empty
    pub methods: Vec<DetectionMethod>,
    /// Percentage tolerance for the size method (0-100)
    pub size_tolerance: f64,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Skip non-image files entirely
    pub image_only: bool,
    /// Show progress bars
    pub show_progress: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            path: String::new(),
            methods: vec![DetectionMethod::Content],
            size_tolerance: 0.0,
            recursive: false,
            image_only: false,
            show_progress: false,
        }
    }
}

/// Per-method grouping of files by key, preserving both first-seen key
/// order and scan order within each group. Deterministic iteration keeps
/// cluster output stable across runs.
#[derive(Debug, Default)]
pub struct GroupTable {
    order: Vec<GroupKey>,
    groups: HashMap<GroupKey, Vec<FileDescriptor>>,
}

impl GroupTable {
    pub fn insert(&mut self, key: GroupKey, file: FileDescriptor) {
        match self.groups.entry(key) {
            std::collections::hash_map::Entry::Occupied(mut e) => e.get_mut().push(file),
            std::collections::hash_map::Entry::Vacant(e) => {
                self.order.push(e.key().clone());
                e.insert(vec![file]);
            }
        }
    }

    /// Groups in first-seen key order
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Vec<FileDescriptor>)> {
        self.order.iter().map(move |k| (k, &self.groups[k]))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// One file after the fetch-and-probe phase
struct ScannedFile {
    file: FileDescriptor,
    /// Content hash key, when the content method was requested and the
    /// bytes could be fetched
    content_key: Option<GroupKey>,
}

/// Scan `opts.path` and report clusters of duplicate files under every
/// requested method.
///
/// The pipeline is request-scoped and pure: enumerate, fetch and
/// fingerprint each file (in parallel — files are independent once
/// enumerated), partition per method, then emit every group with ≥2
/// members as a cluster. A file may appear in clusters under several
/// match types; that is reported, not deduplicated.
///
/// Per-file fetch and decode failures are logged and skipped for the
/// affected criteria only. An unreachable backend or invalid arguments
/// fail the whole request.
pub fn find_duplicates(
    backend: &dyn StorageBackend,
    probe: &dyn ImageProbe,
    opts: &DetectOptions,
) -> Result<Vec<DuplicateCluster>> {
    validate(opts)?;

    let want_content = opts.methods.contains(&DetectionMethod::Content);
    let want_dimensions = opts.methods.contains(&DetectionMethod::Dimensions);
    let want_combined = opts.methods.contains(&DetectionMethod::Combined);

    // ── Step 1: Enumerate files ───────────────────────────────────────────
    let pb = make_spinner(opts.show_progress, "Listing files...");
    let entries = backend.list_files(&opts.path, opts.recursive)?;
    let mut files: Vec<FileDescriptor> = entries
        .into_iter()
        .filter(|e| e.kind == EntryKind::File)
        .map(|e| FileDescriptor {
            is_image: imaging::is_image_name(&e.path),
            path: e.path,
            size: e.size,
            last_modified: e.last_modified,
            dimensions: None,
        })
        .collect();

    if opts.image_only {
        files.retain(|f| f.is_image);
    }
    finish_spinner(pb, &format!("Found {} files", files.len()));
    debug!(count = files.len(), path = %opts.path, "scan enumerated");

    if files.is_empty() {
        return Ok(Vec::new());
    }

    // ── Step 2: Fetch content, probe dimensions, hash ─────────────────────
    // Ordered parallel map: rayon preserves input order when collecting,
    // so scan-order tie-breaking downstream stays deterministic.
    let pb = make_progress(opts.show_progress, files.len() as u64, "Fingerprinting...");
    let scanned: Vec<ScannedFile> = files
        .into_par_iter()
        .map(|file| {
            let res = scan_one(backend, probe, file, want_content, want_dimensions);
            if let Some(ref pb) = pb {
                pb.inc(1);
            }
            res
        })
        .collect::<Result<Vec<_>>>()?;
    finish_progress(pb, &format!("Fingerprinted {} files", scanned.len()));

    // ── Step 3: Partition per method ──────────────────────────────────────
    let mut tables: Vec<(DetectionMethod, GroupTable)> = Vec::new();
    for &method in opts.methods.iter().filter(|m| **m != DetectionMethod::Combined) {
        let mut table = GroupTable::default();
        for item in &scanned {
            let key = match method {
                DetectionMethod::Content => item.content_key.clone(),
                _ => fingerprint(method, &item.file, None, opts.size_tolerance)?,
            };
            if let Some(key) = key {
                table.insert(key, item.file.clone());
            }
        }
        tables.push((method, table));
    }

    // ── Step 4: Emit clusters ─────────────────────────────────────────────
    let mut clusters = Vec::new();
    for (method, table) in &tables {
        for (_key, group) in table.iter() {
            if group.len() < 2 {
                continue;
            }
            if *method == DetectionMethod::Size {
                // The range key groups more loosely than true tolerance;
                // only sub-groups that pass pairwise tolerance survive.
                for members in grouper::group_by_size(group, opts.size_tolerance) {
                    clusters.push(DuplicateCluster {
                        files: members,
                        match_type: DetectionMethod::Size,
                        matched_criteria: None,
                    });
                }
            } else {
                clusters.push(DuplicateCluster {
                    files: group.clone(),
                    match_type: *method,
                    matched_criteria: None,
                });
            }
        }
    }

    // ── Step 5: Combined intersection ─────────────────────────────────────
    if want_combined {
        clusters.extend(combined::intersect(&tables));
    }

    Ok(clusters)
}

fn validate(opts: &DetectOptions) -> Result<()> {
    if opts.methods.is_empty() {
        return Err(SweepError::InvalidArgument(
            "at least one detection method is required".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&opts.size_tolerance) {
        return Err(SweepError::InvalidArgument(format!(
            "size_tolerance must be between 0 and 100, got {}",
            opts.size_tolerance
        )));
    }
    if opts.methods == [DetectionMethod::Combined] {
        return Err(SweepError::InvalidArgument(
            "combined requires at least one other detection method".to_string(),
        ));
    }
    Ok(())
}

/// Fetch and probe a single file. Only a dead backend is fatal here;
/// anything local to the file downgrades to a skip for that criterion.
fn scan_one(
    backend: &dyn StorageBackend,
    probe: &dyn ImageProbe,
    mut file: FileDescriptor,
    want_content: bool,
    want_dimensions: bool,
) -> Result<ScannedFile> {
    let needs_fetch = want_content || (want_dimensions && file.is_image);
    let content = if needs_fetch {
        match backend.get_content(&file.path) {
            Ok(bytes) => Some(bytes),
            Err(e @ SweepError::BackendUnavailable { .. }) => return Err(e),
            Err(e) => {
                warn!(path = %file.path, error = %e, "content fetch failed; skipping content-derived criteria");
                None
            }
        }
    } else {
        None
    };

    if want_dimensions && file.is_image {
        if let Some(ref bytes) = content {
            match probe.decode_dimensions(&file.path, bytes) {
                Ok(dims) => file.dimensions = Some(dims),
                Err(e) => {
                    warn!(path = %file.path, error = %e, "image decode failed; skipping dimension criterion");
                }
            }
        }
    }

    let content_key = if want_content {
        content
            .as_deref()
            .map(|bytes| GroupKey::Text(content_hash(bytes)))
    } else {
        None
    };

    Ok(ScannedFile { file, content_key })
}

// ── Progress helpers ──────────────────────────────────────────────────────────

fn make_spinner(show: bool, msg: &str) -> Option<ProgressBar> {
    if show {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        Some(pb)
    } else {
        None
    }
}

fn finish_spinner(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}

fn make_progress(show: bool, total: u64, msg: &str) -> Option<ProgressBar> {
    if show {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("━━░"),
        );
        pb.set_message(msg.to_string());
        Some(pb)
    } else {
        None
    }
}

fn finish_progress(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}

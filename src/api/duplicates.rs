use super::types::{ApiResponse, ClusterPayload, DetectReport, DetectRequest};
use crate::common::errors::{Result, SweepError};
use crate::duplicates::finder::{self, DetectOptions};
use crate::duplicates::model::{DetectionMethod, DuplicateCluster};
use crate::imaging::ImageProbe;
use crate::storage::StorageBackend;

/// Run duplicate detection for a request and shape the result into the
/// wire contract. Bad method names and out-of-range tolerances are
/// rejected before any backend I/O happens.
pub fn detect(
    backend: &dyn StorageBackend,
    probe: &dyn ImageProbe,
    req: &DetectRequest,
    show_progress: bool,
) -> ApiResponse<DetectReport> {
    match run(backend, probe, req, show_progress) {
        Ok(report) => ApiResponse::ok(report),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

fn run(
    backend: &dyn StorageBackend,
    probe: &dyn ImageProbe,
    req: &DetectRequest,
    show_progress: bool,
) -> Result<DetectReport> {
    let methods = parse_methods(&req.methods)?;
    let opts = DetectOptions {
        path: req.path.clone(),
        methods,
        size_tolerance: req.size_tolerance.unwrap_or(0.0),
        recursive: req.recursive,
        image_only: req.image_only,
        show_progress,
    };

    let clusters = finder::find_duplicates(backend, probe, &opts)?;
    let total_duplicate_files = clusters.iter().map(|c| c.files.len()).sum();

    Ok(DetectReport {
        total_groups: clusters.len(),
        total_duplicate_files,
        duplicates: clusters.into_iter().map(payload).collect(),
        methods: req.methods.clone(),
        size_tolerance: req.size_tolerance,
        image_only: req.image_only,
    })
}

fn parse_methods(raw: &[String]) -> Result<Vec<DetectionMethod>> {
    if raw.is_empty() {
        return Err(SweepError::InvalidArgument(
            "at least one detection method is required".to_string(),
        ));
    }
    let mut methods = Vec::new();
    for name in raw {
        let method: DetectionMethod = name.parse()?;
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    Ok(methods)
}

fn payload(cluster: DuplicateCluster) -> ClusterPayload {
    let dimensions = (cluster.match_type == DetectionMethod::Dimensions)
        .then(|| cluster.files.first().and_then(|f| f.dimensions))
        .flatten();
    let size = (cluster.match_type == DetectionMethod::Size)
        .then(|| cluster.files.first().map(|f| f.size))
        .flatten();

    ClusterPayload {
        match_type: cluster.match_type.to_string(),
        matched_criteria: cluster
            .matched_criteria
            .map(|ms| ms.iter().map(|m| m.to_string()).collect()),
        dimensions,
        size,
        files: cluster.files,
    }
}

use serde::{Deserialize, Serialize};

use crate::duplicates::model::{Dimensions, FileDescriptor};
use crate::duplicates::resolver::DeleteStrategy;

/// Response envelope shared by every operation: exactly one of `data`
/// and `error` is populated.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ── Listing ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u64,
    pub last_modified: Option<i64>,
}

// ── Copy / upload ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyReceipt {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Target key; a trailing '/' or extension-less final segment is
    /// treated as a directory and gets `filename` appended
    pub path: String,
    /// Original name of the uploaded file
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    pub path: String,
    pub size: u64,
}

// ── Duplicate detection ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    pub path: String,
    pub methods: Vec<String>,
    #[serde(default)]
    pub size_tolerance: Option<f64>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub image_only: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterPayload {
    pub files: Vec<FileDescriptor>,
    pub match_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_criteria: Option<Vec<String>>,
    /// Shared pixel dimensions, for dimension clusters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Representative byte size, for size clusters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectReport {
    pub duplicates: Vec<ClusterPayload>,
    pub total_groups: usize,
    pub total_duplicate_files: usize,
    pub methods: Vec<String>,
    pub size_tolerance: Option<f64>,
    pub image_only: bool,
}

// ── Deletion ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub paths: Vec<String>,
    #[serde(default)]
    pub strategy: DeleteStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    Deleted,
    NotFound,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    pub path: String,
    pub status: DeleteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteReport {
    /// One entry per attempted deletion; kept files do not appear
    pub results: Vec<DeleteOutcome>,
    pub total_processed: usize,
    pub total_deleted: usize,
    pub strategy: String,
}

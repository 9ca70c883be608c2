use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::errors::SweepError;
use crate::storage;

/// Pixel dimensions of an image file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One file observed during a scan. Immutable for the duration of a
/// detection pass; never persisted.
///
/// Invariant: `dimensions` is only ever populated when `is_image` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Opaque '/'-delimited storage key, unique within the backend
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Epoch milliseconds, when the backend reports one
    pub last_modified: Option<i64>,
    pub is_image: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dimensions: Option<Dimensions>,
}

impl FileDescriptor {
    /// The final path segment, independent of directory
    pub fn basename(&self) -> &str {
        storage::basename(&self.path)
    }
}

/// How two files are tested for equivalence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Identical byte content (collision-resistant hash)
    Content,
    /// Identical basename, case-sensitive
    Filename,
    /// Byte size within a percentage tolerance
    Size,
    /// Identical image pixel dimensions
    Dimensions,
    /// Simultaneous agreement across all other requested methods
    Combined,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::Content => "content",
            DetectionMethod::Filename => "filename",
            DetectionMethod::Size => "size",
            DetectionMethod::Dimensions => "dimensions",
            DetectionMethod::Combined => "combined",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMethod {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(DetectionMethod::Content),
            "filename" => Ok(DetectionMethod::Filename),
            "size" => Ok(DetectionMethod::Size),
            "dimensions" => Ok(DetectionMethod::Dimensions),
            "combined" => Ok(DetectionMethod::Combined),
            other => Err(SweepError::InvalidArgument(format!(
                "unknown detection method '{}'",
                other
            ))),
        }
    }
}

/// Derived value that tests file equivalence under one method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Content hash, basename, or "WxH" dimension string
    Text(String),
    /// Quantized size-range identifier
    Range(u64),
}

/// A set of ≥2 files considered duplicates under one match type
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateCluster {
    pub files: Vec<FileDescriptor>,
    pub match_type: DetectionMethod,
    /// Populated only for combined clusters: the methods that all agreed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_criteria: Option<Vec<DetectionMethod>>,
}

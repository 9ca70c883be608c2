use sha2::{Digest, Sha256};

use super::grouper;
use super::model::{DetectionMethod, FileDescriptor, GroupKey};
use crate::common::errors::{Result, SweepError};

/// Compute SHA-256 of raw content as a lowercase hex string
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Compute the grouping key for one file under one method.
///
/// Returns `Ok(None)` when the file simply has no key under the method —
/// an image of unknown dimensions, or a non-image asked for dimensions.
/// Keyless files join no group, so they can never spuriously match each
/// other through a shared placeholder.
///
/// Fails with `ContentUnavailable` when the content method is asked to
/// fingerprint a file whose bytes could not be fetched: grouping unrelated
/// files under a null hash is worse than skipping them loudly.
///
/// `combined` has no direct fingerprint (it is an intersection over the
/// other methods' groups) and fails with `UnsupportedMethod`.
pub fn fingerprint(
    method: DetectionMethod,
    file: &FileDescriptor,
    content: Option<&[u8]>,
    size_tolerance: f64,
) -> Result<Option<GroupKey>> {
    match method {
        DetectionMethod::Content => {
            let bytes = content.ok_or_else(|| SweepError::ContentUnavailable {
                path: file.path.clone(),
                message: "content was not fetched".to_string(),
            })?;
            Ok(Some(GroupKey::Text(content_hash(bytes))))
        }
        DetectionMethod::Filename => Ok(Some(GroupKey::Text(file.basename().to_string()))),
        DetectionMethod::Size => Ok(Some(GroupKey::Range(grouper::size_range_key(
            file.size,
            size_tolerance,
        )))),
        DetectionMethod::Dimensions => Ok(file
            .dimensions
            .map(|d| GroupKey::Text(d.to_string()))),
        DetectionMethod::Combined => {
            Err(SweepError::UnsupportedMethod("combined".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::model::Dimensions;

    fn file(path: &str, size: u64) -> FileDescriptor {
        FileDescriptor {
            path: path.to_string(),
            size,
            last_modified: None,
            is_image: false,
            dimensions: None,
        }
    }

    #[test]
    fn test_content_hash_is_sha256_hex() {
        let key = content_hash(b"");
        assert_eq!(
            key,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_filename_key_ignores_directory() {
        let a = fingerprint(DetectionMethod::Filename, &file("x/cat.jpg", 1), None, 0.0).unwrap();
        let b = fingerprint(DetectionMethod::Filename, &file("y/z/cat.jpg", 9), None, 0.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Some(GroupKey::Text("cat.jpg".to_string())));
    }

    #[test]
    fn test_filename_key_is_case_sensitive() {
        let a = fingerprint(DetectionMethod::Filename, &file("Cat.jpg", 1), None, 0.0).unwrap();
        let b = fingerprint(DetectionMethod::Filename, &file("cat.jpg", 1), None, 0.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_content_without_bytes_fails_loudly() {
        let err = fingerprint(DetectionMethod::Content, &file("a.bin", 1), None, 0.0).unwrap_err();
        assert!(matches!(err, SweepError::ContentUnavailable { .. }));
    }

    #[test]
    fn test_dimensions_key() {
        let mut img = file("p.png", 10);
        img.is_image = true;
        img.dimensions = Some(Dimensions {
            width: 500,
            height: 300,
        });
        let key = fingerprint(DetectionMethod::Dimensions, &img, None, 0.0).unwrap();
        assert_eq!(key, Some(GroupKey::Text("500x300".to_string())));
    }

    #[test]
    fn test_missing_dimensions_yield_no_key() {
        let key = fingerprint(DetectionMethod::Dimensions, &file("doc.txt", 10), None, 0.0).unwrap();
        assert_eq!(key, None);
    }

    #[test]
    fn test_combined_has_no_direct_fingerprint() {
        let err = fingerprint(DetectionMethod::Combined, &file("a", 1), None, 0.0).unwrap_err();
        assert!(matches!(err, SweepError::UnsupportedMethod(_)));
    }
}

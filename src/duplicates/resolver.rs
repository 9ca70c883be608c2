use std::cmp::Reverse;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::FileDescriptor;
use crate::common::errors::SweepError;

/// Policy selecting which member of a duplicate group to retain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStrategy {
    /// Every listed file is a deletion candidate
    #[default]
    All,
    /// Keep the most recently modified file
    Newest,
    /// Keep the oldest file (likely the original)
    Oldest,
    /// Keep the largest file (best quality for images)
    Largest,
    /// Keep the smallest file
    Smallest,
}

impl DeleteStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteStrategy::All => "all",
            DeleteStrategy::Newest => "newest",
            DeleteStrategy::Oldest => "oldest",
            DeleteStrategy::Largest => "largest",
            DeleteStrategy::Smallest => "smallest",
        }
    }
}

impl std::fmt::Display for DeleteStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeleteStrategy {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DeleteStrategy::All),
            "newest" => Ok(DeleteStrategy::Newest),
            "oldest" => Ok(DeleteStrategy::Oldest),
            "largest" => Ok(DeleteStrategy::Largest),
            "smallest" => Ok(DeleteStrategy::Smallest),
            other => Err(SweepError::InvalidArgument(format!(
                "unknown deletion strategy '{}'",
                other
            ))),
        }
    }
}

/// Result of resolving a duplicate group
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The file to keep; None under the `all` strategy
    pub keep: Option<FileDescriptor>,
    /// Deletion candidates, in the sorted order the strategy produced
    pub delete: Vec<FileDescriptor>,
}

/// Pick a "keep" member under the strategy and return the rest as
/// deletion candidates.
///
/// Sorts are stable: ties keep the original scan order, so repeated runs
/// over unchanged backend state select the same keeper. Files with no
/// modification time sort as epoch 0, the oldest possible value — `newest`
/// never keeps an unknown-age file over a dated one, `oldest` prefers it.
pub fn resolve(files: &[FileDescriptor], strategy: DeleteStrategy) -> Resolution {
    if strategy == DeleteStrategy::All {
        return Resolution {
            keep: None,
            delete: files.to_vec(),
        };
    }

    let mut sorted: Vec<&FileDescriptor> = files.iter().collect();
    match strategy {
        DeleteStrategy::Newest => sorted.sort_by_key(|f| Reverse(f.last_modified.unwrap_or(0))),
        DeleteStrategy::Oldest => sorted.sort_by_key(|f| f.last_modified.unwrap_or(0)),
        DeleteStrategy::Largest => sorted.sort_by_key(|f| Reverse(f.size)),
        DeleteStrategy::Smallest => sorted.sort_by_key(|f| f.size),
        DeleteStrategy::All => unreachable!(),
    }

    let mut iter = sorted.into_iter();
    Resolution {
        keep: iter.next().cloned(),
        delete: iter.cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, size: u64, modified: Option<i64>) -> FileDescriptor {
        FileDescriptor {
            path: path.to_string(),
            size,
            last_modified: modified,
            is_image: false,
            dimensions: None,
        }
    }

    #[test]
    fn test_all_keeps_nothing() {
        let files = vec![file("a", 1, None), file("b", 2, None)];
        let res = resolve(&files, DeleteStrategy::All);
        assert!(res.keep.is_none());
        assert_eq!(res.delete.len(), 2);
    }

    #[test]
    fn test_largest_ties_break_by_scan_order() {
        let files = vec![file("a", 10, Some(1)), file("b", 10, Some(2))];
        let res = resolve(&files, DeleteStrategy::Largest);
        assert_eq!(res.keep.unwrap().path, "a");
        assert_eq!(res.delete[0].path, "b");
    }
}

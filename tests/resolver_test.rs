use cloudsweep::duplicates::model::FileDescriptor;
use cloudsweep::duplicates::resolver::{resolve, DeleteStrategy};

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
fn test_all_strategy_deletes_everything() {
    let files = vec![file("a", 1, Some(10)), file("b", 2, Some(20))];
    let res = resolve(&files, DeleteStrategy::All);

    assert!(res.keep.is_none());
    let paths: Vec<&str> = res.delete.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["a", "b"]);
}

#[test]
fn test_newest_keeps_latest_modification() {
    let files = vec![
        file("old", 1, Some(100)),
        file("new", 1, Some(300)),
        file("mid", 1, Some(200)),
    ];
    let res = resolve(&files, DeleteStrategy::Newest);

    assert_eq!(res.keep.unwrap().path, "new");
    let paths: Vec<&str> = res.delete.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["mid", "old"]);
}

#[test]
fn test_oldest_keeps_earliest_modification() {
    let files = vec![file("a", 1, Some(300)), file("b", 1, Some(100))];
    let res = resolve(&files, DeleteStrategy::Oldest);
    assert_eq!(res.keep.unwrap().path, "b");
}

#[test]
fn test_largest_and_smallest() {
    let files = vec![file("s", 10, None), file("l", 99, None), file("m", 50, None)];

    assert_eq!(resolve(&files, DeleteStrategy::Largest).keep.unwrap().path, "l");
    assert_eq!(resolve(&files, DeleteStrategy::Smallest).keep.unwrap().path, "s");
}

#[test]
fn test_size_ties_break_by_scan_order() {
    let files = vec![
        file("a", 10, Some(1)),
        file("b", 10, Some(2)),
    ];
    let res = resolve(&files, DeleteStrategy::Largest);
    assert_eq!(res.keep.unwrap().path, "a", "First in scan order wins a size tie");
    assert_eq!(res.delete[0].path, "b");
}

#[test]
fn test_missing_timestamps_sort_as_oldest() {
    let files = vec![file("unknown", 1, None), file("dated", 1, Some(50))];

    // newest never keeps an unknown-age file over a dated one
    assert_eq!(resolve(&files, DeleteStrategy::Newest).keep.unwrap().path, "dated");
    // oldest prefers the unknown-age file
    assert_eq!(resolve(&files, DeleteStrategy::Oldest).keep.unwrap().path, "unknown");
}

#[test]
fn test_resolve_is_idempotent() {
    let files = vec![
        file("a", 10, Some(5)),
        file("b", 10, Some(5)),
        file("c", 20, None),
    ];
    for strategy in [
        DeleteStrategy::Newest,
        DeleteStrategy::Oldest,
        DeleteStrategy::Largest,
        DeleteStrategy::Smallest,
    ] {
        let first = resolve(&files, strategy);
        let second = resolve(&files, strategy);
        assert_eq!(
            first.keep.as_ref().map(|f| &f.path),
            second.keep.as_ref().map(|f| &f.path),
            "resolve must pick the same keeper on every run ({strategy})"
        );
    }
}

#[test]
fn test_single_file_is_kept_not_deleted() {
    let files = vec![file("only", 10, Some(1))];
    let res = resolve(&files, DeleteStrategy::Newest);
    assert_eq!(res.keep.unwrap().path, "only");
    assert!(res.delete.is_empty());
}

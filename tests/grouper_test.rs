use cloudsweep::duplicates::grouper::{group_by_size, size_range_key, within_tolerance};
use cloudsweep::duplicates::model::FileDescriptor;

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
fn test_zero_tolerance_partitions_by_exact_size() {
    let files = vec![
        file("a", 1000),
        file("b", 1000),
        file("c", 1001),
        file("d", 1001),
        file("e", 999),
    ];

    let groups = group_by_size(&files, 0.0);
    assert_eq!(groups.len(), 2);
    for group in &groups {
        let first = group[0].size;
        assert!(
            group.iter().all(|f| f.size == first),
            "No two different sizes may co-group at tolerance 0"
        );
    }
}

#[test]
fn test_boundary_grouping_at_two_and_three_percent() {
    // 1000 vs 1025: allowance is 20 bytes at 2% (no match) and 30 at 3% (match)
    let files = vec![file("a", 1000), file("b", 1025)];

    assert!(group_by_size(&files, 2.0).is_empty());

    let groups = group_by_size(&files, 3.0);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_within_tolerance_is_inclusive() {
    // delta exactly equal to the allowance still matches
    assert!(within_tolerance(1000, 1020, 2.0));
    assert!(!within_tolerance(1000, 1021, 2.0));
}

#[test]
fn test_chain_of_near_sizes_does_not_merge_outliers() {
    // 100..108 step 4 at 4% tolerance: the seed reaches 104 but not 108
    let files = vec![file("a", 100), file("b", 104), file("c", 108)];
    let groups = group_by_size(&files, 4.0);

    assert_eq!(groups.len(), 1);
    let paths: Vec<&str> = groups[0].iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["a", "b"]);
}

#[test]
fn test_group_preserves_input_order() {
    let files = vec![file("z", 500), file("m", 500), file("a", 500)];
    let groups = group_by_size(&files, 0.0);
    let paths: Vec<&str> = groups[0].iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["z", "m", "a"]);
}

#[test]
fn test_range_key_adjacent_sizes_can_straddle_buckets() {
    // At 3% the bucket width for ~1000 bytes is 30: 1000 lands in the 990
    // bucket, 1020 in the 1020 bucket, even though they pass pairwise
    // tolerance. The quantized key deliberately trades this split for O(1)
    // lookup; the pairwise refinement never sees the pair.
    assert!(within_tolerance(1000, 1020, 3.0));
    assert_ne!(size_range_key(1000, 3.0), size_range_key(1020, 3.0));
}

#[test]
fn test_range_key_same_bucket_sizes_share_key() {
    assert_eq!(size_range_key(1000, 3.0), size_range_key(1018, 3.0));
}

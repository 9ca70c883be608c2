use cloudsweep::api;
use cloudsweep::api::types::DeleteStatus;
use cloudsweep::duplicates::resolver::DeleteStrategy;
use cloudsweep::storage::{MemoryBackend, StorageBackend};

// ─── Listing ─────────────────────────────────────────────────────────────────

#[test]
fn test_list_contents_reports_files_and_directories() {
    let backend = MemoryBackend::new();
    backend.insert("readme.txt", b"hello".to_vec(), Some(1_000));
    backend.insert("photos/a.jpg", b"xx".to_vec(), None);

    let response = api::list_contents(
        &backend,
        &api::ListRequest {
            path: String::new(),
            recursive: false,
        },
    );

    assert!(response.success);
    let entries = response.data.unwrap();
    let dirs: Vec<&str> = entries
        .iter()
        .filter(|e| e.kind == "directory")
        .map(|e| e.path.as_str())
        .collect();
    let files: Vec<&str> = entries
        .iter()
        .filter(|e| e.kind == "file")
        .map(|e| e.path.as_str())
        .collect();

    assert_eq!(dirs, vec!["photos"]);
    assert_eq!(files, vec!["readme.txt"]);
    let readme = entries.iter().find(|e| e.path == "readme.txt").unwrap();
    assert_eq!(readme.size, 5);
    assert_eq!(readme.last_modified, Some(1_000));
}

#[test]
fn test_list_contents_offline_backend_errors() {
    let backend = MemoryBackend::new();
    backend.set_offline(true);

    let response = api::list_contents(
        &backend,
        &api::ListRequest {
            path: String::new(),
            recursive: false,
        },
    );
    assert!(!response.success);
    assert!(response.error.unwrap().contains("backend unavailable"));
}

// ─── Copy / upload ───────────────────────────────────────────────────────────

#[test]
fn test_copy_missing_source_reports_not_found() {
    let backend = MemoryBackend::new();
    let response = api::copy_file(
        &backend,
        &api::CopyRequest {
            from: "ghost.txt".to_string(),
            to: "copy.txt".to_string(),
        },
    );
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Source file not found"));
}

#[test]
fn test_copy_duplicates_content_under_new_key() {
    let backend = MemoryBackend::new();
    backend.insert("orig.bin", b"payload".to_vec(), None);

    let response = api::copy_file(
        &backend,
        &api::CopyRequest {
            from: "orig.bin".to_string(),
            to: "backup/orig.bin".to_string(),
        },
    );
    assert!(response.success);
    assert_eq!(backend.get_content("backup/orig.bin").unwrap(), b"payload");
    assert_eq!(backend.get_content("orig.bin").unwrap(), b"payload");
}

#[test]
fn test_upload_appends_filename_to_directory_target() {
    let backend = MemoryBackend::new();

    let response = api::upload(
        &backend,
        &api::UploadRequest {
            path: "incoming/".to_string(),
            filename: "cat.jpg".to_string(),
            content: vec![1, 2, 3],
        },
    );

    assert!(response.success);
    let receipt = response.data.unwrap();
    assert_eq!(receipt.path, "incoming/cat.jpg");
    assert_eq!(receipt.size, 3);
    assert_eq!(backend.get_content("incoming/cat.jpg").unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_upload_honors_explicit_file_target() {
    let backend = MemoryBackend::new();

    let response = api::upload(
        &backend,
        &api::UploadRequest {
            path: "renamed.png".to_string(),
            filename: "cat.jpg".to_string(),
            content: vec![9],
        },
    );

    assert!(response.success);
    assert_eq!(response.data.unwrap().path, "renamed.png");
    assert!(backend.exists("renamed.png").unwrap());
    assert!(!backend.exists("cat.jpg").unwrap());
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[test]
fn test_delete_newest_keeps_most_recent_of_same_name() {
    let backend = MemoryBackend::new();
    backend.insert("a/x.jpg", b"old".to_vec(), Some(1_000));
    backend.insert("b/x.jpg", b"new".to_vec(), Some(9_000));

    let response = api::delete_batch(
        &backend,
        &api::DeleteRequest {
            paths: vec!["a/x.jpg".to_string(), "b/x.jpg".to_string()],
            strategy: DeleteStrategy::Newest,
        },
    );

    assert!(response.success);
    let report = response.data.unwrap();
    assert_eq!(report.total_processed, 2);
    assert_eq!(report.total_deleted, 1);
    assert_eq!(report.strategy, "newest");
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].path, "a/x.jpg");
    assert_eq!(report.results[0].status, DeleteStatus::Deleted);

    assert!(backend.exists("b/x.jpg").unwrap());
    assert!(!backend.exists("a/x.jpg").unwrap());
}

#[test]
fn test_delete_all_removes_every_path() {
    let backend = MemoryBackend::new();
    backend.insert("a/x.jpg", b"1".to_vec(), None);
    backend.insert("b/x.jpg", b"2".to_vec(), None);
    backend.insert("c/y.jpg", b"3".to_vec(), None);

    let response = api::delete_batch(
        &backend,
        &api::DeleteRequest {
            paths: vec![
                "a/x.jpg".to_string(),
                "b/x.jpg".to_string(),
                "c/y.jpg".to_string(),
            ],
            strategy: DeleteStrategy::All,
        },
    );

    let report = response.data.unwrap();
    assert_eq!(report.total_deleted, 3);
    assert!(backend.is_empty());
}

#[test]
fn test_delete_groups_by_basename_not_by_request_order() {
    // Two distinct basenames: the strategy keeps one member of EACH group
    let backend = MemoryBackend::new();
    backend.insert("a/x.jpg", b"aa".to_vec(), Some(100));
    backend.insert("b/x.jpg", b"bb".to_vec(), Some(200));
    backend.insert("a/y.jpg", b"cc".to_vec(), Some(100));
    backend.insert("b/y.jpg", b"dd".to_vec(), Some(200));

    let response = api::delete_batch(
        &backend,
        &api::DeleteRequest {
            paths: vec![
                "a/x.jpg".to_string(),
                "a/y.jpg".to_string(),
                "b/x.jpg".to_string(),
                "b/y.jpg".to_string(),
            ],
            strategy: DeleteStrategy::Oldest,
        },
    );

    let report = response.data.unwrap();
    assert_eq!(report.total_deleted, 2);
    assert!(backend.exists("a/x.jpg").unwrap());
    assert!(backend.exists("a/y.jpg").unwrap());
    assert!(!backend.exists("b/x.jpg").unwrap());
    assert!(!backend.exists("b/y.jpg").unwrap());
}

#[test]
fn test_delete_missing_path_gets_not_found_outcome() {
    let backend = MemoryBackend::new();
    backend.insert("real.txt", b"x".to_vec(), None);

    let response = api::delete_batch(
        &backend,
        &api::DeleteRequest {
            paths: vec!["ghost.txt".to_string(), "real.txt".to_string()],
            strategy: DeleteStrategy::All,
        },
    );

    let report = response.data.unwrap();
    assert_eq!(report.total_processed, 2);
    assert_eq!(report.total_deleted, 1);

    let ghost = report.results.iter().find(|o| o.path == "ghost.txt").unwrap();
    assert_eq!(ghost.status, DeleteStatus::NotFound);
    let real = report.results.iter().find(|o| o.path == "real.txt").unwrap();
    assert_eq!(real.status, DeleteStatus::Deleted);
}

#[test]
fn test_delete_single_path_with_keep_strategy_is_a_noop() {
    // A lone file is its own group; every keep-one strategy keeps it
    let backend = MemoryBackend::new();
    backend.insert("only.txt", b"x".to_vec(), None);

    let response = api::delete_batch(
        &backend,
        &api::DeleteRequest {
            paths: vec!["only.txt".to_string()],
            strategy: DeleteStrategy::Newest,
        },
    );

    let report = response.data.unwrap();
    assert_eq!(report.total_deleted, 0);
    assert!(report.results.is_empty());
    assert!(backend.exists("only.txt").unwrap());
}

#[test]
fn test_delete_offline_backend_fails_request() {
    let backend = MemoryBackend::new();
    backend.set_offline(true);

    let response = api::delete_batch(
        &backend,
        &api::DeleteRequest {
            paths: vec!["a.txt".to_string()],
            strategy: DeleteStrategy::All,
        },
    );
    assert!(!response.success);
    assert!(response.error.unwrap().contains("backend unavailable"));
}

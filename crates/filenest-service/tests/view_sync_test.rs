//! Integration tests for the resync-on-mutation policy.

mod helpers;

use filenest_core::error::ErrorKind;
use filenest_core::events::FileEvent;
use filenest_core::types::{FileId, FileUpdate};

#[tokio::test]
async fn test_refresh_builds_tree_from_snapshot() {
    let env = helpers::TestEnv::new();
    env.seed("a/b", "x");
    env.seed("a/b", "x");
    env.seed("", "readme.md");

    let mut view = env.view();
    view.refresh().await.unwrap();

    assert_eq!(view.snapshot().len(), 3);
    assert_eq!(view.tree().file_count(), 3);
    let b = view.tree().find_folder("a/b").unwrap();
    assert_eq!(view.tree().files_in(b).len(), 2);
    assert_eq!(view.generation(), 1);
}

#[tokio::test]
async fn test_filter_goes_to_server() {
    let env = helpers::TestEnv::new();
    env.seed("docs", "a.txt");
    env.seed("music", "b.mp3");

    let mut view = env.view();
    view.set_filter("  docs ").await.unwrap();
    assert_eq!(view.filter(), Some("docs"));
    assert_eq!(
        env.listing.last_query().and_then(|q| q.path).as_deref(),
        Some("docs")
    );
    assert_eq!(view.tree().file_count(), 1);

    view.set_filter("   ").await.unwrap();
    assert_eq!(view.filter(), None);
    assert_eq!(env.listing.last_query().and_then(|q| q.path), None);
    assert_eq!(view.tree().file_count(), 2);
}

#[tokio::test]
async fn test_tree_changes_only_after_resync() {
    let env = helpers::TestEnv::new();
    let mut view = env.view();
    view.refresh().await.unwrap();

    let added = env.seed("docs", "late.txt");
    assert!(view.tree().is_empty());
    assert!(view.find(added.id).is_none());

    view.handle(&FileEvent::Uploaded { record: added.clone() })
        .await
        .unwrap();
    assert!(view.find(added.id).is_some());
    assert_eq!(env.listing.calls(), 2);
}

#[tokio::test]
async fn test_delete_resyncs_after_success() {
    let env = helpers::TestEnv::new();
    let keep = env.seed("docs", "keep.txt");
    let gone = env.seed("docs", "gone.txt");

    let mut view = env.view();
    view.refresh().await.unwrap();
    let outcome = view.delete(gone.id).await.unwrap();

    assert!(outcome.is_current());
    assert!(view.find(gone.id).is_none());
    assert!(view.find(keep.id).is_some());
    assert_eq!(env.listing.calls(), 2);
}

#[tokio::test]
async fn test_failed_delete_leaves_tree_untouched() {
    let env = helpers::TestEnv::new();
    env.seed("docs", "keep.txt");

    let mut view = env.view();
    view.refresh().await.unwrap();
    let err = view.delete(FileId(999)).await.unwrap_err();

    assert_eq!(err.status, Some(404));
    assert_eq!(view.tree().file_count(), 1);
    assert_eq!(env.listing.calls(), 1);
    assert_eq!(view.generation(), 1);
}

#[tokio::test]
async fn test_delete_succeeds_when_resync_fails() {
    let env = helpers::TestEnv::new();
    let gone = env.seed("docs", "gone.txt");

    let mut view = env.view();
    view.refresh().await.unwrap();

    env.listing.set_failing(true);
    let outcome = view.delete(gone.id).await.unwrap();

    assert_eq!(env.store.len(), 0);
    assert!(!outcome.is_current());
    assert_eq!(outcome.resync_error.unwrap().kind, ErrorKind::Network);
    assert!(view.is_stale());
    assert!(view.find(gone.id).is_some());

    env.listing.set_failing(false);
    view.refresh().await.unwrap();
    assert!(!view.is_stale());
    assert!(view.tree().is_empty());
}

#[tokio::test]
async fn test_failed_filter_change_keeps_old_filter() {
    let env = helpers::TestEnv::new();
    env.seed("docs", "a.txt");
    env.seed("music", "b.mp3");

    let mut view = env.view();
    view.set_filter("docs").await.unwrap();

    env.listing.set_failing(true);
    assert!(view.set_filter("music").await.is_err());
    assert_eq!(view.filter(), Some("docs"));
    assert_eq!(view.tree().file_count(), 1);

    env.listing.set_failing(false);
    view.refresh().await.unwrap();
    assert!(view.tree().find_folder("docs").is_some());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let env = helpers::TestEnv::new();
    env.seed("docs", "keep.txt");

    let mut view = env.view();
    view.refresh().await.unwrap();

    env.listing.set_failing(true);
    let err = view.refresh().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(view.tree().file_count(), 1);
}

#[tokio::test]
async fn test_update_moves_file() {
    let env = helpers::TestEnv::new();
    let record = env.seed("inbox", "scan.pdf");

    let mut view = env.view();
    view.refresh().await.unwrap();

    let patch = FileUpdate {
        path: Some("archive/2023".to_string()),
        ..Default::default()
    };
    let updated = view.update(record.id, &patch).await.unwrap();
    assert_eq!(updated.value.path, "archive/2023");

    assert!(view.tree().find_folder("inbox").is_none());
    let archive = view.tree().find_folder("archive/2023").unwrap();
    assert_eq!(view.tree().files_in(archive)[0].id, record.id);
}

#[tokio::test]
async fn test_empty_update_is_rejected_without_call() {
    let env = helpers::TestEnv::new();
    let record = env.seed("", "a");

    let mut view = env.view();
    let err = view.update(record.id, &FileUpdate::default()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(env.listing.calls(), 0);
}

#[tokio::test]
async fn test_drain_resyncs_once() {
    let env = helpers::TestEnv::new();
    let mut view = env.view();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    assert_eq!(view.drain(&mut rx).await.unwrap(), 0);
    assert_eq!(env.listing.calls(), 0);

    tx.send(FileEvent::Deleted { file_id: FileId(1) }).unwrap();
    tx.send(FileEvent::Rescanned).unwrap();
    assert_eq!(view.drain(&mut rx).await.unwrap(), 2);
    assert_eq!(env.listing.calls(), 1);
}

#[tokio::test]
async fn test_drain_retries_after_failed_resync() {
    let env = helpers::TestEnv::new();
    let mut view = env.view();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let record = env.seed("docs", "a.txt");

    env.listing.set_failing(true);
    tx.send(FileEvent::Uploaded { record: record.clone() }).unwrap();
    assert!(view.drain(&mut rx).await.is_err());
    assert!(view.is_stale());

    env.listing.set_failing(false);
    assert_eq!(view.drain(&mut rx).await.unwrap(), 0);
    assert_eq!(env.listing.calls(), 2);
    assert!(view.find(record.id).is_some());
    assert!(!view.is_stale());

    assert_eq!(view.drain(&mut rx).await.unwrap(), 0);
    assert_eq!(env.listing.calls(), 2);
}

#[tokio::test]
async fn test_download_does_not_resync() {
    let env = helpers::TestEnv::new();
    let record = env.seed("docs", "a.txt");

    let view = env.view();
    let file = view.download(record.id).await.unwrap();
    assert_eq!(file.file_name, "a.txt");
    assert_eq!(&file.data[..], b"seed");
    assert_eq!(env.listing.calls(), 0);
}

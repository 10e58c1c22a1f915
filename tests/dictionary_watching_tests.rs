//! Hot reload of dictionary directories
use std::time::Duration;

use nc_gloss::dictionary::{DictionaryStore, DictionaryWatcher};
use tempfile::tempdir;

#[tokio::test]
async fn test_new_dictionary_file_is_merged() {
    let dir = tempdir().expect("tempdir");
    let store = DictionaryStore::builtin();

    let watcher = DictionaryWatcher::spawn(store.clone(), &[dir.path().to_path_buf()], None)
        .expect("start watcher");
    assert_eq!(watcher.watched_dirs().len(), 1);

    tokio::fs::write(
        dir.path().join("shop.json"),
        r#"{"baseDict": {"M130": "shop specific"}}"#,
    )
    .await
    .expect("write dictionary");

    // Wait for file watcher to detect the change
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(store.snapshot().lookup("M130", None), Some("shop specific"));
}

#[tokio::test]
async fn test_broken_file_does_not_change_store() {
    let dir = tempdir().expect("tempdir");
    let store = DictionaryStore::builtin();
    let before = store.snapshot();

    let watcher = DictionaryWatcher::spawn(store.clone(), &[dir.path().to_path_buf()], None)
        .expect("start watcher");

    let reloads = watcher.subscribe();

    tokio::fs::write(dir.path().join("broken.json"), "{ not json")
        .await
        .expect("write broken file");

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(*store.snapshot(), *before);
    assert!(!reloads.has_changed().expect("watcher running"));
}

#[tokio::test]
async fn test_reload_is_announced_to_subscribers() {
    let dir = tempdir().expect("tempdir");
    let store = DictionaryStore::builtin();

    let watcher = DictionaryWatcher::spawn(store.clone(), &[dir.path().to_path_buf()], None)
        .expect("start watcher");
    let mut reloads = watcher.subscribe();

    tokio::fs::write(
        dir.path().join("shop.json"),
        r#"{"modelDicts": {"SHOP-1": {"M130": "chuck air blow"}}}"#,
    )
    .await
    .expect("write dictionary");

    tokio::time::timeout(Duration::from_secs(5), reloads.changed())
        .await
        .expect("reload announced in time")
        .expect("watcher running");

    assert!(*reloads.borrow() >= 1);
    assert_eq!(
        store.snapshot().lookup("M130", Some("SHOP-1")),
        Some("chuck air blow")
    );
}

#[tokio::test]
async fn test_missing_directories_are_not_watched() {
    let store = DictionaryStore::builtin();
    let watcher = DictionaryWatcher::spawn(
        store,
        &[std::path::PathBuf::from("/nonexistent/nc-gloss/dictionaries")],
        None,
    )
    .expect("start watcher");

    assert!(watcher.watched_dirs().is_empty());
}

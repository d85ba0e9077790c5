use epicscreen_core::{FileStorage, MemoryStorage, StorageBackend, WatchlistStore};
use epicscreen_models::Movie;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn movie(id: u64, title: &str, vote_average: f64, release_date: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: None,
        release_date: release_date.to_string(),
        vote_average,
        ..Movie::default()
    }
}

fn counter(store: &WatchlistStore) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    store.subscribe(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[test]
fn add_rename_remove_scenario() {
    let store = WatchlistStore::in_memory();
    assert!(store.list().is_empty());

    store.add(&movie(1, "A", 7.5, "2020-01-01"));
    let items = store.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 1);
    assert_eq!(items[0].title, "A");
    let added_at = items[0].added_at;

    store.add(&movie(1, "A (renamed)", 7.5, "2020-01-01"));
    let items = store.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "A");
    assert_eq!(items[0].added_at, added_at);

    store.remove(1);
    assert!(store.list().is_empty());
}

#[test]
fn round_trip_preserves_snapshot_fields() {
    let store = WatchlistStore::in_memory();
    let mut m = movie(42, "The Answer", 6.3, "");
    m.poster_path = Some("/answer.jpg".to_string());
    store.add(&m);

    let item = &store.list()[0];
    assert_eq!(item.id, m.id);
    assert_eq!(item.title, m.title);
    assert_eq!(item.poster_path, m.poster_path);
    assert_eq!(item.release_date, m.release_date);
    assert_eq!(item.vote_average, m.vote_average);
}

#[test]
fn dedup_holds_across_many_adds() {
    let store = WatchlistStore::in_memory();
    for round in 0..3 {
        for id in 0..20 {
            store.add(&movie(id, &format!("Movie {} v{}", id, round), 5.0, "2001-01-01"));
        }
    }

    let mut ids: Vec<u64> = store.list().iter().map(|i| i.id).collect();
    assert_eq!(ids.len(), 20);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn remove_is_total() {
    let store = WatchlistStore::in_memory();
    store.add(&movie(1, "A", 1.0, ""));
    for id in [0, 1, 2, u64::MAX] {
        store.remove(id);
        assert!(!store.contains(id));
    }
}

#[test]
fn notifications_fire_only_on_change() {
    let store = WatchlistStore::in_memory();
    let count = counter(&store);

    store.add(&movie(1, "A", 1.0, ""));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    store.add(&movie(1, "A", 1.0, ""));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    store.remove(99);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    store.remove(1);
    assert_eq!(count.load(Ordering::SeqCst), 2);
    store.add(&movie(2, "B", 1.0, ""));
    store.clear();
    assert_eq!(count.load(Ordering::SeqCst), 4);
}

#[test]
fn every_subscriber_sees_each_change_once() {
    let store = Arc::new(WatchlistStore::in_memory());
    let badge = counter(&store);
    let page = counter(&store);

    store.add(&movie(7, "Seven", 8.6, "1995-09-22"));

    assert_eq!(badge.load(Ordering::SeqCst), 1);
    assert_eq!(page.load(Ordering::SeqCst), 1);
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let store = WatchlistStore::in_memory();
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    let id = store.subscribe(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });

    assert!(store.unsubscribe(id));
    store.add(&movie(1, "A", 1.0, ""));
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn file_backed_watchlist_survives_restart() {
    let dir = TempDir::new().unwrap();

    let first = WatchlistStore::new(Arc::new(FileStorage::new(dir.path())));
    first.add(&movie(1, "A", 7.0, "2020-01-01"));
    first.add(&movie(2, "B", 8.0, "2021-01-01"));
    let before = first.list();
    drop(first);

    let second = WatchlistStore::new(Arc::new(FileStorage::new(dir.path())));
    assert_eq!(second.list(), before);
    assert!(second.contains(2));
}

#[test]
fn file_contents_use_browser_field_names() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    let store = WatchlistStore::new(Arc::new(storage.clone()));
    store.add(&movie(1, "A", 7.5, "2020-01-01"));

    let raw = storage.get("epicscreen-watchlist").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value[0];
    for field in ["id", "title", "poster_path", "release_date", "vote_average", "addedAt"] {
        assert!(entry.get(field).is_some(), "missing {}", field);
    }
    assert!(entry["addedAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn clear_removes_stored_value() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    let store = WatchlistStore::new(Arc::new(storage.clone()));
    store.add(&movie(1, "A", 7.5, "2020-01-01"));

    store.clear();
    assert!(!storage.path_for("epicscreen-watchlist").exists());
    assert!(store.list().is_empty());
}

#[test]
fn corrupt_file_reads_empty() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.set("epicscreen-watchlist", "\u{0}garbage").unwrap();

    let store = WatchlistStore::new(Arc::new(storage));
    assert!(store.list().is_empty());
    assert!(!store.contains(1));
}

#[test]
fn stores_sharing_a_backend_see_each_other() {
    let backend = Arc::new(MemoryStorage::new());
    let header = WatchlistStore::new(backend.clone());
    let page = WatchlistStore::new(backend);

    header.add(&movie(1, "A", 1.0, ""));
    assert!(page.contains(1));
}

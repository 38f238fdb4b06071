//! Integration tests for the persisted favorites store.

use media_explorer::core::favorites::{FavoritesStore, FAVORITES_FILE};
use media_explorer::models::media::{MediaItem, MediaKind};
use std::fs;
use tempfile::TempDir;

fn item(id: u64, kind: MediaKind, title: &str) -> MediaItem {
    MediaItem {
        id,
        kind,
        title: title.to_string(),
        year: "2001".to_string(),
        poster_path: Some("/poster.jpg".to_string()),
        genre_ids: vec![12, 14],
        overview: Some("An overview.".to_string()),
        vote_average: Some(8.1),
    }
}

// ========== LOAD TESTS ==========

#[test]
fn test_missing_file_loads_empty() {
    let temp = TempDir::new().unwrap();
    let store = FavoritesStore::open_in(temp.path());

    assert!(store.is_empty());
    assert!(!temp.path().join(FAVORITES_FILE).exists());
}

#[test]
fn test_malformed_data_loads_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(FAVORITES_FILE);

    for content in ["not json", "{}", "null", "[{\"id\": 1}]", ""] {
        fs::write(&path, content).unwrap();
        let store = FavoritesStore::open(&path);
        assert!(store.is_empty(), "expected empty store for {:?}", content);
    }
}

// ========== TOGGLE TESTS ==========

#[test]
fn test_toggle_adds_then_removes() {
    let temp = TempDir::new().unwrap();
    let mut store = FavoritesStore::open_in(temp.path());
    let movie = item(120, MediaKind::Movie, "The Fellowship of the Ring");

    assert!(store.toggle(movie.clone()));
    assert_eq!(store.len(), 1);
    assert!(store.is_favorite(&movie));

    assert!(!store.toggle(movie.clone()));
    assert!(store.is_empty());
    assert!(!store.contains(120, MediaKind::Movie));
}

#[test]
fn test_identity_includes_kind() {
    let mut store = FavoritesStore::in_memory();
    store.toggle(item(100, MediaKind::Movie, "Movie 100"));
    store.toggle(item(100, MediaKind::Tv, "Show 100"));

    assert_eq!(store.len(), 2);
    assert!(store.contains(100, MediaKind::Movie));
    assert!(store.contains(100, MediaKind::Tv));

    store.toggle(item(100, MediaKind::Tv, "Show 100"));
    assert_eq!(store.len(), 1);
    assert!(store.contains(100, MediaKind::Movie));
}

#[test]
fn test_toggle_matches_on_identity_not_snapshot() {
    let mut store = FavoritesStore::in_memory();
    store.toggle(item(7, MediaKind::Movie, "Old Title"));

    let mut renamed = item(7, MediaKind::Movie, "New Title");
    renamed.vote_average = None;
    assert!(!store.toggle(renamed));
    assert!(store.is_empty());
}

// ========== PERSISTENCE TESTS ==========

#[test]
fn test_favorites_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let movie = item(1, MediaKind::Movie, "First");
    let show = item(2, MediaKind::Tv, "Second");

    {
        let mut store = FavoritesStore::open_in(temp.path());
        store.toggle(movie.clone());
        store.toggle(show.clone());
    }

    let store = FavoritesStore::open_in(temp.path());
    assert_eq!(store.entries(), &[movie, show]);
}

#[test]
fn test_removal_is_persisted() {
    let temp = TempDir::new().unwrap();
    let movie = item(1, MediaKind::Movie, "First");

    let mut store = FavoritesStore::open_in(temp.path());
    store.toggle(movie.clone());
    store.toggle(movie);

    let reopened = FavoritesStore::open_in(temp.path());
    assert!(reopened.is_empty());
    let content = fs::read_to_string(temp.path().join(FAVORITES_FILE)).unwrap();
    assert_eq!(content.trim(), "[]");
}

#[test]
fn test_persisted_format_is_tagged_json() {
    let temp = TempDir::new().unwrap();
    let mut store = FavoritesStore::open_in(temp.path());
    store.toggle(item(42, MediaKind::Tv, "Answer"));

    let content = fs::read_to_string(temp.path().join(FAVORITES_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value[0]["id"], 42);
    assert_eq!(value[0]["kind"], "tv");
    assert_eq!(value[0]["title"], "Answer");
}

#[test]
fn test_in_memory_store_writes_nothing() {
    let mut store = FavoritesStore::in_memory();
    store.toggle(item(1, MediaKind::Movie, "Ephemeral"));

    assert!(store.save().is_ok());
    assert!(store.is_favorite(&item(1, MediaKind::Movie, "Ephemeral")));
}

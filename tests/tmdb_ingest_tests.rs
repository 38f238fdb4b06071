//! Tests for normalizing TMDB responses into display records.

use media_explorer::models::media::{DetailedMediaItem, MediaKind};
use media_explorer::services::tmdb::{ingest_listing, ListingResponse, MovieDetails, TvDetails};
use serde_json::json;

fn response(value: serde_json::Value) -> ListingResponse {
    serde_json::from_value(value).unwrap()
}

// ========== LISTING TESTS ==========

#[test]
fn test_multi_search_mixed_results() {
    let listing = response(json!({
        "page": 1,
        "total_pages": 5,
        "results": [
            { "id": 268, "media_type": "movie", "title": "Batman", "release_date": "1989-06-23",
              "genre_ids": [14, 28], "vote_average": 7.2 },
            { "id": 2098, "media_type": "tv", "name": "Batman: The Animated Series",
              "first_air_date": "1992-09-05" },
            { "id": 3894, "media_type": "person", "name": "Christian Bale" }
        ]
    }));

    let page = ingest_listing(listing, "search/multi", None).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.results.len(), 2);

    let movie = &page.results[0];
    assert_eq!(movie.kind, MediaKind::Movie);
    assert_eq!(movie.title, "Batman");
    assert_eq!(movie.year, "1989");
    assert_eq!(movie.genre_ids, vec![14, 28]);

    let show = &page.results[1];
    assert_eq!(show.kind, MediaKind::Tv);
    assert_eq!(show.title, "Batman: The Animated Series");
    assert_eq!(show.year, "1992");
}

#[test]
fn test_untagged_items_use_override_then_path() {
    let raw = json!({
        "page": 2,
        "total_pages": 10,
        "results": [{ "id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17" }]
    });

    let page = ingest_listing(response(raw.clone()), "tv/popular", None).unwrap();
    assert_eq!(page.results[0].kind, MediaKind::Tv);
    assert_eq!(page.results[0].title, "Game of Thrones");

    let page = ingest_listing(response(raw), "tv/popular", Some(MediaKind::Movie)).unwrap();
    assert_eq!(page.results[0].kind, MediaKind::Movie);
    assert_eq!(page.results[0].title, "Game of Thrones");
    assert_eq!(page.results[0].year, "2011");
}

#[test]
fn test_api_tag_beats_override() {
    let listing = response(json!({
        "results": [{ "id": 1, "media_type": "tv", "name": "Tagged Show" }]
    }));

    let page = ingest_listing(listing, "trending/movie/day", Some(MediaKind::Movie)).unwrap();
    assert_eq!(page.results[0].kind, MediaKind::Tv);
    assert_eq!(page.page, 1);
}

#[test]
fn test_missing_dates_and_titles() {
    let listing = response(json!({
        "page": 1,
        "total_pages": 1,
        "results": [
            { "id": 5, "title": "No Date", "release_date": "" },
            { "id": 6 }
        ]
    }));

    let page = ingest_listing(listing, "movie/popular", Some(MediaKind::Movie)).unwrap();
    assert_eq!(page.results[0].year, "N/A");
    assert_eq!(page.results[1].year, "N/A");
    assert_eq!(page.results[1].title, "");
    assert!(page.results[1].genre_ids.is_empty());
}

#[test]
fn test_malformed_item_is_an_error() {
    let listing = response(json!({
        "results": [{ "title": "Missing id" }]
    }));

    assert!(ingest_listing(listing, "movie/popular", None).is_err());
}

#[test]
fn test_empty_response_defaults() {
    let page = ingest_listing(response(json!({})), "search/multi", None).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 0);
    assert!(page.results.is_empty());
}

// ========== DETAIL TESTS ==========

#[test]
fn test_movie_details_conversion() {
    let details: MovieDetails = serde_json::from_value(json!({
        "id": 27205,
        "title": "Inception",
        "release_date": "2010-07-15",
        "tagline": "Your mind is the scene of the crime.",
        "runtime": 148,
        "genres": [{ "id": 28, "name": "Action" }, { "id": 878, "name": "Science Fiction" }]
    }))
    .unwrap();

    let detail = DetailedMediaItem::from(details);
    assert_eq!(detail.item.kind, MediaKind::Movie);
    assert_eq!(detail.item.year, "2010");
    assert_eq!(detail.runtime, Some(148));
    assert_eq!(detail.genres, vec!["Action", "Science Fiction"]);
    assert_eq!(detail.item.genre_ids, vec![28, 878]);
}

#[test]
fn test_tv_details_runtime_from_episodes() {
    let details: TvDetails = serde_json::from_value(json!({
        "id": 1396,
        "name": "Breaking Bad",
        "first_air_date": "2008-01-20",
        "tagline": "",
        "episode_run_time": [45, 47]
    }))
    .unwrap();

    let detail = DetailedMediaItem::from(details);
    assert_eq!(detail.item.kind, MediaKind::Tv);
    assert_eq!(detail.item.title, "Breaking Bad");
    assert_eq!(detail.runtime, Some(45));
    assert!(detail.tagline.is_none());

    let no_runtime: TvDetails = serde_json::from_value(json!({ "id": 2, "name": "Short" })).unwrap();
    assert!(DetailedMediaItem::from(no_runtime).runtime.is_none());
}

//! Media-related data models.
//!
//! These are the normalized display records. Raw TMDB response shapes live in
//! [`crate::services::tmdb`] and are projected into these types at ingestion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Poster image base URL (w500 renditions).
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Placeholder image service used when an item has no poster.
const PLACEHOLDER_BASE_URL: &str = "https://placehold.co/300x450/CCCCCC/333333";

/// Media kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment and wire name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    /// Parse the `media_type` tag TMDB attaches to multi-search results.
    ///
    /// Returns `None` for tags outside this domain (e.g. `person`).
    pub fn from_api(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Tv),
            _ => None,
        }
    }

    /// Infer a kind from an endpoint path: movie-ish paths are movies, anything else is TV.
    pub fn infer_from_path(path: &str) -> Self {
        if path.contains("movie") {
            MediaKind::Movie
        } else {
            MediaKind::Tv
        }
    }

    /// Human readable noun.
    pub fn noun(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "TV show",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" | "tvshow" | "tvshows" => Ok(MediaKind::Tv),
            other => Err(crate::Error::InvalidMediaKind(other.to_string())),
        }
    }
}

/// Normalized listing record shared by movies and TV shows.
///
/// Identity is `(id, kind)`: a movie and a TV show may share a numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// TMDB ID.
    pub id: u64,
    /// Movie or TV.
    pub kind: MediaKind,
    /// Display title (`title` for movies, `name` for TV).
    pub title: String,
    /// Release or first-air year, or "N/A".
    pub year: String,
    /// Poster path relative to the image CDN.
    pub poster_path: Option<String>,
    /// Genre ids (list-shaped results only).
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Overview/synopsis.
    #[serde(default)]
    pub overview: Option<String>,
    /// TMDB vote average.
    #[serde(default)]
    pub vote_average: Option<f32>,
}

impl MediaItem {
    /// Composite identity key.
    pub fn key(&self) -> (u64, MediaKind) {
        (self.id, self.kind)
    }

    /// Poster URL, or a placeholder carrying the title.
    pub fn poster_url(&self) -> String {
        poster_url(self.poster_path.as_deref(), &self.title)
    }
}

/// Extended record shown in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedMediaItem {
    /// Summary fields, refreshed from the detail response.
    pub item: MediaItem,
    /// Tagline.
    pub tagline: Option<String>,
    /// Runtime in minutes (movie runtime or first episode runtime).
    pub runtime: Option<u32>,
    /// Genre names resolved server-side.
    pub genres: Vec<String>,
}

impl DetailedMediaItem {
    /// Merge this detail record over a summary item.
    ///
    /// Identity always comes from the summary; display fields prefer the detail
    /// and fall back to the summary where the detail has nothing.
    pub fn merged_onto(mut self, summary: &MediaItem) -> Self {
        self.item.id = summary.id;
        self.item.kind = summary.kind;
        if self.item.title.is_empty() {
            self.item.title = summary.title.clone();
        }
        if self.item.year == "N/A" {
            self.item.year = summary.year.clone();
        }
        if self.item.poster_path.is_none() {
            self.item.poster_path = summary.poster_path.clone();
        }
        if self.item.overview.as_deref().map_or(true, str::is_empty) {
            self.item.overview = summary.overview.clone();
        }
        if self.item.vote_average.is_none() {
            self.item.vote_average = summary.vote_average;
        }
        if self.item.genre_ids.is_empty() {
            self.item.genre_ids = summary.genre_ids.clone();
        }
        self
    }
}

/// Video attached to a movie or TV show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Hosting site (e.g. "YouTube").
    #[serde(default)]
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type", default)]
    pub video_type: String,
    /// Video title.
    #[serde(default)]
    pub name: String,
    /// Provider key used to build a playback URL.
    pub key: String,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Genre id to display name mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreMap(HashMap<u32, String>);

impl GenreMap {
    /// Build from a genre list.
    pub fn from_genres<I: IntoIterator<Item = Genre>>(genres: I) -> Self {
        Self(genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    /// Add every genre from `other`, keeping existing names on conflict.
    pub fn merge(&mut self, other: GenreMap) {
        for (id, name) in other.0 {
            self.0.entry(id).or_insert(name);
        }
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render genre ids as names: "N/A" for none, "Unknown" for unmapped ids.
    pub fn describe(&self, ids: &[u32]) -> String {
        if ids.is_empty() {
            return "N/A".to_string();
        }
        ids.iter()
            .map(|id| self.get(*id).unwrap_or("Unknown"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 1-based page number.
    pub page: u32,
    /// Total pages reported by the API.
    pub total_pages: u32,
    pub results: Vec<T>,
}

/// Year from a date string: the first four characters, or "N/A".
pub fn year_from_date(date: Option<&str>) -> String {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => d.chars().take(4).collect(),
        None => "N/A".to_string(),
    }
}

/// Poster URL for a path, or a placeholder carrying the title.
pub fn poster_url(path: Option<&str>, title: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => format!("{}{}", POSTER_BASE_URL, p),
        None => format!(
            "{}?text={}",
            PLACEHOLDER_BASE_URL,
            urlencoding::encode(title)
        ),
    }
}

/// Vote average to one decimal, or "N/A".
pub fn rating_display(vote_average: Option<f32>) -> String {
    match vote_average {
        Some(v) if v > 0.0 => format!("{:.1}", v),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, kind: MediaKind) -> MediaItem {
        MediaItem {
            id,
            kind,
            title: "Arrival".to_string(),
            year: "2016".to_string(),
            poster_path: None,
            genre_ids: vec![],
            overview: Some("Linguist meets heptapods.".to_string()),
            vote_average: Some(7.6),
        }
    }

    #[test]
    fn test_infer_kind_from_path() {
        assert_eq!(MediaKind::infer_from_path("movie/popular"), MediaKind::Movie);
        assert_eq!(MediaKind::infer_from_path("trending/movie/day"), MediaKind::Movie);
        assert_eq!(MediaKind::infer_from_path("tv/popular"), MediaKind::Tv);
        assert_eq!(MediaKind::infer_from_path("search/multi"), MediaKind::Tv);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("tv".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert!("person".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date(Some("2016-11-10")), "2016");
        assert_eq!(year_from_date(Some("")), "N/A");
        assert_eq!(year_from_date(None), "N/A");
    }

    #[test]
    fn test_poster_url_placeholder() {
        assert_eq!(
            poster_url(Some("/abc.jpg"), "Arrival"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            poster_url(None, "The Wire"),
            "https://placehold.co/300x450/CCCCCC/333333?text=The%20Wire"
        );
    }

    #[test]
    fn test_genre_describe() {
        let map = GenreMap::from_genres(vec![
            Genre { id: 18, name: "Drama".to_string() },
            Genre { id: 878, name: "Science Fiction".to_string() },
        ]);
        assert_eq!(map.describe(&[]), "N/A");
        assert_eq!(map.describe(&[18, 878]), "Drama, Science Fiction");
        assert_eq!(map.describe(&[18, 1]), "Drama, Unknown");
        assert_eq!(GenreMap::default().describe(&[18]), "Unknown");
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(rating_display(Some(7.654)), "7.7");
        assert_eq!(rating_display(Some(0.0)), "N/A");
        assert_eq!(rating_display(None), "N/A");
    }

    #[test]
    fn test_merge_keeps_summary_identity() {
        let summary = item(42, MediaKind::Tv);
        let detail = DetailedMediaItem {
            item: MediaItem {
                id: 0,
                kind: MediaKind::Movie,
                title: "Arrival (Extended)".to_string(),
                year: "N/A".to_string(),
                poster_path: Some("/p.jpg".to_string()),
                genre_ids: vec![],
                overview: None,
                vote_average: None,
            },
            tagline: Some("Why are they here?".to_string()),
            runtime: Some(116),
            genres: vec!["Drama".to_string()],
        };

        let merged = detail.merged_onto(&summary);
        assert_eq!(merged.item.key(), (42, MediaKind::Tv));
        assert_eq!(merged.item.title, "Arrival (Extended)");
        assert_eq!(merged.item.year, "2016");
        assert_eq!(merged.item.overview, summary.overview);
        assert_eq!(merged.item.vote_average, Some(7.6));
        assert_eq!(merged.runtime, Some(116));
    }
}

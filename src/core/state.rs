//! Application state tree.
//!
//! Owned by the [`Controller`](super::controller::Controller) and only mutated
//! through its messages and request outcomes.

use super::embed::{trailer_embed_url, StreamingProvider};
use super::favorites::FavoritesStore;
use super::pagination::Pagination;
use crate::models::media::{DetailedMediaItem, GenreMap, MediaItem, MediaKind, Video};
use crate::services::tmdb::Endpoint;

/// Top-level tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    Favorites,
}

/// Independently loaded list sections of the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Popular movies, or search results while a query is committed. Paged.
    Popular,
    TrendingMovies,
    PopularTv,
    TrendingTv,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Popular,
        SectionKind::TrendingMovies,
        SectionKind::PopularTv,
        SectionKind::TrendingTv,
    ];

    /// Endpoint feeding this section when no query is committed.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            SectionKind::Popular => Endpoint::PopularMovies,
            SectionKind::TrendingMovies => Endpoint::TrendingMovies,
            SectionKind::PopularTv => Endpoint::PopularTv,
            SectionKind::TrendingTv => Endpoint::TrendingTv,
        }
    }

    /// Kind stamped on results when the API does not tag them.
    pub fn kind(&self) -> MediaKind {
        match self {
            SectionKind::Popular | SectionKind::TrendingMovies => MediaKind::Movie,
            SectionKind::PopularTv | SectionKind::TrendingTv => MediaKind::Tv,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Popular => "Popular Movies",
            SectionKind::TrendingMovies => "Trending Movies Today",
            SectionKind::PopularTv => "Popular TV Shows",
            SectionKind::TrendingTv => "Trending TV This Week",
        }
    }
}

/// One list section with its own loading flag.
#[derive(Debug, Default)]
pub struct Section {
    pub items: Vec<MediaItem>,
    pub loading: bool,
    latest_request: Option<u64>,
}

impl Section {
    /// Mark a request as the latest for this section.
    pub(crate) fn begin(&mut self, request_id: u64) {
        self.loading = true;
        self.latest_request = Some(request_id);
    }

    pub(crate) fn is_latest(&self, request_id: u64) -> bool {
        self.latest_request == Some(request_id)
    }

    /// Replace the items wholesale.
    pub(crate) fn finish(&mut self, items: Vec<MediaItem>) {
        self.items = items;
        self.loading = false;
    }

    /// Empty the section after a failed fetch.
    pub(crate) fn fail(&mut self) {
        self.items.clear();
        self.loading = false;
    }
}

/// All home sections.
#[derive(Debug, Default)]
pub struct Sections {
    pub popular: Section,
    pub trending_movies: Section,
    pub popular_tv: Section,
    pub trending_tv: Section,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::Popular => &self.popular,
            SectionKind::TrendingMovies => &self.trending_movies,
            SectionKind::PopularTv => &self.popular_tv,
            SectionKind::TrendingTv => &self.trending_tv,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut Section {
        match kind {
            SectionKind::Popular => &mut self.popular,
            SectionKind::TrendingMovies => &mut self.trending_movies,
            SectionKind::PopularTv => &mut self.popular_tv,
            SectionKind::TrendingTv => &mut self.trending_tv,
        }
    }
}

/// State of an open detail view.
#[derive(Debug)]
pub struct DetailState {
    /// Item as selected from a list; its identity is authoritative.
    pub summary: MediaItem,
    /// Detail record merged over the summary, once loaded.
    pub detail: Option<DetailedMediaItem>,
    pub loading: bool,
    /// Shown when the detail fetch failed.
    pub notice: Option<String>,
    /// Official trailers in API order.
    pub trailers: Vec<Video>,
    /// Key of the trailer currently playing.
    pub playing: Option<String>,
    pub provider: StreamingProvider,
    pub embed_url: String,
    pub recommendations: Option<String>,
    pub generating: bool,
    request: u64,
    recommendation_request: Option<u64>,
}

impl DetailState {
    pub(crate) fn new(summary: MediaItem, provider: StreamingProvider, request: u64) -> Self {
        let embed_url = provider.embed_url(summary.kind, summary.id);
        Self {
            summary,
            detail: None,
            loading: true,
            notice: None,
            trailers: Vec::new(),
            playing: None,
            provider,
            embed_url,
            recommendations: None,
            generating: false,
            request,
            recommendation_request: None,
        }
    }

    pub(crate) fn request(&self) -> u64 {
        self.request
    }

    pub(crate) fn begin_recommendation(&mut self, request: u64) {
        self.generating = true;
        self.recommendations = None;
        self.recommendation_request = Some(request);
    }

    pub(crate) fn is_latest_recommendation(&self, request: u64) -> bool {
        self.recommendation_request == Some(request)
    }

    /// Item to display: the detail when loaded, otherwise the summary.
    pub fn display(&self) -> &MediaItem {
        self.detail.as_ref().map_or(&self.summary, |d| &d.item)
    }

    /// Genre line: embedded names from the detail, otherwise ids resolved via `genres`.
    pub fn genre_names(&self, genres: &GenreMap) -> String {
        match self.detail {
            Some(ref d) if !d.genres.is_empty() => d.genres.join(", "),
            _ => genres.describe(&self.display().genre_ids),
        }
    }

    /// Switch provider and recompute the embed URL.
    pub fn select_provider(&mut self, provider: StreamingProvider) {
        self.provider = provider;
        self.embed_url = provider.embed_url(self.summary.kind, self.summary.id);
    }

    /// Play the trailer with `key`. Returns false if it is not one of the trailers.
    pub fn select_trailer(&mut self, key: &str) -> bool {
        if self.trailers.iter().any(|v| v.key == key) {
            self.playing = Some(key.to_string());
            true
        } else {
            false
        }
    }

    /// Embed URL of the playing trailer.
    pub fn trailer_url(&self) -> Option<String> {
        self.playing.as_deref().map(trailer_embed_url)
    }
}

/// The whole explorer state.
#[derive(Debug)]
pub struct AppState {
    pub view: View,
    /// Keystroke buffer.
    pub raw_query: String,
    /// Debounce-stabilized query driving the listing.
    pub committed_query: Option<String>,
    pub pagination: Pagination,
    pub sections: Sections,
    /// User-facing error banner.
    pub error: Option<String>,
    pub genres: GenreMap,
    pub favorites: FavoritesStore,
    pub detail: Option<DetailState>,
}

impl AppState {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self {
            view: View::default(),
            raw_query: String::new(),
            committed_query: None,
            pagination: Pagination::default(),
            sections: Sections::default(),
            error: None,
            genres: GenreMap::default(),
            favorites,
            detail: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.committed_query.is_some()
    }

    /// Heading of the paged listing.
    pub fn listing_title(&self) -> String {
        match self.committed_query {
            Some(ref q) => format!("Search Results for \"{}\"", q),
            None => SectionKind::Popular.label().to_string(),
        }
    }

    /// Sections shown in the home view. Only the paged listing while searching.
    pub fn visible_sections(&self) -> Vec<SectionKind> {
        if self.is_searching() {
            vec![SectionKind::Popular]
        } else {
            SectionKind::ALL.to_vec()
        }
    }

    /// Items of the current view in display order.
    pub fn visible_items(&self) -> Vec<&MediaItem> {
        match self.view {
            View::Favorites => self.favorites.entries().iter().collect(),
            View::Home => self
                .visible_sections()
                .into_iter()
                .flat_map(|k| self.sections.get(k).items.iter())
                .collect(),
        }
    }

    /// True while any section is loading.
    pub fn is_loading(&self) -> bool {
        SectionKind::ALL
            .iter()
            .any(|k| self.sections.get(*k).loading)
    }
}

//! Explorer controller.
//!
//! Owns the [`AppState`] and turns typed [`Message`]s into state changes plus
//! [`Request`]s for the remote APIs. Requests run without holding the
//! controller, so outcomes may arrive in any order; each carries the id it was
//! issued with and is dropped unless it is still the latest for its slot.

use super::debounce::Debouncer;
use super::embed::{official_trailers, StreamingProvider};
use super::favorites::FavoritesStore;
use super::recommend::{recommend, REQUEST_FAILED_TEXT};
use super::state::{AppState, DetailState, SectionKind, View};
use crate::models::media::{DetailedMediaItem, GenreMap, MediaItem, MediaKind, Page, Video};
use crate::services::gemini::Recommender;
use crate::services::tmdb::{Endpoint, MetadataApi};
use crate::Result;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Banner shown when a listing fetch fails.
pub const LISTING_FAILED_TEXT: &str = "Failed to fetch titles. Please try again later.";

/// Banner shown when the genre list cannot be loaded.
pub const GENRES_FAILED_TEXT: &str = "Failed to load genres.";

/// Notice shown in the detail view when its fetch fails.
pub const DETAIL_FAILED_TEXT: &str = "Failed to load details.";

/// User and system events.
#[derive(Debug, Clone)]
pub enum Message {
    /// Initial load: genres plus the current view.
    Started,
    /// Load the genre map only.
    GenresRequested,
    /// Raw search input changed at `at`.
    QueryChanged { text: String, at: Instant },
    /// Debounce timer check at the given instant.
    DebounceElapsed(Instant),
    /// Search form submitted: commit now and show the listing.
    SearchSubmitted,
    SearchCleared,
    TabSelected(View),
    PageRequested(u32),
    NextPage,
    PreviousPage,
    ItemSelected(MediaItem),
    DetailClosed,
    ProviderSelected(StreamingProvider),
    TrailerSelected(String),
    FavoriteToggled(MediaItem),
    RecommendationsRequested,
}

/// Work for the remote APIs.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Genres,
    Listing {
        id: u64,
        section: SectionKind,
        path: &'static str,
        page: u32,
        query: Option<String>,
        kind_override: Option<MediaKind>,
    },
    Detail {
        id: u64,
        item: MediaItem,
    },
    Recommend {
        id: u64,
        title: String,
        kind: MediaKind,
    },
}

/// Completed request.
#[derive(Debug)]
pub enum Outcome {
    Genres(Result<GenreMap>),
    Listing {
        id: u64,
        section: SectionKind,
        result: Result<Page<MediaItem>>,
    },
    Detail {
        id: u64,
        result: Result<(DetailedMediaItem, Vec<Video>)>,
    },
    Recommend {
        id: u64,
        text: String,
    },
}

/// Explorer controller.
pub struct Controller {
    api: Arc<dyn MetadataApi>,
    recommender: Option<Arc<dyn Recommender>>,
    state: AppState,
    debouncer: Debouncer,
    default_provider: StreamingProvider,
    last_request: u64,
}

impl Controller {
    pub fn new(
        api: Arc<dyn MetadataApi>,
        recommender: Option<Arc<dyn Recommender>>,
        favorites: FavoritesStore,
    ) -> Self {
        Self {
            api,
            recommender,
            state: AppState::new(favorites),
            debouncer: Debouncer::default(),
            default_provider: StreamingProvider::default(),
            last_request: 0,
        }
    }

    /// Use a different search quiet window.
    pub fn with_debounce(mut self, quiet: Duration) -> Self {
        self.debouncer = Debouncer::new(quiet);
        self
    }

    /// Provider selected when a detail view opens.
    pub fn with_provider(mut self, provider: StreamingProvider) -> Self {
        self.default_provider = provider;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// When pending search input will commit, if any.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn next_request_id(&mut self) -> u64 {
        self.last_request += 1;
        self.last_request
    }

    /// Apply a message and return the requests it triggers.
    pub fn update(&mut self, message: Message) -> Vec<Request> {
        match message {
            Message::Started => {
                let mut requests = vec![Request::Genres];
                if self.state.view == View::Home {
                    requests.extend(self.listing_requests());
                }
                requests
            }

            Message::GenresRequested => vec![Request::Genres],

            Message::QueryChanged { text, at } => {
                self.state.raw_query = text.clone();
                self.debouncer.input(text, at);
                Vec::new()
            }

            Message::DebounceElapsed(now) => match self.debouncer.poll(now) {
                Some(text) => self.commit_query(&text, false),
                None => Vec::new(),
            },

            Message::SearchSubmitted => {
                let text = self
                    .debouncer
                    .flush()
                    .unwrap_or_else(|| self.state.raw_query.clone());
                let switched = self.state.view != View::Home;
                self.state.view = View::Home;
                self.commit_query(&text, switched)
            }

            Message::SearchCleared => {
                let had_query =
                    self.state.committed_query.is_some() || self.state.pagination.page() != 1;
                self.clear_search();
                if had_query && self.state.view == View::Home {
                    self.listing_requests()
                } else {
                    Vec::new()
                }
            }

            Message::TabSelected(view) => {
                self.clear_search();
                self.state.view = view;
                match view {
                    View::Home => self.listing_requests(),
                    View::Favorites => Vec::new(),
                }
            }

            Message::PageRequested(page) => self.request_page(page),
            Message::NextPage => self.request_page(self.state.pagination.page().saturating_add(1)),
            Message::PreviousPage => self.request_page(self.state.pagination.page().saturating_sub(1)),

            Message::ItemSelected(item) => {
                let id = self.next_request_id();
                self.state.detail = Some(DetailState::new(item.clone(), self.default_provider, id));
                vec![Request::Detail { id, item }]
            }

            Message::DetailClosed => {
                self.state.detail = None;
                Vec::new()
            }

            Message::ProviderSelected(provider) => {
                if let Some(ref mut detail) = self.state.detail {
                    detail.select_provider(provider);
                }
                Vec::new()
            }

            Message::TrailerSelected(key) => {
                if let Some(ref mut detail) = self.state.detail {
                    if !detail.select_trailer(&key) {
                        tracing::debug!("Ignoring unknown trailer {}", key);
                    }
                }
                Vec::new()
            }

            Message::FavoriteToggled(item) => {
                let title = item.title.clone();
                let added = self.state.favorites.toggle(item);
                tracing::info!(
                    "{} favorites: {}",
                    if added { "Added to" } else { "Removed from" },
                    title
                );
                Vec::new()
            }

            Message::RecommendationsRequested => {
                let Some(generating) = self.state.detail.as_ref().map(|d| d.generating) else {
                    return Vec::new();
                };
                if generating {
                    return Vec::new();
                }
                let id = self.next_request_id();
                match self.state.detail {
                    Some(ref mut detail) => {
                        detail.begin_recommendation(id);
                        let item = detail.display();
                        vec![Request::Recommend {
                            id,
                            title: item.title.clone(),
                            kind: item.kind,
                        }]
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    fn clear_search(&mut self) {
        self.debouncer.cancel();
        self.state.raw_query.clear();
        self.state.committed_query = None;
        self.state.pagination.reset();
    }

    /// Commit `text` as the active query and reset to page 1.
    fn commit_query(&mut self, text: &str, force_fetch: bool) -> Vec<Request> {
        let query = Some(text.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let changed = query != self.state.committed_query || self.state.pagination.page() != 1;
        if changed {
            tracing::debug!("Committed query: {:?}", query);
            self.state.committed_query = query;
            self.state.pagination.reset();
        }

        if (changed || force_fetch) && self.state.view == View::Home {
            self.listing_requests()
        } else {
            Vec::new()
        }
    }

    fn request_page(&mut self, page: u32) -> Vec<Request> {
        if self.state.view != View::Home {
            return Vec::new();
        }
        match self.state.pagination.request(page) {
            Some(page) => vec![self.paged_request(page)],
            None => {
                tracing::debug!("Page {} clamped to current page, nothing to fetch", page);
                Vec::new()
            }
        }
    }

    /// Requests for the home view: search results alone while a query is
    /// committed, otherwise all four sections.
    fn listing_requests(&mut self) -> Vec<Request> {
        self.state.error = None;
        let page = self.state.pagination.page();

        if self.state.committed_query.is_some() {
            return vec![self.paged_request(page)];
        }

        let mut requests = vec![self.paged_request(page)];
        for section in [
            SectionKind::TrendingMovies,
            SectionKind::PopularTv,
            SectionKind::TrendingTv,
        ] {
            let request =
                self.section_request(section, section.endpoint(), 1, None, Some(section.kind()));
            requests.push(request);
        }
        requests
    }

    /// Request for the paged listing (popular movies or search results).
    fn paged_request(&mut self, page: u32) -> Request {
        match self.state.committed_query.clone() {
            Some(query) => self.section_request(
                SectionKind::Popular,
                Endpoint::SearchMulti,
                page,
                Some(query),
                None,
            ),
            None => self.section_request(
                SectionKind::Popular,
                Endpoint::PopularMovies,
                page,
                None,
                Some(MediaKind::Movie),
            ),
        }
    }

    fn section_request(
        &mut self,
        section: SectionKind,
        endpoint: Endpoint,
        page: u32,
        query: Option<String>,
        kind_override: Option<MediaKind>,
    ) -> Request {
        let id = self.next_request_id();
        self.state.sections.get_mut(section).begin(id);
        Request::Listing {
            id,
            section,
            path: endpoint.path(),
            page,
            query,
            kind_override,
        }
    }

    /// Fold a completed request into the state.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Genres(Ok(genres)) => {
                tracing::debug!("Loaded {} genres", genres.len());
                self.state.genres = genres;
            }
            Outcome::Genres(Err(e)) => {
                tracing::warn!("Error fetching genres: {}", e);
                self.state.error = Some(GENRES_FAILED_TEXT.to_string());
            }

            Outcome::Listing { id, section, result } => {
                let slot = self.state.sections.get_mut(section);
                if !slot.is_latest(id) {
                    tracing::debug!("Dropping stale response #{} for {:?}", id, section);
                    return;
                }
                match result {
                    Ok(page) => {
                        tracing::debug!(
                            "{:?}: {} items, page {}/{}",
                            section,
                            page.results.len(),
                            page.page,
                            page.total_pages
                        );
                        slot.finish(page.results);
                        if section == SectionKind::Popular {
                            self.state
                                .pagination
                                .update_from_response(page.page, page.total_pages);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Fetch {:?} failed: {}", section, e);
                        slot.fail();
                        self.state.error = Some(LISTING_FAILED_TEXT.to_string());
                    }
                }
            }

            Outcome::Detail { id, result } => {
                let Some(ref mut detail) = self.state.detail else {
                    return;
                };
                if detail.request() != id {
                    tracing::debug!("Dropping stale detail response #{}", id);
                    return;
                }
                detail.loading = false;
                match result {
                    Ok((record, videos)) => {
                        detail.detail = Some(record.merged_onto(&detail.summary));
                        detail.trailers = official_trailers(videos);
                        detail.playing = detail.trailers.first().map(|v| v.key.clone());
                        detail.notice = None;
                    }
                    Err(e) => {
                        tracing::warn!("Error fetching details or videos: {}", e);
                        detail.detail = None;
                        detail.trailers.clear();
                        detail.playing = None;
                        detail.notice = Some(DETAIL_FAILED_TEXT.to_string());
                    }
                }
            }

            Outcome::Recommend { id, text } => {
                if let Some(ref mut detail) = self.state.detail {
                    if detail.is_latest_recommendation(id) {
                        detail.recommendations = Some(text);
                        detail.generating = false;
                    }
                }
            }
        }
    }

    /// Future performing `request`. It does not borrow the controller.
    pub fn execute(&self, request: Request) -> BoxFuture<'static, Outcome> {
        let api = Arc::clone(&self.api);
        let recommender = self.recommender.clone();

        async move {
            match request {
                Request::Genres => Outcome::Genres(api.genres().await),
                Request::Listing {
                    id,
                    section,
                    path,
                    page,
                    query,
                    kind_override,
                } => {
                    let result = api.listing(path, page, query.as_deref(), kind_override).await;
                    Outcome::Listing { id, section, result }
                }
                Request::Detail { id, item } => {
                    let result = futures::try_join!(
                        api.details(item.kind, item.id),
                        api.videos(item.kind, item.id)
                    );
                    Outcome::Detail { id, result }
                }
                Request::Recommend { id, title, kind } => {
                    let text = match recommender {
                        Some(recommender) => recommend(recommender.as_ref(), &title, kind).await,
                        None => {
                            tracing::warn!("Recommendations unavailable: no Gemini API key");
                            REQUEST_FAILED_TEXT.to_string()
                        }
                    };
                    Outcome::Recommend { id, text }
                }
            }
        }
        .boxed()
    }

    /// Run `requests` concurrently, applying each outcome as it completes.
    pub async fn run(&mut self, requests: Vec<Request>) {
        let mut pending: FuturesUnordered<_> =
            requests.into_iter().map(|r| self.execute(r)).collect();
        while let Some(outcome) = pending.next().await {
            self.apply(outcome);
        }
    }

    /// Apply `message` and run whatever it triggers to completion.
    pub async fn dispatch(&mut self, message: Message) {
        let requests = self.update(message);
        self.run(requests).await;
    }
}

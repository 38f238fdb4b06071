//! TMDB API client.

use crate::models::config::TmdbSettings;
use crate::models::media::{
    year_from_date, DetailedMediaItem, Genre, GenreMap, MediaItem, MediaKind, Page, Video,
};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Listing endpoints used by the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    PopularMovies,
    TrendingMovies,
    PopularTv,
    TrendingTv,
    SearchMulti,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::PopularMovies => "movie/popular",
            Endpoint::TrendingMovies => "trending/movie/day",
            Endpoint::PopularTv => "tv/popular",
            Endpoint::TrendingTv => "trending/tv/week",
            Endpoint::SearchMulti => "search/multi",
        }
    }
}

/// Source of movie and TV metadata.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Fetch one page of a listing endpoint, stamping every item with a media kind.
    async fn listing(
        &self,
        path: &str,
        page: u32,
        query: Option<&str>,
        kind_override: Option<MediaKind>,
    ) -> Result<Page<MediaItem>>;

    /// Fetch the movie and TV genre lists.
    async fn genres(&self) -> Result<GenreMap>;

    /// Fetch the detail record for one item.
    async fn details(&self, kind: MediaKind, id: u64) -> Result<DetailedMediaItem>;

    /// Fetch the video list for one item.
    async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>>;
}

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub base_url: String,
    pub language: Option<String>,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
}

impl TmdbConfig {
    /// Create config from settings.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn from_settings(settings: &TmdbSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::TmdbApiKeyMissing)?;

        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            language: settings.language.clone(),
            use_bearer,
        })
    }
}

/// Paginated listing response. Items stay untyped until their kind is resolved.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

fn first_page() -> u32 {
    1
}

/// Movie-shaped list item.
#[derive(Debug, Deserialize)]
pub struct MovieRecord {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    pub overview: Option<String>,
    pub vote_average: Option<f32>,
}

/// TV-shaped list item.
#[derive(Debug, Deserialize)]
pub struct TvRecord {
    pub id: u64,
    pub name: Option<String>,
    pub title: Option<String>,
    pub first_air_date: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    pub overview: Option<String>,
    pub vote_average: Option<f32>,
}

/// A list item resolved to its media kind.
#[derive(Debug)]
pub enum MediaRecord {
    Movie(MovieRecord),
    Tv(TvRecord),
}

impl MediaRecord {
    /// Decode a raw list item as the given kind.
    pub fn from_value(value: serde_json::Value, kind: MediaKind) -> Result<Self> {
        Ok(match kind {
            MediaKind::Movie => MediaRecord::Movie(serde_json::from_value(value)?),
            MediaKind::Tv => MediaRecord::Tv(serde_json::from_value(value)?),
        })
    }

    /// Project into the normalized display record.
    pub fn into_item(self) -> MediaItem {
        match self {
            MediaRecord::Movie(m) => MediaItem {
                id: m.id,
                kind: MediaKind::Movie,
                title: m.title.or(m.name).unwrap_or_default(),
                year: year_from_date(m.release_date.or(m.first_air_date).as_deref()),
                poster_path: m.poster_path,
                genre_ids: m.genre_ids,
                overview: m.overview,
                vote_average: m.vote_average,
            },
            MediaRecord::Tv(t) => MediaItem {
                id: t.id,
                kind: MediaKind::Tv,
                title: t.name.or(t.title).unwrap_or_default(),
                year: year_from_date(t.first_air_date.or(t.release_date).as_deref()),
                poster_path: t.poster_path,
                genre_ids: t.genre_ids,
                overview: t.overview,
                vote_average: t.vote_average,
            },
        }
    }
}

/// Resolve the media kind of one raw list item.
///
/// The API tag wins, then the caller's override, then the endpoint path.
/// Returns `None` for tagged items outside movie/TV (people in multi-search).
pub fn resolve_kind(
    value: &serde_json::Value,
    path: &str,
    kind_override: Option<MediaKind>,
) -> Option<MediaKind> {
    match value.get("media_type").and_then(|v| v.as_str()) {
        Some(tag) => MediaKind::from_api(tag),
        None => Some(kind_override.unwrap_or_else(|| MediaKind::infer_from_path(path))),
    }
}

/// Normalize a listing response into display records.
pub fn ingest_listing(
    response: ListingResponse,
    path: &str,
    kind_override: Option<MediaKind>,
) -> Result<Page<MediaItem>> {
    let mut results = Vec::with_capacity(response.results.len());
    for value in response.results {
        let Some(kind) = resolve_kind(&value, path, kind_override) else {
            tracing::debug!("Skipping non-media result from {}", path);
            continue;
        };
        results.push(MediaRecord::from_value(value, kind)?.into_item());
    }

    Ok(Page {
        page: response.page,
        total_pages: response.total_pages,
        results,
    })
}

/// Movie details.
#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub runtime: Option<u32>,
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// TV show details.
#[derive(Debug, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl From<MovieDetails> for DetailedMediaItem {
    fn from(d: MovieDetails) -> Self {
        DetailedMediaItem {
            item: MediaItem {
                id: d.id,
                kind: MediaKind::Movie,
                title: d.title,
                year: year_from_date(d.release_date.as_deref()),
                poster_path: d.poster_path,
                genre_ids: d.genres.iter().map(|g| g.id).collect(),
                overview: d.overview,
                vote_average: d.vote_average,
            },
            tagline: d.tagline.filter(|t| !t.is_empty()),
            runtime: d.runtime.filter(|r| *r > 0),
            genres: d.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

impl From<TvDetails> for DetailedMediaItem {
    fn from(d: TvDetails) -> Self {
        DetailedMediaItem {
            item: MediaItem {
                id: d.id,
                kind: MediaKind::Tv,
                title: d.name,
                year: year_from_date(d.first_air_date.as_deref()),
                poster_path: d.poster_path,
                genre_ids: d.genres.iter().map(|g| g.id).collect(),
                overview: d.overview,
                vote_average: d.vote_average,
            },
            tagline: d.tagline.filter(|t| !t.is_empty()),
            runtime: d.episode_run_time.first().copied().filter(|r| *r > 0),
            genres: d.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

/// Video list response.
#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Genre list response.
#[derive(Debug, Deserialize)]
pub struct GenresResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new TMDB client from settings.
    pub fn from_settings(settings: &TmdbSettings) -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_settings(settings)?))
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with the api_key parameter (v3 style only), language and extra parameters.
    pub fn build_url(&self, path: &str, extra_params: &[(&str, String)]) -> String {
        let mut params = Vec::new();
        if !self.config.use_bearer {
            params.push(format!("api_key={}", self.config.api_key));
        }
        if let Some(ref language) = self.config.language {
            params.push(format!("language={}", urlencoding::encode(language)));
        }
        for (name, value) in extra_params {
            params.push(format!("{}={}", name, urlencoding::encode(value)));
        }

        if params.is_empty() {
            format!("{}/{}", self.config.base_url, path)
        } else {
            format!("{}/{}?{}", self.config.base_url, path, params.join("&"))
        }
    }

    /// GET `path` and decode the JSON body. Non-success statuses are errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(path, extra_params);
        tracing::debug!("GET {} {:?}", path, extra_params);

        let resp = self.build_request(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }
        Ok(resp.json().await?)
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = self.build_url("authentication", &[]);
        match self.build_request(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[async_trait]
impl MetadataApi for TmdbClient {
    async fn listing(
        &self,
        path: &str,
        page: u32,
        query: Option<&str>,
        kind_override: Option<MediaKind>,
    ) -> Result<Page<MediaItem>> {
        let mut params = vec![("page", page.to_string())];
        if let Some(query) = query {
            params.push(("query", query.to_string()));
        }

        let resp: ListingResponse = self.get_json(path, &params).await?;
        ingest_listing(resp, path, kind_override)
    }

    async fn genres(&self) -> Result<GenreMap> {
        let (movie, tv) = futures::try_join!(
            self.get_json::<GenresResponse>("genre/movie/list", &[]),
            self.get_json::<GenresResponse>("genre/tv/list", &[]),
        )?;

        let mut map = GenreMap::from_genres(movie.genres);
        map.merge(GenreMap::from_genres(tv.genres));
        Ok(map)
    }

    async fn details(&self, kind: MediaKind, id: u64) -> Result<DetailedMediaItem> {
        let path = format!("{}/{}", kind.as_str(), id);
        Ok(match kind {
            MediaKind::Movie => self.get_json::<MovieDetails>(&path, &[]).await?.into(),
            MediaKind::Tv => self.get_json::<TvDetails>(&path, &[]).await?.into(),
        })
    }

    async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>> {
        let path = format!("{}/{}/videos", kind.as_str(), id);
        let resp: VideosResponse = self.get_json(&path, &[]).await?;
        Ok(resp.results)
    }
}

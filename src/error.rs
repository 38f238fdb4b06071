//! Error types for the media explorer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media explorer.
#[derive(Error, Debug)]
pub enum Error {
    // Credential errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY or [tmdb] api_key in config.toml")]
    TmdbApiKeyMissing,

    #[error("Gemini API key not configured. Set GEMINI_API_KEY or [gemini] api_key in config.toml")]
    GeminiApiKeyMissing,

    // Remote API errors
    #[error("HTTP error! status: {status} ({endpoint})")]
    HttpStatus { status: u16, endpoint: String },

    #[error("Unexpected response from {0}")]
    UnexpectedResponse(String),

    // Input errors
    #[error("Invalid media kind: {0} (expected movie or tv)")]
    InvalidMediaKind(String),

    #[error("Unknown streaming provider: {0}")]
    UnknownProvider(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors. Stored without the request URL, which carries API keys.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e.without_url())
    }
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}

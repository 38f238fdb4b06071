//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbSettings,
    /// Gemini configuration.
    pub gemini: GeminiSettings,
    /// Explorer behaviour.
    pub explorer: ExplorerSettings,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    /// API key (v3) or bearer token (v4).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Language for responses. Omitted from requests when unset.
    pub language: Option<String>,
}

/// Gemini configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API key.
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
}

/// Explorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    /// Search input quiet window in milliseconds.
    pub debounce_ms: u64,
    /// Streaming provider selected when a detail view opens.
    pub default_provider: String,
    /// Directory holding persisted state (favorites).
    pub data_dir: Option<PathBuf>,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            language: None,
        }
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
        }
    }
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            default_provider: "vidsrc.cc".to_string(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Directory for persisted state.
    pub fn data_dir(&self) -> PathBuf {
        self.explorer.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("media_explorer")
        })
    }

    /// Apply `TMDB_API_KEY` / `GEMINI_API_KEY` overrides.
    pub fn apply_env(&mut self) {
        if let Some(key) = non_empty_env("TMDB_API_KEY") {
            self.tmdb.api_key = Some(key);
        }
        if let Some(key) = non_empty_env("GEMINI_API_KEY") {
            self.gemini.api_key = Some(key);
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_explorer")
}

/// Parse a configuration file.
pub fn parse_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from `path` (or the default location) plus environment.
///
/// A missing file yields defaults; a malformed one is logged and replaced by defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs_config_path().join("config.toml"));

    let mut config = if config_path.exists() {
        match parse_config(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", config_path.display(), e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    config.apply_env();
    config
}

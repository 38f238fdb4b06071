//! CLI command implementations.

pub mod browse;
pub mod details;
pub mod explore;
pub mod favorites;

use crate::core::controller::{Controller, Message, Request};
use crate::core::embed::StreamingProvider;
use crate::core::favorites::FavoritesStore;
use crate::models::config::Config;
use crate::services::gemini::{GeminiClient, Recommender};
use crate::services::tmdb::{MetadataApi, TmdbClient};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

/// Build a controller wired to TMDB, Gemini (when configured) and the favorites file.
pub fn build_controller(config: &Config) -> crate::Result<Controller> {
    let api: Arc<dyn MetadataApi> = Arc::new(TmdbClient::from_settings(&config.tmdb)?);

    let recommender: Option<Arc<dyn Recommender>> =
        match GeminiClient::from_settings(&config.gemini) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::debug!("Recommendations disabled: {}", e);
                None
            }
        };

    let favorites = FavoritesStore::open_in(&config.data_dir());

    Ok(Controller::new(api, recommender, favorites)
        .with_debounce(Duration::from_millis(config.explorer.debounce_ms))
        .with_provider(default_provider(config)))
}

/// Configured default provider, falling back to the built-in default.
pub fn default_provider(config: &Config) -> StreamingProvider {
    match config.explorer.default_provider.parse() {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!("{}; using {}", e, StreamingProvider::default());
            StreamingProvider::default()
        }
    }
}

/// Dispatch `message` behind a spinner.
pub async fn dispatch_with_spinner(controller: &mut Controller, message: Message, label: &str) {
    let requests = controller.update(message);
    run_with_spinner(controller, requests, label).await;
}

/// Run `requests` behind a spinner.
pub async fn run_with_spinner(controller: &mut Controller, requests: Vec<Request>, label: &str) {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    controller.run(requests).await;

    pb.finish_and_clear();
}

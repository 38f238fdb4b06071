//! Detail view for a single title.

use super::{build_controller, run_with_spinner};
use crate::cli::render;
use crate::core::controller::Message;
use crate::core::embed::StreamingProvider;
use crate::models::config::Config;
use crate::models::media::{MediaItem, MediaKind};
use anyhow::Result;

/// Summary record for a title known only by kind and id.
pub fn stub_item(kind: MediaKind, id: u64) -> MediaItem {
    MediaItem {
        id,
        kind,
        title: String::new(),
        year: "N/A".to_string(),
        poster_path: None,
        genre_ids: Vec::new(),
        overview: None,
        vote_average: None,
    }
}

/// Show details, trailers and the streaming embed for one title.
pub async fn show(
    config: &Config,
    kind: MediaKind,
    id: u64,
    provider: Option<StreamingProvider>,
    recommend: bool,
) -> Result<()> {
    let mut controller = build_controller(config)?;

    let mut requests = controller.update(Message::GenresRequested);
    requests.extend(controller.update(Message::ItemSelected(stub_item(kind, id))));
    run_with_spinner(&mut controller, requests, "Loading details and trailers...").await;

    if let Some(provider) = provider {
        controller.update(Message::ProviderSelected(provider));
    }

    if recommend {
        let requests = controller.update(Message::RecommendationsRequested);
        run_with_spinner(&mut controller, requests, "Generating recommendations...").await;
    }

    let state = controller.state();
    if let Some(ref detail) = state.detail {
        let is_favorite = state.favorites.contains(id, kind);
        render::print_detail(detail, &state.genres, is_favorite);
    }
    Ok(())
}

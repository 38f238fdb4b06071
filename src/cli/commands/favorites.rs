//! Favorites commands.

use super::details::stub_item;
use super::{build_controller, run_with_spinner};
use crate::cli::render;
use crate::core::controller::Message;
use crate::core::favorites::FavoritesStore;
use crate::core::state::{AppState, View};
use crate::models::config::Config;
use crate::models::media::MediaKind;
use anyhow::Result;
use colored::Colorize;

/// List persisted favorites. No network access.
pub fn list(config: &Config) -> Result<()> {
    let mut state = AppState::new(FavoritesStore::open_in(&config.data_dir()));
    state.view = View::Favorites;
    render::print_view(&state);
    Ok(())
}

/// Add a title to favorites, or remove it if already present.
///
/// Adding fetches the title's details so the stored snapshot has a display title.
pub async fn toggle(config: &Config, kind: MediaKind, id: u64) -> Result<()> {
    let mut controller = build_controller(config)?;

    let existing = controller
        .state()
        .favorites
        .entries()
        .iter()
        .find(|e| e.id == id && e.kind == kind)
        .cloned();

    let item = match existing {
        Some(item) => item,
        None => {
            let requests = controller.update(Message::ItemSelected(stub_item(kind, id)));
            run_with_spinner(&mut controller, requests, "Loading details...").await;

            match controller.state().detail {
                Some(ref detail) if detail.detail.is_some() => detail.display().clone(),
                _ => anyhow::bail!("Could not load {} {} from TMDB", kind.noun(), id),
            }
        }
    };

    let title = item.title.clone();
    controller.update(Message::FavoriteToggled(item));

    if controller.state().favorites.contains(id, kind) {
        println!("{} {}", "Added to favorites:".green(), title.bold());
    } else {
        println!("{} {}", "Removed from favorites:".yellow(), title.bold());
    }
    Ok(())
}

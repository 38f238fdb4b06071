//! Home and search listings.

use super::{build_controller, dispatch_with_spinner, run_with_spinner};
use crate::cli::render;
use crate::core::controller::Message;
use crate::models::config::Config;
use anyhow::Result;
use tokio::time::Instant;

/// Show the home view at `page` of the popular list.
pub async fn home(config: &Config, page: u32) -> Result<()> {
    let mut controller = build_controller(config)?;

    dispatch_with_spinner(&mut controller, Message::Started, "Loading titles...").await;
    if page > 1 {
        dispatch_with_spinner(&mut controller, Message::PageRequested(page), "Loading page...").await;
    }

    render::print_view(controller.state());
    Ok(())
}

/// Search movies and TV shows for `query`.
pub async fn search(config: &Config, query: &str, page: u32) -> Result<()> {
    let mut controller = build_controller(config)?;

    // Submitting commits the query immediately, no debounce wait.
    let mut requests = controller.update(Message::QueryChanged {
        text: query.to_string(),
        at: Instant::now(),
    });
    requests.extend(controller.update(Message::GenresRequested));
    requests.extend(controller.update(Message::SearchSubmitted));
    run_with_spinner(&mut controller, requests, "Searching...").await;

    if page > 1 {
        dispatch_with_spinner(&mut controller, Message::PageRequested(page), "Loading page...").await;
    }

    render::print_view(controller.state());
    Ok(())
}

//! Text rendering of explorer state.

use crate::core::state::{AppState, DetailState, SectionKind, View};
use crate::models::media::{rating_display, GenreMap, MediaItem};
use colored::Colorize;

/// Print the current view.
pub fn print_view(state: &AppState) {
    print_error(state);

    match state.view {
        View::Favorites => print_favorites(state),
        View::Home => {
            let mut index = 1;
            for kind in state.visible_sections() {
                let title = match kind {
                    SectionKind::Popular => state.listing_title(),
                    other => other.label().to_string(),
                };
                let section = state.sections.get(kind);
                print_heading(&title);
                if section.loading {
                    println!("  {}", "Loading...".dimmed());
                } else if section.items.is_empty() {
                    println!("  {}", "No titles found. Try a different search term!".yellow());
                } else {
                    print_items(&section.items, index, state);
                }
                index += section.items.len();

                if kind == SectionKind::Popular {
                    print_pagination(state);
                }
                println!();
            }
        }
    }
}

/// Print the error banner, if any.
pub fn print_error(state: &AppState) {
    if let Some(ref error) = state.error {
        println!("{} {}", "[ERROR]".red().bold(), error.red());
        println!();
    }
}

/// Print the favorites list.
pub fn print_favorites(state: &AppState) {
    print_heading(&format!("Your Favorites ({})", state.favorites.len()));
    if state.favorites.is_empty() {
        println!("  {}", "No favorites yet.".yellow());
    } else {
        print_items(state.favorites.entries(), 1, state);
    }
    println!();
}

fn print_heading(title: &str) {
    println!("{}", title.bold().cyan());
    println!("{}", "-".repeat(80));
}

fn print_pagination(state: &AppState) {
    let pagination = state.pagination;
    if pagination.has_controls() {
        println!(
            "  {} Page {} of {} {}",
            if pagination.has_previous() { "<" } else { " " },
            pagination.page(),
            pagination.total_pages(),
            if pagination.has_next() { ">" } else { " " },
        );
    }
}

fn print_items(items: &[MediaItem], first_index: usize, state: &AppState) {
    for (i, item) in items.iter().enumerate() {
        let title = if item.title.chars().count() > 38 {
            format!("{}...", item.title.chars().take(35).collect::<String>())
        } else {
            item.title.clone()
        };
        let marker = if state.favorites.is_favorite(item) {
            "♥".red().to_string()
        } else {
            " ".to_string()
        };

        println!(
            " {:>4} {} | {:>4} | {:<40} | {:<5} | {}",
            first_index + i,
            marker,
            item.year,
            title,
            item.kind.as_str(),
            state.genres.describe(&item.genre_ids)
        );
    }
}

/// Print an open detail view.
pub fn print_detail(detail: &DetailState, genres: &GenreMap, is_favorite: bool) {
    if detail.loading {
        println!("{}", "Loading details and trailers...".dimmed());
        return;
    }

    let item = detail.display();
    println!(
        "{} ({}){}",
        item.title.bold(),
        item.year,
        if is_favorite { " ♥".red().to_string() } else { String::new() }
    );
    if let Some(ref notice) = detail.notice {
        println!("{}", notice.yellow());
    }
    if let Some(tagline) = detail.detail.as_ref().and_then(|d| d.tagline.as_deref()) {
        println!("\"{}\"", tagline.italic());
    }
    println!("  {} {}", "Genre:".bold(), detail.genre_names(genres));
    if let Some(runtime) = detail.detail.as_ref().and_then(|d| d.runtime) {
        println!("  {} {} minutes", "Runtime:".bold(), runtime);
    }
    println!("  {} {}", "TMDB Rating:".bold(), rating_display(item.vote_average));
    println!("  {} {}", "Poster:".bold(), item.poster_url());
    println!();
    println!(
        "{}",
        item.overview
            .as_deref()
            .filter(|o| !o.is_empty())
            .unwrap_or("No plot summary available.")
    );
    println!();

    println!("{} ({})", "Watch".bold().cyan(), detail.provider);
    println!("  {}", detail.embed_url);
    println!();

    println!("{}", "Trailers & Videos".bold().cyan());
    match detail.trailer_url() {
        Some(url) => {
            println!("  {}", url);
            if detail.trailers.len() > 1 {
                for (i, video) in detail.trailers.iter().enumerate() {
                    let playing = detail.playing.as_deref() == Some(video.key.as_str());
                    println!(
                        "  {:>2} {} {}",
                        i + 1,
                        if playing { ">" } else { " " },
                        video.name
                    );
                }
            }
        }
        None => println!("  {}", "No official trailers available.".dimmed()),
    }

    if detail.generating {
        println!();
        println!("{}", "Generating recommendations...".dimmed());
    } else if let Some(ref text) = detail.recommendations {
        println!();
        println!("{} {}", "Recommendations:".bold(), text);
    }
}

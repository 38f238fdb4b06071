//! Interactive explorer session.
//!
//! Plain text lines are search input and commit after the debounce quiet
//! window. Lines starting with `/` are commands. Requests run on spawned tasks
//! and their outcomes are applied as they arrive.

use super::build_controller;
use crate::cli::render;
use crate::core::controller::{Controller, Message, Outcome, Request};
use crate::core::embed::StreamingProvider;
use crate::core::state::{AppState, View};
use crate::models::config::Config;
use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Parsed input line.
#[derive(Debug)]
pub enum Action {
    Send(Message),
    Help,
    Quit,
}

/// Run the interactive session until `/quit` or end of input.
pub async fn run(config: &Config) -> Result<()> {
    let mut controller = build_controller(config)?;
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = 0usize;

    print_help();
    let requests = controller.update(Message::Started);
    in_flight += spawn_all(&controller, requests, &tx);

    loop {
        let deadline = controller.debounce_deadline();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line, controller.state(), Instant::now()) {
                    Ok(Action::Quit) => break,
                    Ok(Action::Help) => print_help(),
                    Ok(Action::Send(message)) => {
                        let requests = controller.update(message);
                        let spawned = spawn_all(&controller, requests, &tx);
                        in_flight += spawned;
                        if spawned == 0 && controller.debounce_deadline().is_none() {
                            render_state(controller.state());
                        }
                    }
                    Err(reason) => println!("{}", reason.yellow()),
                }
            }

            Some(outcome) = rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                controller.apply(outcome);
                if in_flight == 0 {
                    render_state(controller.state());
                }
            }

            _ = sleep_until(deadline) => {
                let requests = controller.update(Message::DebounceElapsed(Instant::now()));
                in_flight += spawn_all(&controller, requests, &tx);
            }
        }
    }

    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn spawn_all(
    controller: &Controller,
    requests: Vec<Request>,
    tx: &mpsc::UnboundedSender<Outcome>,
) -> usize {
    let count = requests.len();
    for request in requests {
        let task = controller.execute(request);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }
    count
}

fn render_state(state: &AppState) {
    println!();
    match state.detail {
        Some(ref detail) => {
            let is_favorite = state.favorites.is_favorite(&detail.summary);
            render::print_detail(detail, &state.genres, is_favorite);
        }
        None => render::print_view(state),
    }
}

fn print_help() {
    println!("{}", "Type to search (commits after a short pause). Commands:".bold());
    println!("  /go               search now");
    println!("  /clear            clear the search");
    println!("  /tab home|favorites");
    println!("  /page N, /next, /prev");
    println!("  /open N           open item N");
    println!("  /fav [N]          toggle favorite (open item when N is omitted)");
    println!("  /provider NAME    vidsrc.cc or player.videasy.net");
    println!("  /trailer N        play trailer N");
    println!("  /recommend        similar titles");
    println!("  /close            close the detail view");
    println!("  /help, /quit");
}

fn parse_index(arg: Option<&str>, what: &str) -> std::result::Result<usize, String> {
    arg.and_then(|a| a.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("Usage: /{} N", what))
}

/// Translate one input line into an action against the current state.
pub fn parse_line(line: &str, state: &AppState, now: Instant) -> std::result::Result<Action, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Action::Send(Message::QueryChanged {
            text: line.to_string(),
            at: now,
        }));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let message = match name {
        "quit" | "q" => return Ok(Action::Quit),
        "help" | "h" => return Ok(Action::Help),
        "go" => Message::SearchSubmitted,
        "clear" => Message::SearchCleared,
        "tab" => match arg {
            Some("home") => Message::TabSelected(View::Home),
            Some("favorites") | Some("fav") => Message::TabSelected(View::Favorites),
            _ => return Err("Usage: /tab home|favorites".to_string()),
        },
        "page" => {
            let page = arg
                .and_then(|a| a.parse::<u32>().ok())
                .ok_or_else(|| "Usage: /page N".to_string())?;
            Message::PageRequested(page)
        }
        "next" => Message::NextPage,
        "prev" => Message::PreviousPage,
        "open" => {
            let n = parse_index(arg, "open")?;
            let items = state.visible_items();
            let item = items
                .get(n - 1)
                .ok_or_else(|| format!("No item {}", n))?;
            Message::ItemSelected((*item).clone())
        }
        "fav" => match arg {
            Some(_) => {
                let n = parse_index(arg, "fav")?;
                let items = state.visible_items();
                let item = items
                    .get(n - 1)
                    .ok_or_else(|| format!("No item {}", n))?;
                Message::FavoriteToggled((*item).clone())
            }
            None => match state.detail {
                Some(ref detail) => Message::FavoriteToggled(detail.display().clone()),
                None => return Err("Usage: /fav N".to_string()),
            },
        },
        "provider" => {
            let provider: StreamingProvider = arg
                .ok_or_else(|| "Usage: /provider NAME".to_string())?
                .parse()
                .map_err(|e: crate::Error| e.to_string())?;
            Message::ProviderSelected(provider)
        }
        "trailer" => {
            let n = parse_index(arg, "trailer")?;
            let detail = state.detail.as_ref().ok_or("No title is open")?;
            let video = detail
                .trailers
                .get(n - 1)
                .ok_or_else(|| format!("No trailer {}", n))?;
            Message::TrailerSelected(video.key.clone())
        }
        "recommend" => Message::RecommendationsRequested,
        "close" => Message::DetailClosed,
        other => return Err(format!("Unknown command: /{} (try /help)", other)),
    };

    Ok(Action::Send(message))
}

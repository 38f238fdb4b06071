//! Command line argument definitions.

use crate::core::embed::StreamingProvider;
use crate::models::media::MediaKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Media Explorer - Browse movies and TV shows from TMDB
#[derive(Parser, Debug)]
#[command(name = "media-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Path to config.toml (default: <config dir>/media_explorer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show popular and trending movies and TV shows
    Home {
        /// Page of the popular movies list
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Search movies and TV shows
    Search {
        /// Search query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Page of the results
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show details, trailers and the streaming embed for one title
    Details {
        /// Media kind: movie or tv
        #[arg(value_name = "KIND", value_parser = parse_kind)]
        kind: MediaKind,

        /// TMDB ID
        #[arg(value_name = "ID")]
        id: u64,

        /// Streaming provider: vidsrc.cc or player.videasy.net
        #[arg(short, long, value_parser = parse_provider)]
        provider: Option<StreamingProvider>,

        /// Also ask for similar titles
        #[arg(long)]
        recommend: bool,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Interactive session with debounced search
    Explore,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List all favorites
    List,

    /// Add a title to favorites, or remove it if already there
    Toggle {
        /// Media kind: movie or tv
        #[arg(value_name = "KIND", value_parser = parse_kind)]
        kind: MediaKind,

        /// TMDB ID
        #[arg(value_name = "ID")]
        id: u64,
    },
}

fn parse_kind(s: &str) -> Result<MediaKind, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_provider(s: &str) -> Result<StreamingProvider, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

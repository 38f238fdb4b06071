//! Media Explorer Library
//!
//! Browse popular and trending movies and TV shows from TMDB, search across both,
//! keep a persisted favorites list, and resolve trailers and streaming embeds.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};

//! Remote API clients.

pub mod gemini;
pub mod tmdb;

//! Core explorer logic.

pub mod controller;
pub mod debounce;
pub mod embed;
pub mod favorites;
pub mod pagination;
pub mod recommend;
pub mod state;

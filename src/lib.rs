//! Browse-and-watch backend over a third-party media catalog.
//!
//! The interesting parts are the search controller in [`services::search`] and the
//! playback source resolver in [`services::playback`]; the rest is catalog plumbing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

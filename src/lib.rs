//! FlickHub API
//!
//! Movie discovery service over the TMDB catalog: paginated browsing
//! collections (popular, trending, upcoming, genre discovery, search),
//! per-movie detail enrichment, embed playback sources, and a durable
//! favorites store.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod loader;
pub mod models;
pub mod player;
pub mod storage;
pub mod util;

//! External playback sources
//!
//! The player view offers a fixed set of third-party embed servers; each
//! one hosts a movie under a URL derived from its TMDB id. The list and
//! URL shapes are part of the client contract, so they live here as data
//! rather than configuration.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EmbedSource {
    pub id: &'static str,
    pub name: &'static str,
    pub url: String,
}

const EMBED_SERVERS: &[(&str, &str, &str)] = &[
    ("server1", "Server 1", "https://smashystream.com/embed/"),
    ("server2", "Server 2", "https://www.2embed.cc/embed/"),
    ("server3", "Server 3", "https://autoembed.cc/movie/tmdb/"),
];

/// Embed URLs for a movie, one per server, in preference order
pub fn embed_sources(movie_id: u64) -> Vec<EmbedSource> {
    EMBED_SERVERS
        .iter()
        .map(|(id, name, base)| EmbedSource {
            id,
            name,
            url: format!("{}{}", base, movie_id),
        })
        .collect()
}

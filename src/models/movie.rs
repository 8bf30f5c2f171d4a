use serde::{Deserialize, Serialize};

/// A movie summary as returned by every TMDB listing endpoint.
///
/// This is also the exact shape persisted by the favorites store, so the
/// struct round-trips through serde_json without loss.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB movie identifier
    pub id: u64,
    /// Title, falling back to the `name` field TMDB uses for non-movie records
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    /// Relative poster path, e.g. `/q719jXXEzOoYaps6babgKnONONX.jpg`
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Average vote on the 0-10 scale; TMDB omits it for unrated records
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    /// ISO date string; may be absent or empty for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Movie {
    /// Title for display purposes, tolerating records without one
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// One batch of results plus pagination metadata, as returned by the
/// TMDB list endpoints (`page`/`results`/`total_pages`/`total_results`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn default_page() -> u32 {
    1
}

/// A TMDB genre entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Response shape of `/genre/movie/list`
#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

use serde::{Deserialize, Serialize};

use super::Genre;

/// Full movie record returned by `/movie/{id}`.
///
/// Carries the enrichment fields the summary lacks (runtime, financials,
/// resolved genres). Held only for the duration of a detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes; 0 or absent when TMDB does not know it
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Budget in whole dollars; TMDB reports 0 for unknown
    #[serde(default)]
    pub budget: u64,
    /// Revenue in whole dollars; TMDB reports 0 for unknown
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A cast entry from `/movie/{id}/credits`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Billing order; lower is more prominent
    #[serde(default)]
    pub order: u32,
}

/// Response shape of `/movie/{id}/credits`
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// A video entry from `/movie/{id}/videos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    /// The detail view only surfaces trailers
    pub fn is_trailer(&self) -> bool {
        self.video_type == "Trailer"
    }
}

/// Response shape of `/movie/{id}/videos`
#[derive(Debug, Clone, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

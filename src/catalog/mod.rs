//! Movie catalog abstraction
//!
//! The remote metadata source is behind a trait so the collection loader
//! and the HTTP surface can be exercised against a scripted catalog in
//! tests. `TmdbClient` is the production implementation.

use crate::{
    error::AppResult,
    models::{CreditsResponse, Genre, MovieDetails, MoviePage, VideosResponse},
};

mod tmdb;

pub use tmdb::TmdbClient;

/// Trait for remote movie metadata sources
///
/// The five list operations return one page of summaries each; the detail
/// operations back the per-movie enrichment view. Implementations must
/// surface non-2xx upstream responses as errors carrying the HTTP status.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Popular movies, TMDB's default curated ordering
    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage>;

    /// Trending movies over the daily window
    async fn trending_movies(&self, page: u32) -> AppResult<MoviePage>;

    /// Upcoming theatrical releases
    async fn upcoming_movies(&self, page: u32) -> AppResult<MoviePage>;

    /// Discovery filtered by genre ids; an empty set means unfiltered
    async fn discover_movies(&self, genres: &[u64], page: u32) -> AppResult<MoviePage>;

    /// Full-text search, relevance ordered
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<MoviePage>;

    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails>;

    async fn movie_credits(&self, id: u64) -> AppResult<CreditsResponse>;

    async fn movie_videos(&self, id: u64) -> AppResult<VideosResponse>;

    async fn movie_recommendations(&self, id: u64) -> AppResult<MoviePage>;

    /// The full genre list, fetched once and cached by the caller
    async fn movie_genres(&self) -> AppResult<Vec<Genre>>;
}

/// TMDB API provider
///
/// Backs every catalog operation with The Movie Database v3 REST API.
///
/// API Flow:
/// 1. Browse lists: /movie/popular, /trending/movie/day, /movie/upcoming
/// 2. Genre discovery: /discover/movie?with_genres=<ids>
/// 3. Search: /search/movie?query=<text>
/// 4. Enrichment: /movie/{id} plus /credits, /videos, /recommendations
///
/// Every request carries the configured api_key and language. A direct
/// rate limiter keeps sustained throughput inside TMDB's anonymous-key
/// allowance of roughly 40 requests per 10 seconds.
use crate::{
    catalog::MovieCatalog,
    error::{AppError, AppResult},
    models::{CreditsResponse, Genre, GenreListResponse, MovieDetails, MoviePage, VideosResponse},
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::num::NonZeroU32;

/// Sustained request budget, expressed per second
const REQUESTS_PER_SECOND: u32 = 4;

pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
    limiter: DefaultDirectRateLimiter,
}

impl TmdbClient {
    /// Creates a new TMDB client with its own HTTP pool and rate limiter
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        let per_second = NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN);

        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            language,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
        }
    }

    /// Performs a GET against a TMDB path and deserializes the JSON body
    ///
    /// Waits on the rate limiter before sending. Non-2xx responses are
    /// surfaced as errors carrying TMDB's status_message when one is
    /// present; a 404 maps to `AppError::NotFound`.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        self.limiter.until_ready().await;

        let url = format!("{}{}", self.api_url, path);
        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        for (key, value) in params {
            query.push((key, value.as_str()));
        }

        let response = self.http_client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            #[derive(Deserialize)]
            struct TmdbErrorBody {
                status_message: String,
            }

            let message = response
                .json::<TmdbErrorBody>()
                .await
                .map(|body| body.status_message)
                .unwrap_or_else(|_| "no error detail in response body".to_string());

            if status == StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(message));
            }
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, message
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Joins genre ids into TMDB's comma-separated with_genres value
fn join_genre_ids(genres: &[u64]) -> String {
    genres
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage> {
        self.fetch_json("/movie/popular", &[("page", page.to_string())])
            .await
    }

    async fn trending_movies(&self, page: u32) -> AppResult<MoviePage> {
        self.fetch_json("/trending/movie/day", &[("page", page.to_string())])
            .await
    }

    async fn upcoming_movies(&self, page: u32) -> AppResult<MoviePage> {
        self.fetch_json("/movie/upcoming", &[("page", page.to_string())])
            .await
    }

    async fn discover_movies(&self, genres: &[u64], page: u32) -> AppResult<MoviePage> {
        let mut params = vec![("page", page.to_string())];
        if !genres.is_empty() {
            params.push(("with_genres", join_genre_ids(genres)));
        }

        let page: MoviePage = self.fetch_json("/discover/movie", &params).await?;

        tracing::info!(
            genres = genres.len(),
            results = page.results.len(),
            provider = "tmdb",
            "Discovery page fetched"
        );

        Ok(page)
    }

    async fn search_movies(&self, query: &str, page: u32) -> AppResult<MoviePage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let results: MoviePage = self
            .fetch_json(
                "/search/movie",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;

        tracing::info!(
            query = %query,
            results = results.results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(results)
    }

    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails> {
        self.fetch_json(&format!("/movie/{}", id), &[]).await
    }

    async fn movie_credits(&self, id: u64) -> AppResult<CreditsResponse> {
        self.fetch_json(&format!("/movie/{}/credits", id), &[])
            .await
    }

    async fn movie_videos(&self, id: u64) -> AppResult<VideosResponse> {
        self.fetch_json(&format!("/movie/{}/videos", id), &[]).await
    }

    async fn movie_recommendations(&self, id: u64) -> AppResult<MoviePage> {
        self.fetch_json(&format!("/movie/{}/recommendations", id), &[])
            .await
    }

    async fn movie_genres(&self) -> AppResult<Vec<Genre>> {
        let list: GenreListResponse = self.fetch_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_client() -> TmdbClient {
        TmdbClient::new(
            "test_key".to_string(),
            "http://test.local/3".to_string(),
            "en-US".to_string(),
        )
    }

    #[test]
    fn test_join_genre_ids_multiple() {
        assert_eq!(join_genre_ids(&[28, 12, 878]), "28,12,878");
    }

    #[test]
    fn test_join_genre_ids_single() {
        assert_eq!(join_genre_ids(&[35]), "35");
    }

    #[test]
    fn test_join_genre_ids_empty() {
        assert_eq!(join_genre_ids(&[]), "");
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let client = create_test_client();

        let result = client.search_movies("   ", 1).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}

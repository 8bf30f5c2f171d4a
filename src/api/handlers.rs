use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    loader::{CollectionKind, CollectionLoader, LoaderSnapshot},
    models::{CastMember, Genre, Movie, MovieDetails, Video},
    player::{embed_sources, EmbedSource},
    util,
};

use super::AppState;

/// Cast entries surfaced on the detail view, by billing order
const CAST_LIMIT: usize = 12;
/// Recommendations surfaced on the detail view
const RECOMMENDATION_LIMIT: usize = 6;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub genre: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub results: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<LoaderSnapshot> for CollectionResponse {
    fn from(snapshot: LoaderSnapshot) -> Self {
        Self {
            results: snapshot.items,
            page: snapshot.page,
            total_pages: snapshot.total_pages,
            has_more: snapshot.has_more,
            loading: snapshot.loading,
            error: snapshot.error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CastMemberResponse {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

impl From<CastMember> for CastMemberResponse {
    fn from(member: CastMember) -> Self {
        let profile_url = util::profile_url(member.profile_path.as_deref());
        Self {
            id: member.id,
            name: member.name,
            character: member.character,
            profile_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    pub movie: MovieDetails,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_year: Option<i32>,
    pub runtime_display: Option<String>,
    pub budget_display: Option<String>,
    pub revenue_display: Option<String>,
    pub cast: Vec<CastMemberResponse>,
    pub trailers: Vec<Video>,
    pub recommendations: Vec<Movie>,
    pub favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub id: u64,
    pub sources: Vec<EmbedSource>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteStatusResponse {
    pub id: u64,
    pub favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub id: u64,
    pub favorite: bool,
    pub ok: bool,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

async fn collection_response(loader: &CollectionLoader) -> Json<CollectionResponse> {
    Json(loader.snapshot().await.into())
}

/// Home collection: genre discovery, optionally filtered
///
/// Changing the genre parameter switches the loader's kind, which resets
/// and reloads; repeating the same parameter serves the loaded state.
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<HomeQuery>,
) -> Json<CollectionResponse> {
    let genres = params.genre.map(|id| vec![id]).unwrap_or_default();
    state
        .home
        .set_kind(CollectionKind::GenreDiscovery { genres })
        .await;
    collection_response(&state.home).await
}

pub async fn home_more(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.home.load_more().await;
    collection_response(&state.home).await
}

pub async fn home_refresh(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.home.refresh().await;
    collection_response(&state.home).await
}

pub async fn popular(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.popular.ensure_loaded().await;
    collection_response(&state.popular).await
}

pub async fn popular_more(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.popular.load_more().await;
    collection_response(&state.popular).await
}

pub async fn popular_refresh(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.popular.refresh().await;
    collection_response(&state.popular).await
}

pub async fn trending(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.trending.ensure_loaded().await;
    collection_response(&state.trending).await
}

pub async fn trending_more(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.trending.load_more().await;
    collection_response(&state.trending).await
}

pub async fn trending_refresh(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.trending.refresh().await;
    collection_response(&state.trending).await
}

pub async fn upcoming(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.upcoming.ensure_loaded().await;
    collection_response(&state.upcoming).await
}

pub async fn upcoming_more(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.upcoming.load_more().await;
    collection_response(&state.upcoming).await
}

pub async fn upcoming_refresh(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.upcoming.refresh().await;
    collection_response(&state.upcoming).await
}

/// Search collection
///
/// A blank query resolves to an empty collection without a remote call.
/// Repeating the current query serves the loaded state; a new query
/// resets and fetches page 1.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<CollectionResponse> {
    state
        .search
        .set_kind(CollectionKind::Search { query: params.q })
        .await;
    collection_response(&state.search).await
}

pub async fn search_more(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.search.load_more().await;
    collection_response(&state.search).await
}

pub async fn search_refresh(State(state): State<AppState>) -> Json<CollectionResponse> {
    state.search.refresh().await;
    collection_response(&state.search).await
}

/// Full detail view for one movie
///
/// Fetches the record, credits, videos, and recommendations concurrently;
/// the view needs all four, so any failure fails the request.
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<MovieDetailResponse>> {
    let (details, credits, videos, recommendations) = tokio::join!(
        state.catalog.movie_details(id),
        state.catalog.movie_credits(id),
        state.catalog.movie_videos(id),
        state.catalog.movie_recommendations(id),
    );

    let movie = details?;
    let credits = credits?;
    let videos = videos?;
    let recommendations = recommendations?;

    let cast: Vec<CastMemberResponse> = credits
        .cast
        .into_iter()
        .take(CAST_LIMIT)
        .map(CastMemberResponse::from)
        .collect();

    let trailers: Vec<Video> = videos
        .results
        .into_iter()
        .filter(Video::is_trailer)
        .collect();

    let recommendations: Vec<Movie> = recommendations
        .results
        .into_iter()
        .take(RECOMMENDATION_LIMIT)
        .collect();

    let favorite = state.favorites.is_favorite(id).await;

    Ok(Json(MovieDetailResponse {
        poster_url: util::poster_url(movie.poster_path.as_deref()),
        backdrop_url: util::backdrop_url(movie.backdrop_path.as_deref()),
        release_year: util::release_year(movie.release_date.as_deref()),
        runtime_display: util::format_runtime(movie.runtime),
        budget_display: util::format_money(movie.budget),
        revenue_display: util::format_money(movie.revenue),
        movie,
        cast,
        trailers,
        recommendations,
        favorite,
    }))
}

/// Embed sources for the player view
pub async fn movie_player(Path(id): Path<u64>) -> Json<PlayerResponse> {
    Json(PlayerResponse {
        id,
        sources: embed_sources(id),
    })
}

/// The cached genre list
pub async fn genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.genres().await?))
}

/// Current favorites, rescanned so writes from other instances show up
pub async fn favorites(State(state): State<AppState>) -> Json<Vec<Movie>> {
    state.favorites.refresh().await;
    Json(state.favorites.favorites().await)
}

/// Whether one movie is currently favorited
pub async fn favorite_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<FavoriteStatusResponse> {
    let favorite = state.favorites.is_favorite(id).await;
    Json(FavoriteStatusResponse { id, favorite })
}

/// Toggles a favorite record
///
/// Storage failures surface as `ok: false` with the membership state
/// left as it was, never as an error status.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> Json<ToggleFavoriteResponse> {
    let id = movie.id;
    let ok = state.favorites.toggle_favorite(&movie).await;
    let favorite = state.favorites.is_favorite(id).await;
    Json(ToggleFavoriteResponse { id, favorite, ok })
}

/// Removes one favorite record; removing an absent id succeeds
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<StatusCode> {
    if state.favorites.remove_favorite(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Internal(format!("Failed to remove favorite {}", id)))
    }
}

/// Removes every favorite record
pub async fn clear_favorites(State(state): State<AppState>) -> AppResult<StatusCode> {
    if state.favorites.clear_all().await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Internal(
            "Failed to clear all favorites".to_string(),
        ))
    }
}

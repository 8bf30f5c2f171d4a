use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Browsing collections
        .route("/api/home", get(handlers::home))
        .route("/api/home/more", post(handlers::home_more))
        .route("/api/home/refresh", post(handlers::home_refresh))
        .route("/api/popular", get(handlers::popular))
        .route("/api/popular/more", post(handlers::popular_more))
        .route("/api/popular/refresh", post(handlers::popular_refresh))
        .route("/api/trending", get(handlers::trending))
        .route("/api/trending/more", post(handlers::trending_more))
        .route("/api/trending/refresh", post(handlers::trending_refresh))
        .route("/api/upcoming", get(handlers::upcoming))
        .route("/api/upcoming/more", post(handlers::upcoming_more))
        .route("/api/upcoming/refresh", post(handlers::upcoming_refresh))
        // Search
        .route("/api/search", get(handlers::search))
        .route("/api/search/more", post(handlers::search_more))
        .route("/api/search/refresh", post(handlers::search_refresh))
        // Movie detail and playback
        .route("/api/movie/:id", get(handlers::movie_detail))
        .route("/api/movie/:id/player", get(handlers::movie_player))
        .route("/api/genres", get(handlers::genres))
        // Favorites
        .route(
            "/api/favorites",
            get(handlers::favorites).delete(handlers::clear_favorites),
        )
        .route("/api/favorites/toggle", post(handlers::toggle_favorite))
        .route(
            "/api/favorites/:id",
            get(handlers::favorite_status).delete(handlers::remove_favorite),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

use std::sync::Arc;

use flickhub::{
    api::{create_router, AppState},
    catalog::TmdbClient,
    config::Config,
    favorites::FavoritesStore,
    storage::{create_redis_client, RedisStorage},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flickhub=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Arc::new(TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.language.clone(),
    ));

    let redis_client = create_redis_client(&config.redis_url)?;
    let favorites = FavoritesStore::open(Arc::new(RedisStorage::new(redis_client))).await;

    let state = AppState::new(catalog, favorites);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "FlickHub API listening");
    axum::serve(listener, app).await?;

    Ok(())
}

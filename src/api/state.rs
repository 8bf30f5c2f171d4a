use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{
    catalog::MovieCatalog,
    error::AppResult,
    favorites::FavoritesStore,
    loader::{CollectionKind, CollectionLoader},
    models::Genre,
};

/// Shared application state
///
/// One loader per browsing surface, all fed by the same catalog handle.
/// The home loader runs genre discovery and switches kinds when a filter
/// is applied; the search loader tracks the latest query. Clones share
/// the underlying state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn MovieCatalog>,
    pub favorites: FavoritesStore,
    pub home: CollectionLoader,
    pub popular: CollectionLoader,
    pub trending: CollectionLoader,
    pub upcoming: CollectionLoader,
    pub search: CollectionLoader,
    genres: Arc<OnceCell<Vec<Genre>>>,
}

impl AppState {
    /// Creates application state over a catalog and an opened favorites store
    pub fn new(catalog: Arc<dyn MovieCatalog>, favorites: FavoritesStore) -> Self {
        Self {
            home: CollectionLoader::new(
                Arc::clone(&catalog),
                CollectionKind::GenreDiscovery { genres: Vec::new() },
            ),
            popular: CollectionLoader::new(Arc::clone(&catalog), CollectionKind::Popular),
            trending: CollectionLoader::new(Arc::clone(&catalog), CollectionKind::Trending),
            upcoming: CollectionLoader::new(Arc::clone(&catalog), CollectionKind::Upcoming),
            search: CollectionLoader::new(
                Arc::clone(&catalog),
                CollectionKind::Search {
                    query: String::new(),
                },
            ),
            genres: Arc::new(OnceCell::new()),
            catalog,
            favorites,
        }
    }

    /// The genre list, fetched from the catalog once and cached for the
    /// life of the process
    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        let genres = self
            .genres
            .get_or_try_init(|| async { self.catalog.movie_genres().await })
            .await?;
        Ok(genres.clone())
    }
}

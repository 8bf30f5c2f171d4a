use crate::{catalog::MovieCatalog, error::AppResult, models::MoviePage};

/// Identifies which remote collection a loader tracks
///
/// Parameterized kinds compare by value, so two discovery kinds with the
/// same genre set are interchangeable. The loader relies on that equality
/// to decide whether switching kinds requires a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionKind {
    Popular,
    Trending,
    Upcoming,
    GenreDiscovery { genres: Vec<u64> },
    Search { query: String },
}

impl CollectionKind {
    /// Short label for log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Trending => "trending",
            Self::Upcoming => "upcoming",
            Self::GenreDiscovery { .. } => "discover",
            Self::Search { .. } => "search",
        }
    }

    /// Whether this kind has anything to fetch
    ///
    /// A search over a blank query resolves to an empty collection
    /// without touching the catalog.
    pub fn wants_fetch(&self) -> bool {
        match self {
            Self::Search { query } => !query.trim().is_empty(),
            _ => true,
        }
    }

    /// Fetches one page of this collection from the catalog
    pub async fn fetch_page(&self, catalog: &dyn MovieCatalog, page: u32) -> AppResult<MoviePage> {
        match self {
            Self::Popular => catalog.popular_movies(page).await,
            Self::Trending => catalog.trending_movies(page).await,
            Self::Upcoming => catalog.upcoming_movies(page).await,
            Self::GenreDiscovery { genres } => catalog.discover_movies(genres, page).await,
            Self::Search { query } => catalog.search_movies(query, page).await,
        }
    }
}

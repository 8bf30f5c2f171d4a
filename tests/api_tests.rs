use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum_test::TestServer;
use serde_json::json;

use flickhub::{
    api::{create_router, AppState},
    catalog::MovieCatalog,
    error::{AppError, AppResult},
    favorites::FavoritesStore,
    models::{CastMember, CreditsResponse, Genre, Movie, MovieDetails, MoviePage, Video, VideosResponse},
    storage::MemoryStorage,
};

const PAGE_SIZE: u64 = 3;
const TOTAL_PAGES: u32 = 2;
const KNOWN_MOVIE_ID: u64 = 603;

/// Deterministic catalog backing the HTTP tests
///
/// List methods serve two pages of three movies each, with ids unique to
/// the collection and page so tests can tell exactly which fetch produced
/// a result. Call counters cover the methods whose fetch behavior the
/// tests assert on.
struct FakeCatalog {
    popular_calls: AtomicUsize,
    discover_calls: AtomicUsize,
    search_calls: AtomicUsize,
    genres_calls: AtomicUsize,
}

impl FakeCatalog {
    fn new() -> Self {
        Self {
            popular_calls: AtomicUsize::new(0),
            discover_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            genres_calls: AtomicUsize::new(0),
        }
    }

    fn page_of(&self, base: u64, page: u32) -> MoviePage {
        let results = (0..PAGE_SIZE)
            .map(|i| {
                let id = base + u64::from(page) * 10 + i;
                summary(id, &format!("Movie {}", id))
            })
            .collect();

        MoviePage {
            page,
            results,
            total_pages: TOTAL_PAGES,
            total_results: u64::from(TOTAL_PAGES) * PAGE_SIZE,
        }
    }
}

fn summary(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: Some(title.to_string()),
        overview: Some("A test synopsis.".to_string()),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        backdrop_path: None,
        vote_average: 7.5,
        vote_count: 1200,
        release_date: Some("2010-07-16".to_string()),
    }
}

#[async_trait::async_trait]
impl MovieCatalog for FakeCatalog {
    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage> {
        self.popular_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.page_of(1000, page))
    }

    async fn trending_movies(&self, page: u32) -> AppResult<MoviePage> {
        Ok(self.page_of(2000, page))
    }

    async fn upcoming_movies(&self, page: u32) -> AppResult<MoviePage> {
        Ok(self.page_of(3000, page))
    }

    async fn discover_movies(&self, genres: &[u64], page: u32) -> AppResult<MoviePage> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        let base = 4000 + genres.iter().sum::<u64>() * 100;
        Ok(self.page_of(base, page))
    }

    async fn search_movies(&self, _query: &str, page: u32) -> AppResult<MoviePage> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.page_of(5000, page))
    }

    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails> {
        if id != KNOWN_MOVIE_ID {
            return Err(AppError::NotFound(
                "The resource you requested could not be found.".to_string(),
            ));
        }

        Ok(MovieDetails {
            id,
            title: Some("The Matrix".to_string()),
            tagline: Some("Welcome to the Real World.".to_string()),
            overview: Some("A computer hacker learns the truth.".to_string()),
            poster_path: Some("/matrix.jpg".to_string()),
            backdrop_path: Some("/matrix-backdrop.jpg".to_string()),
            vote_average: 8.2,
            vote_count: 26000,
            release_date: Some("1999-03-31".to_string()),
            runtime: Some(136),
            budget: 63_000_000,
            revenue: 463_517_383,
            genres: vec![
                Genre {
                    id: 28,
                    name: "Action".to_string(),
                },
                Genre {
                    id: 878,
                    name: "Science Fiction".to_string(),
                },
            ],
            homepage: None,
            original_language: Some("en".to_string()),
            status: Some("Released".to_string()),
        })
    }

    async fn movie_credits(&self, _id: u64) -> AppResult<CreditsResponse> {
        // More entries than the detail view surfaces, so the cap is visible.
        let cast = (0..14)
            .map(|i| CastMember {
                id: 9000 + i,
                name: format!("Actor {}", i),
                character: Some(format!("Character {}", i)),
                profile_path: Some(format!("/actor-{}.jpg", i)),
                order: i as u32,
            })
            .collect();
        Ok(CreditsResponse { cast })
    }

    async fn movie_videos(&self, _id: u64) -> AppResult<VideosResponse> {
        let results = vec![
            Video {
                id: "v1".to_string(),
                key: "dQw4w9WgXcQ".to_string(),
                name: "Official Trailer".to_string(),
                site: "YouTube".to_string(),
                video_type: "Trailer".to_string(),
                official: true,
            },
            Video {
                id: "v2".to_string(),
                key: "abcd1234".to_string(),
                name: "Behind the Scenes".to_string(),
                site: "YouTube".to_string(),
                video_type: "Featurette".to_string(),
                official: false,
            },
            Video {
                id: "v3".to_string(),
                key: "efgh5678".to_string(),
                name: "Teaser Trailer".to_string(),
                site: "YouTube".to_string(),
                video_type: "Trailer".to_string(),
                official: false,
            },
        ];
        Ok(VideosResponse { results })
    }

    async fn movie_recommendations(&self, _id: u64) -> AppResult<MoviePage> {
        // More entries than the detail view surfaces, so the cap is visible.
        let results = (0..8).map(|i| summary(7000 + i, &format!("Rec {}", i))).collect();
        Ok(MoviePage {
            page: 1,
            results,
            total_pages: 1,
            total_results: 8,
        })
    }

    async fn movie_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            Genre {
                id: 28,
                name: "Action".to_string(),
            },
            Genre {
                id: 35,
                name: "Comedy".to_string(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ])
    }
}

async fn create_test_server() -> (TestServer, Arc<FakeCatalog>) {
    let catalog = Arc::new(FakeCatalog::new());
    let favorites = FavoritesStore::open(Arc::new(MemoryStorage::new())).await;
    let state = AppState::new(Arc::clone(&catalog) as Arc<dyn MovieCatalog>, favorites);
    let app = create_router(state);
    (TestServer::new(app).unwrap(), catalog)
}

fn matrix_summary() -> serde_json::Value {
    json!({
        "id": KNOWN_MOVIE_ID,
        "title": "The Matrix",
        "overview": "A computer hacker learns the truth.",
        "poster_path": "/matrix.jpg",
        "backdrop_path": null,
        "vote_average": 8.2,
        "vote_count": 26000,
        "release_date": "1999-03-31"
    })
}

#[tokio::test]
async fn test_health_check() {
    let (server, _catalog) = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_popular_loads_first_page_once() {
    let (server, catalog) = create_test_server().await;

    let response = server.get("/api/popular").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["has_more"], true);
    assert_eq!(body["loading"], false);
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(body["results"][0]["id"], 1010);

    // A second request serves the already-loaded state.
    let response = server.get("/api/popular").await;
    response.assert_status_ok();
    assert_eq!(catalog.popular_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_load_more_appends_and_stops_at_last_page() {
    let (server, catalog) = create_test_server().await;

    server.get("/api/popular").await.assert_status_ok();

    let response = server.post("/api/popular/more").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["page"], 2);
    assert_eq!(body["has_more"], false);
    let ids: Vec<u64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1010, 1011, 1012, 1020, 1021, 1022]);

    // Past the last page the call is a no-op.
    let calls_before = catalog.popular_calls.load(Ordering::SeqCst);
    let response = server.post("/api/popular/more").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 6);
    assert_eq!(catalog.popular_calls.load(Ordering::SeqCst), calls_before);
}

#[tokio::test]
async fn test_refresh_resets_to_page_one() {
    let (server, _catalog) = create_test_server().await;

    server.get("/api/popular").await.assert_status_ok();
    server.post("/api/popular/more").await.assert_status_ok();

    let response = server.post("/api/popular/refresh").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(body["results"][0]["id"], 1010);
}

#[tokio::test]
async fn test_home_genre_filter_switches_collections() {
    let (server, catalog) = create_test_server().await;

    let response = server.get("/api/home").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"][0]["id"], 4010);
    assert_eq!(catalog.discover_calls.load(Ordering::SeqCst), 1);

    // New genre parameter: fresh session from page 1.
    let response = server.get("/api/home?genre=28").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["results"][0]["id"], 6810);
    assert_eq!(catalog.discover_calls.load(Ordering::SeqCst), 2);

    // Same genre again: no refetch.
    server.get("/api/home?genre=28").await.assert_status_ok();
    assert_eq!(catalog.discover_calls.load(Ordering::SeqCst), 2);

    // Dropping the filter is a parameter change too.
    let response = server.get("/api/home").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"][0]["id"], 4010);
    assert_eq!(catalog.discover_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_home_pagination_keeps_genre() {
    let (server, _catalog) = create_test_server().await;

    server.get("/api/home?genre=28").await.assert_status_ok();

    let response = server.post("/api/home/more").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["page"], 2);
    assert_eq!(body["results"][3]["id"], 6820);
}

#[tokio::test]
async fn test_search_blank_query_never_fetches() {
    let (server, catalog) = create_test_server().await;

    let response = server.get("/api/search").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
    assert_eq!(body["loading"], false);
    assert_eq!(body["has_more"], false);
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 0);

    let response = server.get("/api/search?q=%20%20").await;
    response.assert_status_ok();
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_search_query_with_pagination() {
    let (server, catalog) = create_test_server().await;

    let response = server.get("/api/search?q=matrix").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(body["results"][0]["id"], 5010);

    let response = server.post("/api/search/more").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 6);
    assert_eq!(body["page"], 2);

    // Re-issuing the same query keeps the loaded session.
    server.get("/api/search?q=matrix").await.assert_status_ok();
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_movie_detail_shape() {
    let (server, _catalog) = create_test_server().await;

    let response = server.get("/api/movie/603").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["movie"]["id"], 603);
    assert_eq!(body["movie"]["title"], "The Matrix");
    assert_eq!(
        body["poster_url"],
        "https://image.tmdb.org/t/p/w500/matrix.jpg"
    );
    assert_eq!(
        body["backdrop_url"],
        "https://image.tmdb.org/t/p/original/matrix-backdrop.jpg"
    );
    assert_eq!(body["release_year"], 1999);
    assert_eq!(body["runtime_display"], "2h 16m");
    assert_eq!(body["budget_display"], "$63,000,000");
    assert_eq!(body["favorite"], false);

    // Cast capped, trailers filtered, recommendations capped.
    assert_eq!(body["cast"].as_array().unwrap().len(), 12);
    assert_eq!(
        body["cast"][0]["profile_url"],
        "https://image.tmdb.org/t/p/w185/actor-0.jpg"
    );
    let trailers = body["trailers"].as_array().unwrap();
    assert_eq!(trailers.len(), 2);
    assert!(trailers.iter().all(|v| v["type"] == "Trailer"));
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_movie_detail_not_found() {
    let (server, _catalog) = create_test_server().await;

    let response = server.get("/api/movie/999999").await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("could not be found"));
}

#[tokio::test]
async fn test_player_sources() {
    let (server, _catalog) = create_test_server().await;

    let response = server.get("/api/movie/603/player").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["id"], 603);
    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 3);
    assert_eq!(sources[0]["url"], "https://smashystream.com/embed/603");
    assert_eq!(sources[1]["url"], "https://www.2embed.cc/embed/603");
    assert_eq!(sources[2]["url"], "https://autoembed.cc/movie/tmdb/603");
}

#[tokio::test]
async fn test_genres_fetched_once() {
    let (server, catalog) = create_test_server().await;

    let response = server.get("/api/genres").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["name"], "Action");

    server.get("/api/genres").await.assert_status_ok();
    assert_eq!(catalog.genres_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_favorites_toggle_round_trip() {
    let (server, _catalog) = create_test_server().await;

    let response = server.get("/api/favorites/603").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["favorite"], false);

    let response = server
        .post("/api/favorites/toggle")
        .json(&matrix_summary())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["favorite"], true);
    assert_eq!(body["ok"], true);

    let response = server.get("/api/favorites").await;
    response.assert_status_ok();
    let favorites: Vec<serde_json::Value> = response.json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["id"], 603);
    assert_eq!(favorites[0]["title"], "The Matrix");

    // The detail view reflects membership.
    let response = server.get("/api/movie/603").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["favorite"], true);

    let response = server
        .post("/api/favorites/toggle")
        .json(&matrix_summary())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["favorite"], false);

    let response = server.get("/api/favorites").await;
    let favorites: Vec<serde_json::Value> = response.json();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_remove_single_favorite() {
    let (server, _catalog) = create_test_server().await;

    server
        .post("/api/favorites/toggle")
        .json(&matrix_summary())
        .await
        .assert_status_ok();

    let response = server.delete("/api/favorites/603").await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let response = server.get("/api/favorites").await;
    let favorites: Vec<serde_json::Value> = response.json();
    assert!(favorites.is_empty());

    // Removing an already-absent favorite still succeeds.
    let response = server.delete("/api/favorites/603").await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_clear_favorites() {
    let (server, _catalog) = create_test_server().await;

    server
        .post("/api/favorites/toggle")
        .json(&matrix_summary())
        .await
        .assert_status_ok();
    server
        .post("/api/favorites/toggle")
        .json(&serde_json::to_value(summary(42, "Another Movie")).unwrap())
        .await
        .assert_status_ok();

    let response = server.get("/api/favorites").await;
    let favorites: Vec<serde_json::Value> = response.json();
    assert_eq!(favorites.len(), 2);

    let response = server.delete("/api/favorites").await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let response = server.get("/api/favorites").await;
    let favorites: Vec<serde_json::Value> = response.json();
    assert!(favorites.is_empty());
}

//! Favorites store
//!
//! Persists favorite movies in durable key-value storage, one serialized
//! record per movie keyed by its numeric id, and keeps an in-memory
//! snapshot for listing. The snapshot is rebuilt from a full storage scan
//! after every mutation instead of being patched in place, so it cannot
//! drift from what storage holds. Storage failures never escape this
//! boundary: mutations report success as a boolean and membership checks
//! fall back to false.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{models::Movie, storage::FavoriteStorage};

#[derive(Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn FavoriteStorage>,
    snapshot: Arc<RwLock<Vec<Movie>>>,
}

impl FavoritesStore {
    /// Opens the store over `storage` and builds the initial snapshot
    pub async fn open(storage: Arc<dyn FavoriteStorage>) -> Self {
        let store = Self {
            storage,
            snapshot: Arc::new(RwLock::new(Vec::new())),
        };
        store.reload().await;

        tracing::info!(
            favorites = store.snapshot.read().await.len(),
            "Favorites store opened"
        );

        store
    }

    /// Current snapshot of favorite records, ordered by movie id
    pub async fn favorites(&self) -> Vec<Movie> {
        self.snapshot.read().await.clone()
    }

    /// Rescans storage and replaces the snapshot
    ///
    /// Picks up records written by other handles over the same storage.
    pub async fn refresh(&self) {
        self.reload().await;
    }

    /// Whether `id` is currently favorited
    ///
    /// Reads storage directly rather than the snapshot, so the answer
    /// reflects the latest committed state even mid-rescan.
    pub async fn is_favorite(&self, id: u64) -> bool {
        match self.storage.contains(&id.to_string()).await {
            Ok(present) => present,
            Err(err) => {
                tracing::error!(movie_id = id, error = %err, "Favorite lookup failed");
                false
            }
        }
    }

    /// Persists `movie` as a favorite and rescans the snapshot
    ///
    /// Returns false when serialization or the storage write fails; the
    /// snapshot is left as it was.
    pub async fn add_favorite(&self, movie: &Movie) -> bool {
        let json = match serde_json::to_string(movie) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(
                    movie_id = movie.id,
                    error = %err,
                    "Favorite serialization failed"
                );
                return false;
            }
        };

        match self.storage.set(&movie.id.to_string(), &json).await {
            Ok(()) => {
                self.reload().await;
                tracing::debug!(movie_id = movie.id, "Favorite added");
                true
            }
            Err(err) => {
                tracing::error!(movie_id = movie.id, error = %err, "Favorite write failed");
                false
            }
        }
    }

    /// Removes `id` from the favorites; removing an absent id succeeds
    pub async fn remove_favorite(&self, id: u64) -> bool {
        match self.storage.remove(&id.to_string()).await {
            Ok(()) => {
                self.reload().await;
                tracing::debug!(movie_id = id, "Favorite removed");
                true
            }
            Err(err) => {
                tracing::error!(movie_id = id, error = %err, "Favorite removal failed");
                false
            }
        }
    }

    /// Adds `movie` when absent, removes it when present
    ///
    /// Returns whether the underlying mutation succeeded.
    pub async fn toggle_favorite(&self, movie: &Movie) -> bool {
        if self.is_favorite(movie.id).await {
            self.remove_favorite(movie.id).await
        } else {
            self.add_favorite(movie).await
        }
    }

    /// Removes every record in the current snapshot
    ///
    /// Only keys the snapshot owns are touched, so unrelated data sharing
    /// the storage namespace survives. Removals continue past individual
    /// failures; returns false if any of them failed.
    pub async fn clear_all(&self) -> bool {
        let ids: Vec<u64> = self.snapshot.read().await.iter().map(|m| m.id).collect();

        let mut ok = true;
        for id in ids {
            if let Err(err) = self.storage.remove(&id.to_string()).await {
                tracing::error!(movie_id = id, error = %err, "Favorite removal failed during clear");
                ok = false;
            }
        }

        self.reload().await;
        ok
    }

    /// Rebuilds the snapshot from a full storage scan
    ///
    /// Membership is exactly the set of numeric keys whose value parses as
    /// a movie record. Malformed values are skipped, not errors. A failed
    /// scan keeps the previous snapshot.
    async fn reload(&self) {
        let keys = match self.storage.keys().await {
            Ok(keys) => keys,
            Err(err) => {
                tracing::error!(error = %err, "Favorites scan failed, keeping previous snapshot");
                return;
            }
        };

        let mut movies = Vec::new();
        for key in keys {
            if key.parse::<u64>().is_err() {
                continue;
            }
            match self.storage.get(&key).await {
                Ok(Some(json)) => match serde_json::from_str::<Movie>(&json) {
                    Ok(movie) => movies.push(movie),
                    Err(err) => {
                        tracing::warn!(key = %key, error = %err, "Skipping malformed favorite record");
                    }
                },
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(key = %key, error = %err, "Favorite read failed during scan");
                }
            }
        }

        movies.sort_by_key(|movie| movie.id);
        *self.snapshot.write().await = movies;
    }
}

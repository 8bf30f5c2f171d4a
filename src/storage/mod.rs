//! Durable key-value storage behind the favorites store
//!
//! Storage is a capability handed to `FavoritesStore` at construction, so
//! the store never touches a concrete backend directly and tests can run
//! against the in-memory implementation. The trait deliberately has no
//! bulk clear operation: callers remove the keys they own one by one,
//! which keeps unrelated keys sharing the namespace safe from a wipe.

use crate::error::AppResult;

mod memory;
mod redis;

pub use memory::MemoryStorage;
pub use redis::{create_redis_client, RedisStorage};

#[async_trait::async_trait]
pub trait FavoriteStorage: Send + Sync {
    /// Reads the value stored under `key`, if any
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Writes `value` under `key`, replacing any existing value
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes `key`; removing an absent key is not an error
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Whether `key` is currently present
    async fn contains(&self, key: &str) -> AppResult<bool>;

    /// Every key in the namespace, in no particular order
    async fn keys(&self) -> AppResult<Vec<String>>;
}

use redis::{AsyncCommands, Client};

use super::FavoriteStorage;
use crate::error::AppResult;

/// Creates a Redis client for favorites persistence
///
/// Uses connection pooling via the connection-manager feature.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed storage
///
/// Each operation opens a multiplexed connection from the shared client.
/// Key enumeration uses a full KEYS scan; the favorites namespace stays
/// small enough (one key per favorited movie) that this is acceptable.
#[derive(Clone)]
pub struct RedisStorage {
    client: Client,
}

impl RedisStorage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl FavoriteStorage for RedisStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn contains(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let keys: Vec<String> = conn.keys("*").await?;
        Ok(keys)
    }
}

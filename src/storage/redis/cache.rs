//! Key-value operations on the Redis pool

use super::pool::RedisPool;
use crate::core::ingest::ResultStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use redis::AsyncCommands;

impl RedisPool {
    /// Set a key-value pair with optional TTL
    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        let mut conn = self.connection.clone();
        match ttl {
            Some(ttl_seconds) => conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }
}

#[async_trait]
impl ResultStore for RedisPool {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, value, self.config.result_ttl).await
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

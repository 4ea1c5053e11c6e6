//! Result storage for the gateway
//!
//! Batches go to Redis when enabled, otherwise to an in-process map.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::MemoryStore;

use crate::config::StorageConfig;
use crate::core::ingest::ResultStore;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::warn;

/// Build the store the configuration selects
pub async fn build_result_store(config: &StorageConfig) -> Result<Arc<dyn ResultStore>> {
    if config.redis.enabled {
        #[cfg(feature = "redis")]
        {
            let pool = redis::RedisPool::new(&config.redis).await?;
            return Ok(Arc::new(pool));
        }
        #[cfg(not(feature = "redis"))]
        warn!("Redis enabled in config but the `redis` feature is off");
    }

    warn!("Storing results in memory; they are lost on restart");
    Ok(Arc::new(MemoryStore::new()))
}

//! Redis connection management

use crate::config::RedisConfig;
use crate::utils::error::{GatewayError, Result};
use redis::{Client, aio::MultiplexedConnection};
use std::time::Duration;
use tracing::{debug, info};

/// Multiplexed Redis connection shared by all workers
#[derive(Clone)]
pub struct RedisPool {
    pub(crate) connection: MultiplexedConnection,
    pub(crate) config: RedisConfig,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("url", &Self::sanitize_url(&self.config.url))
            .field("result_ttl", &self.config.result_ttl)
            .finish()
    }
}

impl RedisPool {
    /// Connect, giving up after `connection_timeout` seconds
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        info!("Connecting to Redis");
        debug!("Redis URL: {}", Self::sanitize_url(&config.url));

        let client = Client::open(config.url.as_str())?;
        let timeout = Duration::from_secs(config.connection_timeout);

        let connection = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| {
                GatewayError::store(format!(
                    "timed out connecting to {} after {}s",
                    Self::sanitize_url(&config.url),
                    config.connection_timeout
                ))
            })??;

        info!("Redis connection established");
        Ok(Self {
            connection,
            config: config.clone(),
        })
    }

    /// Round-trip a PING
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Redis health check passed");
        Ok(())
    }

    /// Sanitize Redis URL for logging (hide password)
    pub(crate) fn sanitize_url(url: &str) -> String {
        if let Ok(parsed) = url::Url::parse(url) {
            let mut sanitized = parsed.clone();
            if sanitized.password().is_some() {
                let _ = sanitized.set_password(Some("***"));
            }
            sanitized.to_string()
        } else {
            "invalid_url".to_string()
        }
    }
}

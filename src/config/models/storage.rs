//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Redis configuration
    #[serde(default)]
    pub redis: RedisConfig,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    /// Redis URL
    pub url: String,
    /// Enable Redis (if false, batches go to an in-memory store)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Expiry applied to stored batches, in seconds
    #[serde(default)]
    pub result_ttl: Option<u64>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            enabled: true,
            connection_timeout: default_connection_timeout(),
            result_ttl: None,
        }
    }
}

impl RedisConfig {
    /// Build a URL from discrete host/port/password parts
    pub fn url_from_parts(host: &str, port: u16, password: Option<&str>) -> String {
        match password {
            Some(password) if !password.is_empty() => {
                format!("redis://:{}@{}:{}", password, host, port)
            }
            _ => format!("redis://{}:{}", host, port),
        }
    }
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

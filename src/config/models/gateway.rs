//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Notification relay configuration
    #[serde(default)]
    pub notify: NotifyConfig,
    /// Ingestion pipeline configuration
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Check if a feature is enabled
    pub fn is_feature_enabled(&self, feature: &str) -> bool {
        match feature {
            "redis" => self.storage.redis.enabled,
            "notify" => self.notify.is_enabled(),
            "remote_partition" => self.ingest.partition.api_url.is_some(),
            "cors" => self.server.cors.enabled,
            _ => false,
        }
    }
}

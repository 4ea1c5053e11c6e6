//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!(
        redis = config.gateway.is_feature_enabled("redis"),
        notify = config.gateway.is_feature_enabled("notify"),
        remote_partition = config.gateway.is_feature_enabled("remote_partition"),
        "Starting ingest gateway"
    );

    ServerBuilder::new().with_config(config).build().await?.start().await
}

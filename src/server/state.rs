//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::ingest::{IngestPipeline, RequestValidator};
use crate::core::jobs::JobRegistry;
use crate::utils::error::ValidationError;
use actix_web::HttpRequest;
use std::sync::Arc;
use std::time::Duration;

/// HTTP server state shared across handlers
///
/// Cloned into every actix worker; all fields are cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Credential and field rules
    pub validator: RequestValidator,
    /// Background jobs and their results
    pub jobs: Arc<JobRegistry>,
}

impl AppState {
    pub fn new(config: Config, pipeline: IngestPipeline) -> Self {
        let validator = RequestValidator::new(
            config.auth().api_key.clone(),
            config.ingest().default_batch_size,
        );
        let retention = Duration::from_secs(config.ingest().result_retention);
        let jobs = JobRegistry::new(Arc::new(pipeline), retention);

        Self {
            config: Arc::new(config),
            validator,
            jobs: Arc::new(jobs),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &IngestPipeline {
        self.jobs.pipeline()
    }

    /// Caller key from the configured auth header
    pub fn api_key<'a>(&self, req: &'a HttpRequest) -> Option<&'a str> {
        req.headers()
            .get(self.config.auth().api_key_header.as_str())
            .and_then(|value| value.to_str().ok())
    }

    /// Reject the request unless it carries the configured key
    pub fn authorize(&self, req: &HttpRequest) -> Result<(), ValidationError> {
        self.validator.check_credential(self.api_key(req))
    }
}

//! Configuration loading utilities
//!
//! Environment variables override whatever the YAML file (or the defaults) set.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use tracing::debug;

impl GatewayConfig {
    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        let vars: HashMap<String, String> = env::vars().collect();
        self.apply_overrides(&vars)
    }

    /// Apply overrides from an explicit variable map
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        let get = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();

        // Server configuration
        if let Some(host) = get("INGEST_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("INGEST_PORT") {
            self.server.port = parse_var("INGEST_PORT", &port)?;
        }
        if let Some(workers) = get("INGEST_WORKERS") {
            self.server.workers = Some(parse_var("INGEST_WORKERS", &workers)?);
        }

        // Auth configuration
        if let Some(api_key) = get("INGEST_API_KEY") {
            self.auth.api_key = api_key;
        }
        if let Some(header) = get("INGEST_API_KEY_HEADER") {
            self.auth.api_key_header = header;
        }

        // Redis configuration
        if let Some(url) = get("REDIS_URL") {
            self.storage.redis.url = url;
        } else if let Some(host) = get("REDIS_HOST") {
            let port = match get("REDIS_PORT") {
                Some(port) => parse_var("REDIS_PORT", &port)?,
                None => 6379,
            };
            let password = get("REDIS_PASSWORD");
            self.storage.redis.url = RedisConfig::url_from_parts(&host, port, password.as_deref());
        }
        if let Some(enabled) = get("REDIS_ENABLED") {
            self.storage.redis.enabled = parse_var("REDIS_ENABLED", &enabled)?;
        }
        if let Some(ttl) = get("REDIS_RESULT_TTL") {
            self.storage.redis.result_ttl = Some(parse_var("REDIS_RESULT_TTL", &ttl)?);
        }

        // Notification relay
        if let Some(url) = get("NOTIFY_RELAY_URL") {
            self.notify.base_url = Some(url);
        }
        if let Some(token) = get("NOTIFY_RELAY_TOKEN") {
            self.notify.token = Some(token);
        }
        if let Some(secret) = get("NOTIFY_SIGNING_SECRET") {
            self.notify.signing_secret = Some(secret);
        }

        // Ingestion
        if let Some(url) = get("UNSTRUCTURED_API_URL") {
            self.ingest.partition.api_url = Some(url);
        }
        if let Some(key) = get("UNSTRUCTURED_API_KEY") {
            self.ingest.partition.api_key = Some(key);
        }
        if let Some(timeout) = get("INGEST_JOB_TIMEOUT") {
            self.ingest.job_timeout = parse_var("INGEST_JOB_TIMEOUT", &timeout)?;
        }
        if let Some(size) = get("INGEST_DEFAULT_BATCH_SIZE") {
            self.ingest.default_batch_size = parse_var("INGEST_DEFAULT_BATCH_SIZE", &size)?;
        }

        // Logging
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = get("LOG_JSON") {
            self.logging.json = parse_var("LOG_JSON", &json)?;
        }

        debug!("Applied environment overrides");
        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", name, e)))
}

//! Configuration validation

use super::models::*;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.auth.validate()?;
        self.storage.redis.validate()?;
        self.notify.validate()?;
        self.ingest.validate()?;
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        if self.timeout == 0 {
            return Err("Timeout cannot be 0".to_string());
        }
        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }
        self.cors.warn_if_open();
        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("An API key is required (auth.api_key or INGEST_API_KEY)".to_string());
        }
        if self.api_key_header.is_empty() {
            return Err("API key header name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for RedisConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        let parsed = url::Url::parse(&self.url).map_err(|e| format!("Invalid Redis URL: {}", e))?;
        if !matches!(parsed.scheme(), "redis" | "rediss") {
            return Err(format!("Unsupported Redis URL scheme: {}", parsed.scheme()));
        }
        if self.result_ttl == Some(0) {
            return Err("Result TTL cannot be 0".to_string());
        }
        Ok(())
    }
}

impl Validate for NotifyConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(base_url) = &self.base_url {
            validate_http_url("notify.base_url", base_url)?;
        }
        if self.request_timeout == 0 {
            return Err("Notify request timeout cannot be 0".to_string());
        }
        Ok(())
    }
}

impl Validate for IngestConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_batch_size == 0 {
            return Err("Default batch size must be positive".to_string());
        }
        if self.job_timeout == 0 {
            return Err("Job timeout cannot be 0".to_string());
        }
        if self.fetch_timeout == 0 {
            return Err("Fetch timeout cannot be 0".to_string());
        }
        // Retention counts from dispatch, so a running job must outlive it
        if self.result_retention == 0 {
            return Err("Result retention cannot be 0".to_string());
        }
        if self.result_retention < self.job_timeout {
            return Err(format!(
                "Result retention ({}s) must be at least the job timeout ({}s)",
                self.result_retention, self.job_timeout
            ));
        }
        if let Some(api_url) = &self.partition.api_url {
            validate_http_url("ingest.partition.api_url", api_url)?;
        }
        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("Invalid {}: {}", field, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("{} must be HTTP or HTTPS", field));
    }
    Ok(())
}

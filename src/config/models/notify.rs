//! Notification relay configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where completion bodies are posted for callers that passed a notify id
#[derive(Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Relay base URL; the notify id is appended as the last path segment
    #[serde(default)]
    pub base_url: Option<String>,
    /// Bearer token for the relay
    #[serde(default)]
    pub token: Option<String>,
    /// HMAC secret used to sign posted bodies
    #[serde(default)]
    pub signing_secret: Option<String>,
    /// Delay between posts while no consumer is waiting, in seconds
    #[serde(default = "default_notify_retry_delay")]
    pub retry_delay: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            signing_secret: None,
            retry_delay: default_notify_retry_delay(),
            request_timeout: default_timeout(),
        }
    }
}

impl NotifyConfig {
    pub fn is_enabled(&self) -> bool {
        self.base_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "***"))
            .field("retry_delay", &self.retry_delay)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

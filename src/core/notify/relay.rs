//! HTTP relay notifier

use super::types::{NotifyReceipt, RelayAck};
use crate::config::NotifyConfig;
use crate::core::ingest::CompletionNotifier;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

type HmacSha256 = hmac::Hmac<sha2::Sha256>;

/// Posts job bodies to the notification relay
#[derive(Clone)]
pub struct RelayNotifier {
    client: Client,
    base_url: Url,
    token: Option<String>,
    signing_secret: Option<String>,
    retry_delay: Duration,
    request_timeout: Duration,
}

impl std::fmt::Debug for RelayNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayNotifier")
            .field("base_url", &self.base_url.as_str())
            .field("retry_delay", &self.retry_delay)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl RelayNotifier {
    /// Build a notifier; the config must carry a base URL
    pub fn new(config: &NotifyConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| GatewayError::config("notify.base_url is not set"))?;
        let base_url = Url::parse(base_url)
            .map_err(|e| GatewayError::config(format!("Invalid notify.base_url: {}", e)))?;

        let client = Client::builder()
            .user_agent(concat!("ingest-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
            signing_secret: config.signing_secret.clone(),
            retry_delay: Duration::from_secs(config.retry_delay),
            request_timeout: Duration::from_secs(config.request_timeout),
        })
    }

    /// Override the wait between empty acknowledgments
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Relay URL for one notify id
    pub fn endpoint(&self, notify_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::notify("relay base URL cannot take a path"))?
            .pop_if_empty()
            .push(notify_id);
        Ok(url)
    }

    /// `sha256=<hex hmac>` over the exact payload bytes
    pub fn sign(payload: &[u8], secret: &str) -> Result<String> {
        use hmac::Mac;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| GatewayError::internal(e.to_string()))?;
        mac.update(payload);
        Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
    }

    async fn post_once(
        &self,
        url: &Url,
        payload: &[u8],
        signature: Option<&str>,
        deadline: Instant,
    ) -> Result<RelayAck> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let timeout = self.request_timeout.min(remaining.max(Duration::from_millis(1)));

        let mut request = self
            .client
            .post(url.clone())
            .timeout(timeout)
            .header("Content-Type", "application/json")
            .body(payload.to_vec());

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(signature) = signature {
            request = request.header("X-Webhook-Signature", signature);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::notify(format!("relay unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::notify(format!(
                "relay returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::notify(format!("unreadable relay response: {}", e)))?;

        RelayAck::from_body(&body)
            .map_err(|e| GatewayError::notify(format!("unreadable relay acknowledgment: {}", e)))
    }
}

#[async_trait]
impl CompletionNotifier for RelayNotifier {
    async fn notify(
        &self,
        notify_id: &str,
        body: &Value,
        deadline: Instant,
    ) -> Result<NotifyReceipt> {
        let url = self.endpoint(notify_id)?;
        let payload = serde_json::to_vec(body)?;
        let signature = match &self.signing_secret {
            Some(secret) => Some(Self::sign(&payload, secret)?),
            None => None,
        };

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let ack = self
                .post_once(&url, &payload, signature.as_deref(), deadline)
                .await?;

            if ack.has_waiters() {
                return Ok(NotifyReceipt {
                    attempts,
                    waiters: ack.waiters,
                });
            }

            let next_attempt = Instant::now() + self.retry_delay;
            if next_attempt >= deadline {
                return Err(GatewayError::notify_timeout(format!(
                    "no consumer waiting on '{}' after {} attempt(s)",
                    notify_id, attempts
                )));
            }

            debug!(notify_id, attempts, "Relay has no waiters yet, retrying");
            tokio::time::sleep_until(next_attempt).await;
        }
    }
}

//! Capabilities the pipeline delegates to

use super::types::ParsedChunk;
use crate::core::notify::NotifyReceipt;
use crate::utils::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Map, Value};
use tokio::time::Instant;

/// Splits a document into chunks
#[async_trait]
pub trait DocumentPartitioner: Send + Sync {
    /// Partition raw bytes; `options` already has defaults merged in
    async fn partition(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
        options: &Map<String, Value>,
    ) -> Result<Vec<ParsedChunk>>;

    fn name(&self) -> &'static str;
}

/// Works out a MIME type from content and a filename hint
pub trait ContentTypeDetector: Send + Sync {
    fn detect(&self, bytes: &[u8], filename: &str) -> String;
}

/// Retrieves remote documents
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// Write sink for stored batches
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    async fn health_check(&self) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Delivers a finished job body to whoever is waiting on `notify_id`
#[async_trait]
pub trait CompletionNotifier: Send + Sync {
    /// Keep trying until a consumer is waiting or `deadline` passes
    async fn notify(&self, notify_id: &str, body: &Value, deadline: Instant)
    -> Result<NotifyReceipt>;
}

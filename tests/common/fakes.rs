//! In-process collaborators

use async_trait::async_trait;
use bytes::Bytes;
use ingest_gateway::core::ingest::{DocumentPartitioner, ParsedChunk, ResultStore, SourceFetcher};
use ingest_gateway::storage::MemoryStore;
use ingest_gateway::{GatewayError, Result};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the same chunks for every document and counts calls
#[derive(Debug, Default)]
pub struct ScriptedPartitioner {
    chunks: Vec<ParsedChunk>,
    calls: AtomicUsize,
}

impl ScriptedPartitioner {
    pub fn returning(chunks: Vec<ParsedChunk>) -> Self {
        Self {
            chunks,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentPartitioner for ScriptedPartitioner {
    async fn partition(
        &self,
        _bytes: Bytes,
        _filename: &str,
        _content_type: &str,
        _options: &Map<String, Value>,
    ) -> Result<Vec<ParsedChunk>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.chunks.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Every fetch fails
#[derive(Debug, Default)]
pub struct FailingFetcher;

#[async_trait]
impl SourceFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        Err(GatewayError::fetch(format!("{} is unreachable", url)))
    }
}

/// Memory store that fails once `fail_after` writes have succeeded
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    fail_after: Option<usize>,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Default::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResultStore for CountingStore {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let attempt = self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| attempt >= limit) {
            return Err(GatewayError::store(format!("refused write of {}", key)));
        }
        self.inner.put(key, value).await
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

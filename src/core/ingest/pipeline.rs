//! Fetch, detect, partition, batch, store, notify

use super::batching::{BatchKeyTemplate, ChunkStats, partition_batches};
use super::traits::{
    CompletionNotifier, ContentTypeDetector, DocumentPartitioner, ResultStore, SourceFetcher,
};
use super::types::{
    DocumentMetadata, IngestSource, IngestionRequest, IngestionResult, JobResponse, ParsedChunk,
};
use crate::config::IngestConfig;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Values the pipeline needs from configuration
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Partitioner options requests override key by key
    pub default_options: Map<String, Value>,
    /// Upper bound on one job, notification included
    pub job_timeout: Duration,
}

impl PipelineSettings {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            default_options: config.partition.default_options.clone(),
            job_timeout: Duration::from_secs(config.job_timeout),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&IngestConfig::default())
    }
}

/// The ingestion job
#[derive(Clone)]
pub struct IngestPipeline {
    partitioner: Arc<dyn DocumentPartitioner>,
    detector: Arc<dyn ContentTypeDetector>,
    fetcher: Arc<dyn SourceFetcher>,
    store: Arc<dyn ResultStore>,
    notifier: Option<Arc<dyn CompletionNotifier>>,
    settings: PipelineSettings,
}

impl std::fmt::Debug for IngestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestPipeline")
            .field("partitioner", &self.partitioner.name())
            .field("store", &self.store.name())
            .field("notifier", &self.notifier.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

impl IngestPipeline {
    pub fn new(
        partitioner: Arc<dyn DocumentPartitioner>,
        detector: Arc<dyn ContentTypeDetector>,
        fetcher: Arc<dyn SourceFetcher>,
        store: Arc<dyn ResultStore>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            partitioner,
            detector,
            fetcher,
            store,
            notifier: None,
            settings,
        }
    }

    /// Attach a relay for requests that carry a `notify_id`
    pub fn with_notifier(mut self, notifier: Arc<dyn CompletionNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<dyn ResultStore> {
        &self.store
    }

    /// Parse and persist one document, returning the aggregate result.
    ///
    /// Batches are written in order, one at a time. A failed write leaves
    /// the earlier batches in the store.
    pub async fn run(&self, request: &IngestionRequest) -> Result<IngestionResult> {
        let bytes = self.materialize(&request.source).await?;
        let size_in_bytes = bytes.len() as u64;
        let filetype = self.detector.detect(&bytes, &request.filename);
        debug!(
            filename = %request.filename,
            filetype = %filetype,
            size_in_bytes,
            "Source materialized"
        );

        let options = merge_options(&self.settings.default_options, &request.parse_options);
        let mut chunks = self
            .partitioner
            .partition(bytes, &request.filename, &filetype, &options)
            .await?;

        if chunks.is_empty() {
            return Err(GatewayError::empty_document(format!(
                "no chunks were parsed from '{}'",
                request.filename
            )));
        }

        attach_metadata(&mut chunks, &request.extra_metadata);
        let stats = ChunkStats::collect(&chunks);

        let keys = BatchKeyTemplate::generate();
        let batches = partition_batches(chunks, request.batch_size);
        let total_batches = batches.len();

        for (index, batch) in batches.iter().enumerate() {
            let value = serde_json::to_string(batch)?;
            self.store.put(&keys.key(index), &value).await?;
        }

        info!(
            results_id = %keys.results_id(),
            total_chunks = stats.total_chunks,
            total_batches,
            store = self.store.name(),
            "Stored ingestion batches"
        );

        Ok(IngestionResult {
            metadata: DocumentMetadata {
                filename: request.filename.clone(),
                filetype,
                size_in_bytes,
            },
            total_characters: stats.total_characters,
            total_chunks: stats.total_chunks,
            total_batches,
            total_pages: stats.total_pages,
            results_id: keys.results_id(),
            batch_key_template: keys.template(),
        })
    }

    /// Run the job and report its outcome, relaying it when asked to.
    ///
    /// Never fails: every error becomes an error body. A relay failure
    /// replaces the job outcome.
    pub async fn execute(&self, request: &IngestionRequest, deadline: Instant) -> JobResponse {
        let response = match self.run(request).await {
            Ok(result) => JobResponse::success(&result),
            Err(e) => {
                warn!(filename = %request.filename, error = %e, "Ingestion failed");
                JobResponse::from_error(&e)
            }
        };

        let Some(notify_id) = request.notify_id.as_deref() else {
            return response;
        };

        match &self.notifier {
            Some(notifier) => match notifier.notify(notify_id, &response.body, deadline).await {
                Ok(receipt) => {
                    info!(
                        notify_id,
                        attempts = receipt.attempts,
                        waiters = receipt.waiters,
                        "Completion relayed"
                    );
                    response
                }
                Err(e) => {
                    warn!(notify_id, error = %e, "Completion relay failed");
                    JobResponse::from_error(&e)
                }
            },
            None => {
                warn!(notify_id, "No notification relay configured, result kept for polling");
                response
            }
        }
    }

    /// [`execute`](Self::execute) bounded by the configured job timeout
    pub async fn execute_with_timeout(&self, request: &IngestionRequest) -> JobResponse {
        let timeout = self.settings.job_timeout;
        let deadline = Instant::now() + timeout;

        match tokio::time::timeout_at(deadline, self.execute(request, deadline)).await {
            Ok(response) => response,
            Err(_) => {
                warn!(filename = %request.filename, ?timeout, "Ingestion job timed out");
                JobResponse::from_error(&GatewayError::timeout(format!(
                    "job exceeded {}s",
                    timeout.as_secs()
                )))
            }
        }
    }

    async fn materialize(&self, source: &IngestSource) -> Result<Bytes> {
        match source {
            IngestSource::File(bytes) => Ok(bytes.clone()),
            IngestSource::Url(url) => self.fetcher.fetch(url).await,
            IngestSource::Text(text) => Ok(Bytes::copy_from_slice(text.as_bytes())),
        }
    }
}

/// Defaults overridden key by key by the request
fn merge_options(
    defaults: &Map<String, Value>,
    overrides: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = defaults.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

fn attach_metadata(chunks: &mut [ParsedChunk], extra: &Map<String, Value>) {
    if extra.is_empty() {
        return;
    }
    for chunk in chunks {
        chunk
            .metadata
            .extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

//! Document ingestion
//!
//! A request is validated, its source materialized, partitioned into chunks,
//! grouped into batches stored under `results_<results_id>_<index>`, and the
//! outcome returned or relayed.

mod batching;
mod pipeline;
mod traits;
mod types;
mod validator;

pub use batching::{BatchKeyTemplate, ChunkStats, partition_batches};
pub use pipeline::{IngestPipeline, PipelineSettings};
pub use traits::{
    CompletionNotifier, ContentTypeDetector, DocumentPartitioner, ResultStore, SourceFetcher,
};
#[cfg(test)]
pub use traits::MockResultStore;
pub use types::{
    DocumentMetadata, IngestSource, IngestionRequest, IngestionResult, JobResponse, ParsedChunk,
    RawIngestRequest, UploadedFile,
};
pub use validator::{DEFAULT_UPLOAD_FILENAME, RequestValidator};

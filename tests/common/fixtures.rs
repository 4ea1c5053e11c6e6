//! Test fixtures and data factories

use bytes::Bytes;
use ingest_gateway::core::ingest::{IngestSource, IngestionRequest, ParsedChunk};
use serde_json::Map;

/// Factory for parsed documents
pub struct ChunkFactory;

impl ChunkFactory {
    /// `count` chunks spread evenly over `pages` pages
    pub fn paged(count: usize, pages: u64) -> Vec<ParsedChunk> {
        let per_page = count.div_ceil(pages.max(1) as usize).max(1);
        (0..count)
            .map(|i| {
                ParsedChunk::new(format!("chunk {i} body")).with_page((i / per_page) as u64 + 1)
            })
            .collect()
    }

    /// `count` chunks without page numbers
    pub fn unpaged(count: usize) -> Vec<ParsedChunk> {
        (0..count).map(|i| ParsedChunk::new(format!("chunk {i}"))).collect()
    }
}

/// Factory for validated requests
pub struct RequestFactory;

impl RequestFactory {
    pub fn upload(bytes: &'static [u8], filename: &str, batch_size: usize) -> IngestionRequest {
        Self::with_source(IngestSource::File(Bytes::from_static(bytes)), filename, batch_size)
    }

    pub fn text(text: &str, filename: &str) -> IngestionRequest {
        Self::with_source(IngestSource::Text(text.to_string()), filename, 5)
    }

    pub fn url(url: &str, filename: &str) -> IngestionRequest {
        Self::with_source(IngestSource::Url(url.to_string()), filename, 5)
    }

    fn with_source(source: IngestSource, filename: &str, batch_size: usize) -> IngestionRequest {
        IngestionRequest {
            source,
            filename: filename.to_string(),
            extra_metadata: Map::new(),
            parse_options: Map::new(),
            batch_size,
            notify_id: None,
        }
    }
}

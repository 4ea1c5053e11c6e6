//! Chunk statistics, batch windows and result keys

use super::types::ParsedChunk;
use uuid::Uuid;

/// Aggregates collected in a single pass over the parsed chunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkStats {
    pub total_characters: usize,
    pub total_chunks: usize,
    /// Highest page number seen; `None` when no chunk carries one
    pub total_pages: Option<u64>,
}

impl ChunkStats {
    pub fn collect(chunks: &[ParsedChunk]) -> Self {
        chunks.iter().fold(Self::default(), |mut stats, chunk| {
            stats.total_characters += chunk.char_count();
            stats.total_chunks += 1;
            if let Some(page) = chunk.page_number() {
                stats.total_pages = Some(stats.total_pages.map_or(page, |max| max.max(page)));
            }
            stats
        })
    }
}

/// Group chunks into windows of `batch_size`, preserving order.
///
/// A new batch is opened whenever the current one holds an exact multiple of
/// `batch_size` chunks, so only the final batch can be short.
pub fn partition_batches(chunks: Vec<ParsedChunk>, batch_size: usize) -> Vec<Vec<ParsedChunk>> {
    let batch_size = batch_size.max(1);
    let mut batches: Vec<Vec<ParsedChunk>> = Vec::with_capacity(chunks.len().div_ceil(batch_size));

    for chunk in chunks {
        match batches.last_mut() {
            Some(current) if current.len() % batch_size != 0 => current.push(chunk),
            _ => {
                let mut batch = Vec::with_capacity(batch_size);
                batch.push(chunk);
                batches.push(batch);
            }
        }
    }

    batches
}

/// Key scheme for stored batches: `results_<results_id>_<index>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchKeyTemplate {
    results_id: Uuid,
}

impl BatchKeyTemplate {
    /// Placeholder callers substitute the batch index into
    pub const PLACEHOLDER: &'static str = "{batch_index}";

    /// Template scoped to a fresh random results id
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4())
    }

    pub fn new(results_id: Uuid) -> Self {
        Self { results_id }
    }

    pub fn results_id(&self) -> String {
        self.results_id.to_string()
    }

    /// Template string reported to callers
    pub fn template(&self) -> String {
        format!("results_{}_{}", self.results_id, Self::PLACEHOLDER)
    }

    /// Concrete key for one batch
    pub fn key(&self, index: usize) -> String {
        format!("results_{}_{}", self.results_id, index)
    }
}

//! Default document collaborators
//!
//! MIME detection, URL fetching, and the two partitioners: the Unstructured
//! HTTP API when configured, otherwise the built-in text partitioner.

mod detect;
mod fetch;
mod text;
mod unstructured;

pub use detect::MimeDetector;
pub use fetch::HttpFetcher;
pub use text::{DEFAULT_MAX_CHARACTERS, TextPartitioner};
pub use unstructured::UnstructuredPartitioner;

use crate::config::PartitionConfig;
use crate::core::ingest::DocumentPartitioner;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Pick the partitioner the configuration asks for
pub fn build_partitioner(config: &PartitionConfig) -> Result<Arc<dyn DocumentPartitioner>> {
    match config.api_url.as_deref() {
        Some(api_url) if !api_url.is_empty() => {
            info!("Partitioning through {}", api_url);
            Ok(Arc::new(UnstructuredPartitioner::new(config)?))
        }
        _ => {
            info!("No partitioning API configured, using the built-in text partitioner");
            Ok(Arc::new(TextPartitioner::new()))
        }
    }
}

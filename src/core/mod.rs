//! Core functionality for the gateway
//!
//! This module contains the ingestion job and the collaborators it drives.

pub mod ingest;
pub mod jobs;
pub mod notify;
pub mod partition;

use crate::config::Config;
use crate::core::ingest::{IngestPipeline, PipelineSettings, ResultStore};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Wire the default collaborators around a result store
pub fn build_pipeline(config: &Config, store: Arc<dyn ResultStore>) -> Result<IngestPipeline> {
    let ingest = config.ingest();

    debug!("Initializing document collaborators");
    let partitioner = partition::build_partitioner(&ingest.partition)?;
    let fetcher = partition::HttpFetcher::new(Duration::from_secs(ingest.fetch_timeout))?;

    let pipeline = IngestPipeline::new(
        partitioner,
        Arc::new(partition::MimeDetector::new()),
        Arc::new(fetcher),
        store,
        PipelineSettings::from_config(ingest),
    );

    if config.notify().is_enabled() {
        info!("Completion relay enabled");
        let notifier = notify::RelayNotifier::new(config.notify())?;
        Ok(pipeline.with_notifier(Arc::new(notifier)))
    } else {
        Ok(pipeline)
    }
}

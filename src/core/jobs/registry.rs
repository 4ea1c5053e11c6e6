//! Job registry backed by a moka cache

use super::types::{JobPoll, JobState};
use crate::core::ingest::{IngestPipeline, IngestionRequest};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Upper bound on jobs tracked at once
const MAX_TRACKED_JOBS: u64 = 100_000;

/// Spawns pipeline runs and keeps their outcomes for polling
#[derive(Clone)]
pub struct JobRegistry {
    pipeline: Arc<IngestPipeline>,
    jobs: Cache<Uuid, JobState>,
}

impl std::fmt::Debug for JobRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRegistry")
            .field("tracked", &self.jobs.entry_count())
            .finish()
    }
}

impl JobRegistry {
    /// Entries expire `retention` after their last update
    pub fn new(pipeline: Arc<IngestPipeline>, retention: Duration) -> Self {
        let jobs = Cache::builder()
            .max_capacity(MAX_TRACKED_JOBS)
            .time_to_live(retention)
            .build();
        Self { pipeline, jobs }
    }

    /// Start a job in the background and return its id
    pub async fn dispatch(&self, request: IngestionRequest) -> Uuid {
        let job_id = Uuid::new_v4();
        self.jobs.insert(job_id, JobState::Pending).await;

        let pipeline = self.pipeline.clone();
        let jobs = self.jobs.clone();
        let span = info_span!("ingest_job", %job_id, filename = %request.filename);

        tokio::spawn(
            async move {
                info!("Job started");
                let response = pipeline.execute_with_timeout(&request).await;
                info!(status = response.status, "Job finished");
                jobs.insert(job_id, JobState::Finished(response)).await;
            }
            .instrument(span),
        );

        job_id
    }

    /// Non-blocking lookup
    pub async fn poll(&self, job_id: &str) -> JobPoll {
        match Uuid::parse_str(job_id) {
            Ok(id) => JobPoll::from(self.jobs.get(&id).await),
            Err(_) => JobPoll::NotFound,
        }
    }

    pub fn pipeline(&self) -> &Arc<IngestPipeline> {
        &self.pipeline
    }
}

//! Job state types

use crate::core::ingest::JobResponse;

/// What the registry holds per job
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    /// Still running
    Pending,
    /// Finished, successfully or not
    Finished(JobResponse),
}

/// Answer to a poll
#[derive(Debug, Clone, PartialEq)]
pub enum JobPoll {
    Pending,
    Finished(JobResponse),
    /// Unknown, malformed or expired id
    NotFound,
}

impl From<Option<JobState>> for JobPoll {
    fn from(state: Option<JobState>) -> Self {
        match state {
            Some(JobState::Pending) => JobPoll::Pending,
            Some(JobState::Finished(response)) => JobPoll::Finished(response),
            None => JobPoll::NotFound,
        }
    }
}

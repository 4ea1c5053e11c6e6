//! Background ingestion jobs
//!
//! Dispatch spawns the pipeline on the runtime and returns a job id at once;
//! polling never waits.

mod registry;
mod types;

pub use registry::JobRegistry;
pub use types::{JobPoll, JobState};

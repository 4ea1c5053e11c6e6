//! Common test utilities for ingest-gateway
//!
//! - Fake collaborators for the ingestion pipeline
//! - Fixtures for requests and parsed documents

pub mod fakes;
pub mod fixtures;

pub use fakes::{CountingStore, FailingFetcher, ScriptedPartitioner};
pub use fixtures::{ChunkFactory, RequestFactory};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

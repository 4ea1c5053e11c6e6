//! Utility modules for the ingest gateway
//!
//! - **error**: Error types and HTTP mapping
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

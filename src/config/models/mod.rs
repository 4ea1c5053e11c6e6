//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod auth;
pub mod gateway;
pub mod ingest;
pub mod logging;
pub mod notify;
pub mod server;
pub mod storage;

pub use auth::*;
pub use gateway::*;
pub use ingest::*;
pub use logging::*;
pub use notify::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    50 * 1024 * 1024 // 50MB, uploads are whole documents
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_api_key_header() -> String {
    "api-key".to_string()
}

pub fn default_batch_size() -> usize {
    5
}

pub fn default_job_timeout() -> u64 {
    1200
}

pub fn default_result_retention() -> u64 {
    3600
}

pub fn default_fetch_timeout() -> u64 {
    60
}

pub fn default_partition_timeout() -> u64 {
    600
}

pub fn default_notify_retry_delay() -> u64 {
    60
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

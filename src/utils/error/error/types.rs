//! Error types for the ingest gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Reasons a raw ingest request is rejected before any I/O happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// None of file, url or text was supplied
    #[error("one of 'file', 'url' or 'text' must be provided")]
    MissingSource,

    /// More than one of file, url or text was supplied
    #[error("only one of 'file', 'url' or 'text' may be provided, got: {}", .0.join(", "))]
    AmbiguousSource(Vec<&'static str>),

    /// url/text sources need an explicit filename
    #[error("'filename' is required when ingesting a {0}")]
    MissingFilename(&'static str),

    /// Caller credential does not match the configured secret
    #[error("api-key is not valid")]
    BadCredential,

    /// A JSON-encoded field did not decode to an object
    #[error("field '{field}' must be a JSON object: {reason}")]
    MalformedJson {
        /// Offending field name
        field: String,
        /// Decoder message
        reason: String,
    },

    /// batch_size was zero, negative or not a number
    #[error("'batch_size' must be a positive integer, got {0}")]
    InvalidBatchSize(String),
}

impl ValidationError {
    /// Stable kind name used as the error code in responses
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingSource => "MissingSource",
            ValidationError::AmbiguousSource(_) => "AmbiguousSource",
            ValidationError::MissingFilename(_) => "MissingFilename",
            ValidationError::BadCredential => "BadCredential",
            ValidationError::MalformedJson { .. } => "MalformedJSON",
            ValidationError::InvalidBatchSize(_) => "InvalidBatchSize",
        }
    }

    pub(crate) fn malformed_json(field: impl Into<String>, reason: impl ToString) -> Self {
        ValidationError::MalformedJson {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request validation errors
    #[error("{0}")]
    Validation(ValidationError),

    /// URL source could not be retrieved
    #[error("Failed to fetch source: {0}")]
    Fetch(String),

    /// Partitioner failure
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Partitioner produced no chunks
    #[error("Empty document: {0}")]
    EmptyDocument(String),

    /// Result store write failure
    #[error("Store error: {0}")]
    Store(String),

    /// Notification relay unreachable or rejected the payload
    #[error("Notification error: {0}")]
    Notify(String),

    /// No consumer waited on the relay before the job deadline
    #[error("Notification timed out: {0}")]
    NotifyTimeout(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

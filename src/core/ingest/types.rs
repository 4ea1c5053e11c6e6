//! Ingestion request, chunk and result types

use crate::utils::error::GatewayError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document source, exactly one per request
#[derive(Debug, Clone, PartialEq)]
pub enum IngestSource {
    /// Uploaded bytes
    File(Bytes),
    /// Remote document to fetch
    Url(String),
    /// Inline text
    Text(String),
}

impl IngestSource {
    /// Source field name as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            IngestSource::File(_) => "file",
            IngestSource::Url(_) => "url",
            IngestSource::Text(_) => "text",
        }
    }
}

/// Multipart upload as read from the request stream
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    /// Filename from the content disposition, if any
    pub filename: Option<String>,
    /// Full upload contents
    pub bytes: Bytes,
}

/// Request fields exactly as the caller sent them
///
/// JSON bodies deserialize straight into this; multipart requests fill it
/// field by field. Nothing here has been checked yet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIngestRequest {
    /// Credential from the auth header
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Uploaded document
    #[serde(skip)]
    pub file: Option<UploadedFile>,
    /// Remote document URL
    pub url: Option<String>,
    /// Inline document text
    pub text: Option<String>,
    /// Document name
    pub filename: Option<String>,
    /// Object, or JSON-encoded object, merged into every chunk's metadata
    pub extra_metadata: Option<Value>,
    /// Object, or JSON-encoded object, of partitioner options
    pub unstructured_args: Option<Value>,
    /// Number or numeric string
    pub batch_size: Option<Value>,
    /// Relay correlation token
    pub notify_id: Option<String>,
}

/// A validated ingestion request
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionRequest {
    pub source: IngestSource,
    pub filename: String,
    pub extra_metadata: Map<String, Value>,
    pub parse_options: Map<String, Value>,
    pub batch_size: usize,
    pub notify_id: Option<String>,
}

/// One unit of partitioner output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedChunk {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ParsedChunk {
    /// Create a chunk with no metadata
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Map::new(),
        }
    }

    /// Set the page number
    pub fn with_page(mut self, page: u64) -> Self {
        self.metadata.insert("page_number".to_string(), Value::from(page));
        self
    }

    /// Page number from metadata, accepting numbers and numeric strings
    pub fn page_number(&self) -> Option<u64> {
        match self.metadata.get("page_number")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Length in Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Describes the ingested document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub filetype: String,
    #[serde(rename = "sizeInBytes")]
    pub size_in_bytes: u64,
}

/// Outcome of a successful ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub metadata: DocumentMetadata,
    pub total_characters: usize,
    pub total_chunks: usize,
    pub total_batches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    pub results_id: String,
    #[serde(rename = "batch_template")]
    pub batch_key_template: String,
}

/// Final status and body of a job, as returned inline, polled, or relayed
#[derive(Debug, Clone, PartialEq)]
pub struct JobResponse {
    pub status: u16,
    pub body: Value,
}

impl JobResponse {
    /// 200 body for a finished ingestion
    pub fn success(result: &IngestionResult) -> Self {
        let mut body = serde_json::to_value(result).unwrap_or_else(|_| Value::Object(Map::new()));
        if let Value::Object(map) = &mut body {
            map.insert("status".to_string(), Value::from(200u16));
        }
        Self { status: 200, body }
    }

    /// Error body carrying the error description verbatim
    pub fn from_error(error: &GatewayError) -> Self {
        let body = error.to_body();
        Self {
            status: body.status,
            body: serde_json::to_value(&body).unwrap_or(Value::Null),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

//! Request validation
//!
//! Turns a [`RawIngestRequest`] into an [`IngestionRequest`] without doing any
//! I/O. Rules run in a fixed order: credential, source selection, filename,
//! JSON fields, batch size.

use super::types::{IngestSource, IngestionRequest, RawIngestRequest};
use crate::utils::error::ValidationError;
use serde_json::{Map, Value};

/// Filename used for uploads that carry none
pub const DEFAULT_UPLOAD_FILENAME: &str = "document";

/// Checks raw requests against the configured credential and field rules
#[derive(Clone)]
pub struct RequestValidator {
    api_key: String,
    default_batch_size: usize,
}

impl std::fmt::Debug for RequestValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestValidator")
            .field("api_key", &"<redacted>")
            .field("default_batch_size", &self.default_batch_size)
            .finish()
    }
}

impl RequestValidator {
    pub fn new(api_key: impl Into<String>, default_batch_size: usize) -> Self {
        Self {
            api_key: api_key.into(),
            default_batch_size: default_batch_size.max(1),
        }
    }

    /// Compare a caller-supplied key with the configured secret
    pub fn check_credential(&self, supplied: Option<&str>) -> Result<(), ValidationError> {
        match supplied {
            Some(key) if constant_time_eq(key.as_bytes(), self.api_key.as_bytes()) => Ok(()),
            _ => Err(ValidationError::BadCredential),
        }
    }

    /// Validate and normalize a raw request
    pub fn validate(&self, raw: RawIngestRequest) -> Result<IngestionRequest, ValidationError> {
        self.check_credential(raw.api_key.as_deref())?;

        let url = present_source(raw.url);
        let text = present_source(raw.text);
        let filename = non_empty(raw.filename);

        let mut present = Vec::new();
        if raw.file.is_some() {
            present.push("file");
        }
        if url.is_some() {
            present.push("url");
        }
        if text.is_some() {
            present.push("text");
        }
        if present.len() > 1 {
            return Err(ValidationError::AmbiguousSource(present));
        }

        let (source, filename) = match (raw.file, url, text) {
            (Some(upload), None, None) => {
                let name = non_empty(upload.filename)
                    .or(filename)
                    .unwrap_or_else(|| DEFAULT_UPLOAD_FILENAME.to_string());
                (IngestSource::File(upload.bytes), name)
            }
            (None, Some(url), None) => {
                let name = filename.ok_or(ValidationError::MissingFilename("url"))?;
                (IngestSource::Url(url), name)
            }
            (None, None, Some(text)) => {
                let name = filename.ok_or(ValidationError::MissingFilename("text"))?;
                (IngestSource::Text(text), name)
            }
            _ => return Err(ValidationError::MissingSource),
        };

        let extra_metadata = decode_object("extra_metadata", raw.extra_metadata)?;
        let parse_options = decode_object("unstructured_args", raw.unstructured_args)?;
        let batch_size = match raw.batch_size {
            Some(value) => parse_batch_size(&value)?,
            None => self.default_batch_size,
        };

        Ok(IngestionRequest {
            source,
            filename,
            extra_metadata,
            parse_options,
            batch_size,
            notify_id: non_empty(raw.notify_id),
        })
    }
}

/// Only the empty string is absent; whitespace is left for the parser
fn present_source(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Accept an object, a JSON-encoded object, or nothing
fn decode_object(field: &str, value: Option<Value>) -> Result<Map<String, Value>, ValidationError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(Map::new()),
        Some(Value::String(encoded)) if encoded.trim().is_empty() => return Ok(Map::new()),
        Some(Value::String(encoded)) => serde_json::from_str::<Value>(&encoded)
            .map_err(|e| ValidationError::malformed_json(field, e))?,
        Some(other) => other,
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::malformed_json(
            field,
            format!("expected an object, got {}", json_type_name(&other)),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_batch_size(value: &Value) -> Result<usize, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n > 0 => usize::try_from(n)
            .map_err(|_| ValidationError::InvalidBatchSize(value.to_string())),
        _ => Err(ValidationError::InvalidBatchSize(value.to_string())),
    }
}

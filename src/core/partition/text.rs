//! Built-in partitioner for plain-text documents
//!
//! Used when no remote partitioning API is configured. Paragraphs (blank-line
//! separated) are packed into chunks of at most `max_characters`. Form feeds
//! mark page breaks; when present every chunk carries a `page_number`.

use crate::core::ingest::{DocumentPartitioner, ParsedChunk};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Map, Value};

/// Chunk size used when the request does not set `max_characters`
pub const DEFAULT_MAX_CHARACTERS: usize = 500;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextPartitioner;

impl TextPartitioner {
    pub fn new() -> Self {
        Self
    }

    fn accepts(content_type: &str) -> bool {
        content_type.starts_with("text/")
            || matches!(
                content_type,
                "application/json" | "application/xml" | "application/x-yaml"
            )
    }

    /// Split `text` into chunks; pure so it can be tested directly
    pub fn chunk(
        text: &str,
        max_characters: usize,
        filename: &str,
        filetype: &str,
    ) -> Vec<ParsedChunk> {
        let max_characters = max_characters.max(1);
        let pages: Vec<&str> = text.split('\x0c').collect();
        let paged = pages.len() > 1;

        let mut chunks = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            for piece in pack_paragraphs(page, max_characters) {
                let mut chunk = ParsedChunk::new(piece);
                chunk
                    .metadata
                    .insert("filename".to_string(), Value::from(filename));
                chunk
                    .metadata
                    .insert("filetype".to_string(), Value::from(filetype));
                if paged {
                    chunk = chunk.with_page(index as u64 + 1);
                }
                chunks.push(chunk);
            }
        }
        chunks
    }
}

#[async_trait]
impl DocumentPartitioner for TextPartitioner {
    async fn partition(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
        options: &Map<String, Value>,
    ) -> Result<Vec<ParsedChunk>> {
        if !Self::accepts(content_type) {
            return Err(GatewayError::parse(format!(
                "'{}' ({}) needs a partitioning API; set ingest.partition.api_url",
                filename, content_type
            )));
        }

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| GatewayError::parse(format!("'{}' is not valid UTF-8: {}", filename, e)))?;

        let max_characters = options
            .get("max_characters")
            .and_then(|v| match v {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .map_or(DEFAULT_MAX_CHARACTERS, |n| n as usize);

        Ok(Self::chunk(text, max_characters, filename, content_type))
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

/// Greedily join paragraphs up to the limit, hard-splitting oversized ones
fn pack_paragraphs(text: &str, max_characters: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    let paragraphs = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty());

    for paragraph in paragraphs {
        let len = paragraph.chars().count();

        if len > max_characters {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            out.extend(split_by_chars(paragraph, max_characters));
            continue;
        }

        let joined_len = if current.is_empty() { len } else { current_len + 2 + len };
        if joined_len > max_characters {
            out.push(std::mem::take(&mut current));
            current.push_str(paragraph);
            current_len = len;
        } else {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
            current_len = joined_len;
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn split_by_chars(text: &str, max_characters: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_characters)
        .map(|piece| piece.iter().collect::<String>().trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

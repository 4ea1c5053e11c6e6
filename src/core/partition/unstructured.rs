//! Partitioning through the Unstructured HTTP API

use crate::config::PartitionConfig;
use crate::core::ingest::{DocumentPartitioner, ParsedChunk};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// Client for a `/general/v0/general` style endpoint
#[derive(Clone)]
pub struct UnstructuredPartitioner {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for UnstructuredPartitioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnstructuredPartitioner")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl UnstructuredPartitioner {
    pub fn new(config: &PartitionConfig) -> Result<Self> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| GatewayError::config("ingest.partition.api_url is not set"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Options become form fields; non-string values are sent JSON-encoded
    fn build_form(
        bytes: Bytes,
        filename: &str,
        content_type: &str,
        options: &Map<String, Value>,
    ) -> Result<Form> {
        let file = Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| {
                GatewayError::parse(format!("invalid content type '{}': {}", content_type, e))
            })?;

        let form = options
            .iter()
            .filter(|(_, value)| !value.is_null())
            .fold(Form::new().part("files", file), |form, (key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                form.text(key.clone(), text)
            });

        Ok(form)
    }
}

#[async_trait]
impl DocumentPartitioner for UnstructuredPartitioner {
    async fn partition(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
        options: &Map<String, Value>,
    ) -> Result<Vec<ParsedChunk>> {
        let form = Self::build_form(bytes, filename, content_type, options)?;

        let mut request = self
            .client
            .post(&self.api_url)
            .header("Accept", "application/json")
            .multipart(form);
        if let Some(key) = &self.api_key {
            request = request.header("unstructured-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::parse(format!("partitioning API unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::parse(format!(
                "partitioning API returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let elements: Vec<ParsedChunk> = response
            .json()
            .await
            .map_err(|e| GatewayError::parse(format!("unexpected partitioning response: {}", e)))?;

        debug!(filename, elements = elements.len(), "Document partitioned");
        Ok(elements)
    }

    fn name(&self) -> &'static str {
        "unstructured"
    }
}

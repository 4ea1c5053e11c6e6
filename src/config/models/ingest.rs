//! Ingestion pipeline configuration

use super::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ingestion pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Batch size used when the request omits one
    #[serde(default = "default_batch_size")]
    pub default_batch_size: usize,
    /// Upper bound for a whole job (fetch, parse, store, notify), in seconds
    #[serde(default = "default_job_timeout")]
    pub job_timeout: u64,
    /// How long finished background results stay pollable, in seconds
    #[serde(default = "default_result_retention")]
    pub result_retention: u64,
    /// URL fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// Document partitioner
    #[serde(default)]
    pub partition: PartitionConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_batch_size: default_batch_size(),
            job_timeout: default_job_timeout(),
            result_retention: default_result_retention(),
            fetch_timeout: default_fetch_timeout(),
            partition: PartitionConfig::default(),
        }
    }
}

/// Document partitioner configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Unstructured partition endpoint; the built-in text partitioner is used when unset
    #[serde(default)]
    pub api_url: Option<String>,
    /// Unstructured API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Partition request timeout in seconds
    #[serde(default = "default_partition_timeout")]
    pub timeout: u64,
    /// Options every request starts from; request options override them key by key
    #[serde(default = "default_partition_options")]
    pub default_options: Map<String, Value>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            timeout: default_partition_timeout(),
            default_options: default_partition_options(),
        }
    }
}

impl std::fmt::Debug for PartitionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("default_options", &self.default_options)
            .finish()
    }
}

/// `{strategy: auto, chunking_strategy: basic}`
pub fn default_partition_options() -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("strategy".to_string(), Value::from("auto"));
    options.insert("chunking_strategy".to_string(), Value::from("basic"));
    options
}

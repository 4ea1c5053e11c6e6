//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Shared-secret authentication for the ingest routes
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret callers must present
    #[serde(default)]
    pub api_key: String,
    /// Header carrying the secret
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_key_header: default_api_key_header(),
        }
    }
}

// Keeps the secret out of `{:#?}` dumps of the config.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"***")
            .field("api_key_header", &self.api_key_header)
            .finish()
    }
}

//! Relay notification types

use serde::{Deserialize, Serialize};

/// What the relay answers to a POST
///
/// An empty body, `{}` and `{"waiters": 0}` all mean nobody is listening yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayAck {
    #[serde(default)]
    pub waiters: u64,
}

impl RelayAck {
    /// Decode a response body, treating an empty body as no waiters
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(body)
    }

    pub fn has_waiters(&self) -> bool {
        self.waiters >= 1
    }
}

/// Outcome of a delivered notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyReceipt {
    /// POSTs made, including the successful one
    pub attempts: u32,
    /// Consumers the relay reported on the final attempt
    pub waiters: u64,
}

//! Helper functions for creating specific error types

use super::types::GatewayError;

/// Helper functions for creating specific errors
impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch(message.into())
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    pub fn empty_document<S: Into<String>>(message: S) -> Self {
        Self::EmptyDocument(message.into())
    }

    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store(message.into())
    }

    pub fn notify<S: Into<String>>(message: S) -> Self {
        Self::Notify(message.into())
    }

    pub fn notify_timeout<S: Into<String>>(message: S) -> Self {
        Self::NotifyTimeout(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the failure is the caller's fault (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Fetch(_) | Self::NotFound(_))
    }
}

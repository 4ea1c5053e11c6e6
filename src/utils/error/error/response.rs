//! HTTP response handling for errors

use super::types::{GatewayError, ValidationError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

impl GatewayError {
    /// Stable error code reported alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Validation(inner) => inner.kind(),
            GatewayError::Fetch(_) => "SourceFetchError",
            GatewayError::Parse(_) => "ParseError",
            GatewayError::EmptyDocument(_) => "EmptyDocumentError",
            GatewayError::Store(_) => "StoreError",
            #[cfg(feature = "redis")]
            GatewayError::Redis(_) => "StoreError",
            GatewayError::Notify(_) => "NotifyError",
            GatewayError::NotifyTimeout(_) => "NotifyTimeout",
            GatewayError::Timeout(_) => "Timeout",
            GatewayError::NotFound(_) => "NotFound",
            GatewayError::Config(_) => "ConfigError",
            GatewayError::HttpClient(_)
            | GatewayError::Serialization(_)
            | GatewayError::Yaml(_)
            | GatewayError::Io(_)
            | GatewayError::Internal(_) => "InternalError",
        }
    }

    /// Build the `{status, message, code}` body for this error
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status_code().as_u16(),
            message: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(ValidationError::BadCredential) => StatusCode::UNAUTHORIZED,
            GatewayError::Validation(_) | GatewayError::Fetch(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::NotifyTimeout(_) | GatewayError::Timeout(_) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

/// Error response format; `status` mirrors the HTTP code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    pub code: String,
}

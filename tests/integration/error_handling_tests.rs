//! Error handling integration tests
//!
//! Checks status codes, error codes and the `{status, message, code}` body.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use ingest_gateway::core::ingest::JobResponse;
    use ingest_gateway::{GatewayError, ValidationError};
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        let cases = [
            (GatewayError::from(ValidationError::BadCredential), 401),
            (GatewayError::from(ValidationError::MissingSource), 400),
            (GatewayError::from(ValidationError::InvalidBatchSize("0".into())), 400),
            (GatewayError::fetch("404 from origin"), 400),
            (GatewayError::parse("couldn't parse document"), 500),
            (GatewayError::empty_document("nothing"), 500),
            (GatewayError::store("down"), 500),
            (GatewayError::notify("rejected"), 500),
            (GatewayError::notify_timeout("no consumer"), 504),
            (GatewayError::timeout("too slow"), 504),
            (GatewayError::not_found("job"), 404),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code().as_u16(), status, "{error}");
            assert_eq!(error.to_body().status, status);
        }
    }

    #[test]
    fn test_client_errors() {
        assert!(GatewayError::fetch("x").is_client_error());
        assert!(GatewayError::from(ValidationError::MissingSource).is_client_error());
        assert!(!GatewayError::store("x").is_client_error());
    }

    #[test]
    fn test_error_body_carries_message_verbatim() {
        let error = GatewayError::from(ValidationError::BadCredential);
        let response = JobResponse::from_error(&error);

        assert_eq!(response.status, 401);
        assert_eq!(
            response.body,
            json!({"status": 401, "message": error.to_string(), "code": "BadCredential"})
        );
        assert!(!response.is_success());
    }

    #[test]
    fn test_validation_codes_are_stable() {
        let codes: Vec<&str> = [
            ValidationError::MissingSource,
            ValidationError::AmbiguousSource(vec!["file", "url"]),
            ValidationError::MissingFilename("text"),
            ValidationError::BadCredential,
        ]
        .iter()
        .map(ValidationError::kind)
        .collect();

        assert_eq!(
            codes,
            vec!["MissingSource", "AmbiguousSource", "MissingFilename", "BadCredential"]
        );
    }
}

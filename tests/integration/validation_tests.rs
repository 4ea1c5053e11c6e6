//! Request validation tests
//!
//! Covers the rules a raw request passes before any I/O.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use ingest_gateway::core::ingest::{
        DEFAULT_UPLOAD_FILENAME, IngestSource, RawIngestRequest, RequestValidator, UploadedFile,
    };
    use ingest_gateway::ValidationError;
    use serde_json::json;

    const KEY: &str = "secret";

    fn validator() -> RequestValidator {
        RequestValidator::new(KEY, 5)
    }

    fn raw(body: serde_json::Value) -> RawIngestRequest {
        let mut raw: RawIngestRequest = serde_json::from_value(body).unwrap();
        raw.api_key = Some(KEY.to_string());
        raw
    }

    #[test]
    fn test_credential_checked_before_anything_else() {
        let mut request = raw(json!({"text": "a", "url": "https://x"}));
        request.api_key = Some("nope".to_string());
        assert_eq!(
            validator().validate(request).unwrap_err(),
            ValidationError::BadCredential
        );

        let mut request = raw(json!({}));
        request.api_key = None;
        assert_eq!(
            validator().validate(request).unwrap_err(),
            ValidationError::BadCredential
        );
    }

    #[test]
    fn test_source_selection() {
        let err = validator().validate(raw(json!({"filename": "a"}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingSource);

        let err = validator()
            .validate(raw(json!({"text": "a", "url": "https://x", "filename": "a"})))
            .unwrap_err();
        assert_eq!(err, ValidationError::AmbiguousSource(vec!["url", "text"]));

        // empty strings count as absent
        let request = assert_ok!(
            validator().validate(raw(json!({"text": "a", "url": "", "filename": "a"})))
        );
        assert_eq!(request.source, IngestSource::Text("a".to_string()));
    }

    #[test]
    fn test_filename_rules() {
        let err = validator().validate(raw(json!({"url": "https://x/doc.pdf"}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFilename("url"));

        let mut upload = raw(json!({}));
        upload.file = Some(UploadedFile {
            filename: None,
            bytes: Bytes::from_static(b"data"),
        });
        let request = assert_ok!(validator().validate(upload));
        assert_eq!(request.filename, DEFAULT_UPLOAD_FILENAME);

        let mut upload = raw(json!({"filename": "override.pdf"}));
        upload.file = Some(UploadedFile {
            filename: Some("original.pdf".to_string()),
            bytes: Bytes::from_static(b"data"),
        });
        let request = assert_ok!(validator().validate(upload));
        assert_eq!(request.filename, "original.pdf");
    }

    #[test]
    fn test_json_fields_accept_objects_and_strings() {
        let request = assert_ok!(validator().validate(raw(json!({
            "text": "a",
            "filename": "a.txt",
            "extra_metadata": "{\"tenant\": \"acme\"}",
            "unstructured_args": {"strategy": "fast"},
            "batch_size": "3",
        }))));
        assert_eq!(request.extra_metadata["tenant"], json!("acme"));
        assert_eq!(request.parse_options["strategy"], json!("fast"));
        assert_eq!(request.batch_size, 3);

        let err = validator()
            .validate(raw(json!({"text": "a", "filename": "a", "extra_metadata": "[1, 2]"})))
            .unwrap_err();
        assert_eq!(err.kind(), "MalformedJSON");
    }

    #[test]
    fn test_batch_size_must_be_positive() {
        for bad in [json!(0), json!(-2), json!("many"), json!(1.5)] {
            let err = validator()
                .validate(raw(json!({"text": "a", "filename": "a", "batch_size": bad})))
                .unwrap_err();
            assert!(matches!(err, ValidationError::InvalidBatchSize(_)), "{bad}");
        }

        let request = assert_ok!(validator().validate(raw(json!({"text": "a", "filename": "a"}))));
        assert_eq!(request.batch_size, 5);
    }
}

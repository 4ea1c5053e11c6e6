//! Completion relay integration tests
//!
//! A wiremock server stands in for the notification relay.

#[cfg(test)]
mod tests {
    use crate::common::{
        ChunkFactory, CountingStore, FailingFetcher, RequestFactory, ScriptedPartitioner,
    };
    use ingest_gateway::config::NotifyConfig;
    use ingest_gateway::core::ingest::{IngestPipeline, PipelineSettings};
    use ingest_gateway::core::notify::RelayNotifier;
    use ingest_gateway::core::partition::MimeDetector;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn relay_pipeline(
        server: &MockServer,
        chunks: usize,
        job_timeout: Duration,
    ) -> IngestPipeline {
        let notifier = RelayNotifier::new(&NotifyConfig {
            base_url: Some(format!("{}/notify", server.uri())),
            token: Some("relay-token".to_string()),
            ..Default::default()
        })
        .unwrap()
        .with_retry_delay(Duration::from_millis(20));

        let settings = PipelineSettings {
            job_timeout,
            ..Default::default()
        };

        IngestPipeline::new(
            Arc::new(ScriptedPartitioner::returning(ChunkFactory::unpaged(chunks))),
            Arc::new(MimeDetector::new()),
            Arc::new(FailingFetcher),
            Arc::new(CountingStore::default()),
            settings,
        )
        .with_notifier(Arc::new(notifier))
    }

    #[tokio::test]
    async fn test_result_relayed_once_consumer_waits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notify/job-7"))
            .and(header("authorization", "Bearer relay-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiters": 0})))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/notify/job-7"))
            .and(body_string_contains("results_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiters": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let pipeline = relay_pipeline(&server, 3, Duration::from_secs(10)).await;
        let mut request = RequestFactory::text("body", "note.txt");
        request.notify_id = Some("job-7".to_string());

        let response = pipeline.execute_with_timeout(&request).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["total_chunks"], json!(3));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 3);
        let relayed: Value = serde_json::from_slice(&received[2].body).unwrap();
        assert_eq!(relayed, response.body);
    }

    #[tokio::test]
    async fn test_failed_job_is_relayed_too() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notify/job-8"))
            .and(body_string_contains("EmptyDocumentError"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiters": 2})))
            .expect(1)
            .mount(&server)
            .await;

        let pipeline = relay_pipeline(&server, 0, Duration::from_secs(10)).await;
        let mut request = RequestFactory::text("   ", "blank.txt");
        request.notify_id = Some("job-8".to_string());

        let response = pipeline.execute_with_timeout(&request).await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body["code"], json!("EmptyDocumentError"));
    }

    #[tokio::test]
    async fn test_relay_rejection_replaces_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let pipeline = relay_pipeline(&server, 1, Duration::from_secs(10)).await;
        let mut request = RequestFactory::text("body", "note.txt");
        request.notify_id = Some("job-9".to_string());

        let response = pipeline.execute_with_timeout(&request).await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body["code"], json!("NotifyError"));
    }

    #[tokio::test]
    async fn test_nobody_waiting_ends_at_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waiters": 0})))
            .mount(&server)
            .await;

        let pipeline = relay_pipeline(&server, 1, Duration::from_millis(300)).await;
        let mut request = RequestFactory::text("body", "note.txt");
        request.notify_id = Some("job-10".to_string());

        let response = pipeline.execute_with_timeout(&request).await;
        assert_eq!(response.status, 504);
        assert!(server.received_requests().await.unwrap().len() >= 2);
    }
}

//! Pipeline integration tests
//!
//! Runs whole documents through the pipeline with the real detector and an
//! in-memory store.

#[cfg(test)]
mod tests {
    use crate::common::{
        ChunkFactory, CountingStore, FailingFetcher, RequestFactory, ScriptedPartitioner,
    };
    use ingest_gateway::core::ingest::{IngestPipeline, PipelineSettings};
    use ingest_gateway::core::partition::{HttpFetcher, MimeDetector, TextPartitioner};
    use ingest_gateway::{GatewayError, ParsedChunk};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    fn pipeline(
        partitioner: Arc<ScriptedPartitioner>,
        store: Arc<CountingStore>,
    ) -> IngestPipeline {
        IngestPipeline::new(
            partitioner,
            Arc::new(MimeDetector::new()),
            Arc::new(FailingFetcher),
            store,
            PipelineSettings::default(),
        )
    }

    fn stored_batch(store: &CountingStore, key: &str) -> Vec<ParsedChunk> {
        let raw = store.inner.get(key).expect("batch missing");
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_pdf_upload_batches_in_order() {
        let partitioner = Arc::new(ScriptedPartitioner::returning(ChunkFactory::paged(12, 2)));
        let store = Arc::new(CountingStore::default());
        let pipeline = pipeline(partitioner.clone(), store.clone());

        let request = RequestFactory::upload(b"%PDF-1.7 fake", "report.pdf", 5);
        let result = assert_ok!(pipeline.run(&request).await);

        assert_eq!(result.metadata.filetype, "application/pdf");
        assert_eq!(result.metadata.size_in_bytes, 13);
        assert_eq!(result.total_chunks, 12);
        assert_eq!(result.total_batches, 3);
        assert_eq!(result.total_pages, Some(2));
        assert_eq!(partitioner.calls(), 1);
        assert_eq!(store.writes(), 3);

        let sizes: Vec<usize> = (0..3)
            .map(|i| stored_batch(&store, &format!("results_{}_{}", result.results_id, i)).len())
            .collect();
        assert_eq!(sizes, vec![5, 5, 2]);

        let first = stored_batch(&store, &format!("results_{}_0", result.results_id));
        assert_eq!(first[0].text, "chunk 0 body");
        assert_eq!(
            result.batch_key_template,
            format!("results_{}_{{batch_index}}", result.results_id)
        );
    }

    #[tokio::test]
    async fn test_characters_summed_over_chunks() {
        let chunks = vec![
            ParsedChunk::new("héllo"),
            ParsedChunk::new(""),
            ParsedChunk::new("abc"),
        ];
        let store = Arc::new(CountingStore::default());
        let pipeline = pipeline(Arc::new(ScriptedPartitioner::returning(chunks)), store);

        let result = assert_ok!(pipeline.run(&RequestFactory::text("ignored", "t.txt")).await);
        assert_eq!(result.total_characters, 8);
        assert_eq!(result.total_pages, None);
        assert_eq!(result.total_batches, 1);
    }

    #[tokio::test]
    async fn test_each_run_gets_fresh_results_id() {
        let store = Arc::new(CountingStore::default());
        let pipeline = pipeline(
            Arc::new(ScriptedPartitioner::returning(ChunkFactory::unpaged(1))),
            store.clone(),
        );

        let request = RequestFactory::text("same", "same.txt");
        let a = assert_ok!(pipeline.run(&request).await);
        let b = assert_ok!(pipeline.run(&request).await);

        assert_ne!(a.results_id, b.results_id);
        assert_eq!(store.inner.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_document_writes_nothing() {
        let store = Arc::new(CountingStore::default());
        let pipeline = pipeline(Arc::new(ScriptedPartitioner::returning(vec![])), store.clone());

        let err = assert_err!(pipeline.run(&RequestFactory::text("   ", "blank.txt")).await);
        assert!(matches!(err, GatewayError::EmptyDocument(_)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_keeps_written_batches() {
        let store = Arc::new(CountingStore::failing_after(1));
        let pipeline = pipeline(
            Arc::new(ScriptedPartitioner::returning(ChunkFactory::unpaged(11))),
            store.clone(),
        );

        let err = assert_err!(pipeline.run(&RequestFactory::text("x", "x.txt")).await);
        assert!(matches!(err, GatewayError::Store(_)));
        assert_eq!(store.writes(), 2);
        assert_eq!(store.inner.len(), 1);
        assert!(store.inner.keys()[0].ends_with("_0"));
    }

    #[tokio::test]
    async fn test_unreachable_url_is_fetch_error() {
        let store = Arc::new(CountingStore::default());
        let pipeline = pipeline(
            Arc::new(ScriptedPartitioner::returning(ChunkFactory::unpaged(1))),
            store.clone(),
        );

        let response = pipeline
            .execute_with_timeout(&RequestFactory::url("https://nowhere.invalid/doc", "doc.pdf"))
            .await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["code"], json!("SourceFetchError"));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_text_partitioner_end_to_end() {
        let store = Arc::new(CountingStore::default());
        let pipeline = IngestPipeline::new(
            Arc::new(TextPartitioner::new()),
            Arc::new(MimeDetector::new()),
            Arc::new(HttpFetcher::new(Duration::from_secs(1)).unwrap()),
            store.clone(),
            PipelineSettings::default(),
        );

        let mut request = RequestFactory::text("page one\x0cpage two\x0cpage three", "pages.txt");
        request.batch_size = 2;
        request
            .extra_metadata
            .insert("source".to_string(), Value::from("crm"));

        let response = pipeline.execute_with_timeout(&request).await;
        assert!(response.is_success());
        assert_eq!(response.body["status"], json!(200));
        assert_eq!(response.body["total_pages"], json!(3));
        assert_eq!(response.body["total_batches"], json!(2));
        assert_eq!(response.body["metadata"]["filetype"], json!("text/plain"));

        let results_id = response.body["results_id"].as_str().unwrap();
        let last = stored_batch(&store, &format!("results_{}_1", results_id));
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].text, "page three");
        assert_eq!(last[0].metadata["source"], json!("crm"));
    }
}

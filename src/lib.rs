//! # Ingest Gateway
//!
//! A document-ingestion HTTP service. It accepts a file upload, a URL or raw
//! text, partitions the document into chunks, stores the chunks in batches
//! under `results_<results_id>_<index>`, and reports completion inline, by
//! polling, or through a notification relay.
//!
//! ## Routes
//!
//! - `POST /ingest` runs inline, or in the background when a `notify_id` is given
//! - `POST /ingest/async` always runs in the background
//! - `GET /ingest/results/{job_id}` polls a background job
//! - `GET /health`
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use ingest_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Some("config/gateway.yaml".as_ref())).await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::ingest::{
    IngestPipeline, IngestionRequest, IngestionResult, JobResponse, ParsedChunk, RequestValidator,
};
pub use utils::error::{GatewayError, Result, ValidationError};

use tracing::info;

/// The ingest gateway: configuration plus a ready HTTP server
pub struct Gateway {
    server: server::server::HttpServer,
}

impl Gateway {
    /// Connect the result store and build the server
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");
        let server = server::server::HttpServer::new(&config).await?;
        Ok(Self { server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting ingest gateway");
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! HTTP route handlers

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::warn;

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store = state.pipeline().store();
    let (status, store_status) = match store.health_check().await {
        Ok(()) => ("healthy", "ok"),
        Err(e) => {
            warn!(store = store.name(), error = %e, "Result store health check failed");
            ("degraded", "unavailable")
        }
    };

    let body = json!({
        "status": status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "store": {
            "backend": store.name(),
            "status": store_status,
        }
    });

    if status == "healthy" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

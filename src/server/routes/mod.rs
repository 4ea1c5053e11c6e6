//! HTTP route modules

pub mod ingest;

use crate::core::ingest::JobResponse;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

/// Reply with a job's own status and body
pub(crate) fn job_response(response: JobResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(response.body)
}

/// 202 for a job that now runs in the background
pub(crate) fn dispatched(job_id: Uuid) -> HttpResponse {
    HttpResponse::Accepted().json(json!({
        "status": 202,
        "job_id": job_id.to_string(),
        "message": format!("poll /ingest/results/{}", job_id),
    }))
}

//! Ingest endpoints
//!
//! The credential is checked before the body is read, so a bad key never
//! costs an upload or a parse.

use super::{dispatched, job_response};
use crate::core::ingest::{IngestionRequest, RawIngestRequest, UploadedFile};
use crate::core::jobs::JobPoll;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result, ValidationError};
use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use bytes::BytesMut;
use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, info};

/// Configure ingest routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ingest")
            .route("", web::post().to(ingest))
            .route("/async", web::post().to(ingest_async))
            .route("/results/{job_id}", web::get().to(poll_result)),
    );
}

/// Ingest a document
///
/// Runs inline and returns the result, unless the request carries a
/// `notify_id`, in which case the job runs in the background and the result
/// goes to the relay.
async fn ingest(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let request = read_request(&state, &req, payload).await?;

    if request.notify_id.is_some() {
        let job_id = state.jobs.dispatch(request).await;
        return Ok(dispatched(job_id));
    }

    info!(filename = %request.filename, source = request.source.kind(), "Ingesting inline");
    let response = state.pipeline().execute_with_timeout(&request).await;
    Ok(job_response(response))
}

/// Always dispatch a background job
async fn ingest_async(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let request = read_request(&state, &req, payload).await?;
    let job_id = state.jobs.dispatch(request).await;
    Ok(dispatched(job_id))
}

/// Non-blocking job lookup
async fn poll_result(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.authorize(&req)?;
    let job_id = path.into_inner();

    match state.jobs.poll(&job_id).await {
        JobPoll::Finished(response) => Ok(job_response(response)),
        JobPoll::Pending => Ok(HttpResponse::Accepted()
            .insert_header(("x-job-status", "in-progress"))
            .finish()),
        JobPoll::NotFound => Err(GatewayError::not_found(format!("job '{}'", job_id))),
    }
}

/// Authorize, read the body in whichever form it came, and validate
async fn read_request(
    state: &AppState,
    req: &HttpRequest,
    payload: web::Payload,
) -> Result<IngestionRequest> {
    let api_key = state.api_key(req).map(str::to_string);
    state.validator.check_credential(api_key.as_deref())?;

    let limit = state.config().server().max_body_size;
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let mut raw = if is_multipart {
        read_multipart(Multipart::new(req.headers(), payload), limit).await?
    } else {
        let body = read_body(payload, limit).await?;
        serde_json::from_slice::<RawIngestRequest>(&body)
            .map_err(|e| ValidationError::malformed_json("body", e))?
    };
    raw.api_key = api_key;

    let request = state.validator.validate(raw)?;
    debug!(
        filename = %request.filename,
        batch_size = request.batch_size,
        notify = request.notify_id.is_some(),
        "Request validated"
    );
    Ok(request)
}

async fn read_body(mut payload: web::Payload, limit: usize) -> Result<BytesMut> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| unreadable_body(e.to_string()))?;
        if body.len() + chunk.len() > limit {
            return Err(unreadable_body(format!("body exceeds {} bytes", limit)).into());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

async fn read_multipart(mut payload: Multipart, limit: usize) -> Result<RawIngestRequest> {
    let mut raw = RawIngestRequest::default();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| unreadable_body(format!("invalid multipart data: {}", e)))?;

        let Some(name) = field.name().map(str::to_string) else {
            drain(&mut field).await?;
            continue;
        };

        match name.as_str() {
            "file" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_string);
                let bytes = read_field(&mut field, limit).await?;
                raw.file = Some(UploadedFile {
                    filename,
                    bytes: bytes.freeze(),
                });
            }
            "url" => raw.url = Some(read_text(&mut field, limit).await?),
            "text" => raw.text = Some(read_text(&mut field, limit).await?),
            "filename" => raw.filename = Some(read_text(&mut field, limit).await?),
            "notify_id" => raw.notify_id = Some(read_text(&mut field, limit).await?),
            "extra_metadata" => {
                raw.extra_metadata = Some(Value::String(read_text(&mut field, limit).await?))
            }
            "unstructured_args" => {
                raw.unstructured_args = Some(Value::String(read_text(&mut field, limit).await?))
            }
            "batch_size" => {
                raw.batch_size = Some(Value::String(read_text(&mut field, limit).await?))
            }
            _ => drain(&mut field).await?,
        }
    }

    Ok(raw)
}

async fn read_field(field: &mut Field, limit: usize) -> Result<BytesMut> {
    let mut data = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| unreadable_body(format!("error reading upload: {}", e)))?;
        if data.len() + chunk.len() > limit {
            return Err(unreadable_body(format!("upload exceeds {} bytes", limit)).into());
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_text(field: &mut Field, limit: usize) -> Result<String> {
    let data = read_field(field, limit).await?;
    String::from_utf8(data.to_vec())
        .map_err(|e| unreadable_body(format!("form field is not UTF-8: {}", e)).into())
}

async fn drain(field: &mut Field) -> Result<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| unreadable_body(e.to_string()))?;
    }
    Ok(())
}

fn unreadable_body(reason: impl ToString) -> ValidationError {
    ValidationError::malformed_json("body", reason)
}

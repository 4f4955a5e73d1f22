//! Structured request/response logging.
//!
//! Responsibility:
//! - One "request started" line and one completion line per request
//! - Completion level follows the status code (5xx error, 4xx warn, else info)
//! - Correlate with the request id assigned upstream (x-request-id)
//! - Surface the error code of failed responses via `ErrorMeta`
//!
//! Health probes are skipped so they do not flood the log.

use std::time::Instant;

use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ErrorMeta;
use crate::middleware::SKIP_PATHS;

pub async fn log(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if SKIP_PATHS.contains(&path.as_str()) {
        return next.run(req).await;
    }

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = req.method().clone();
    let query = req.uri().query().map(str::to_string);
    let client_ip = client_ip(req.headers());
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    tracing::info!(
        %request_id,
        %method,
        %path,
        query = query.as_deref().unwrap_or(""),
        client_ip = client_ip.as_deref().unwrap_or("unknown"),
        user_agent = user_agent.as_deref().unwrap_or(""),
        "request started"
    );

    let start = Instant::now();
    let response = next.run(req).await;
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    let status = response.status();
    let error_code = response
        .extensions()
        .get::<ErrorMeta>()
        .map(|meta| meta.code)
        .unwrap_or("");

    if status.is_server_error() {
        tracing::error!(
            %request_id,
            %method,
            %path,
            status = status.as_u16(),
            duration_ms,
            error_code,
            "request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            %request_id,
            %method,
            %path,
            status = status.as_u16(),
            duration_ms,
            error_code,
            "request rejected"
        );
    } else {
        tracing::info!(
            %request_id,
            %method,
            %path,
            status = status.as_u16(),
            duration_ms,
            "request completed"
        );
    }

    response
}

/// Prefer forwarded headers (reverse-proxy setups), first entry wins.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        && let Some(first) = forwarded.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//! HTTP-level middleware (cross-cutting concerns).
//!
//! This module is for transport/infrastructure concerns that apply to all
//! routes, regardless of API version.
//!
//! Responsibility:
//! - Request-Id generation + propagation (x-request-id)
//! - Access logging (request_log) and request tracing (TraceLayer)
//! - Body size limits
//! - Global timeouts
//!
//! Limits and timeouts come from `Config`; see `config.rs` for defaults.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use axum::{Json, middleware as axum_middleware};
use chrono::Utc;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{ErrorBody, ErrorResponse};
use crate::middleware::request_log;

/// Apply HTTP-level middleware to the given Router.
///
/// Layer order (outermost first): request-id set/propagate, trace, access
/// log, error conversion, body limit, timeout.
pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(TraceLayer::new_for_http())
        // Structured start/completion lines, outside the fallible layers so
        // timeouts still produce a completion record.
        .layer(axum_middleware::from_fn(request_log::log))
        // Make the service below infallible by converting errors into the
        // standard JSON error envelope.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            let (status, code, message) = if err.is::<tower::timeout::error::Elapsed>() {
                (
                    StatusCode::REQUEST_TIMEOUT,
                    "REQUEST_TIMEOUT",
                    "request took too long to process".to_string(),
                )
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "an unexpected error occurred".to_string(),
                )
            };

            (
                status,
                Json(ErrorResponse {
                    error: ErrorBody {
                        code,
                        message,
                        details: None,
                        timestamp: Utc::now(),
                    },
                }),
            )
        }))
        .layer(RequestBodyLimitLayer::new(config.request_body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )));

    router.layer(layers)
}

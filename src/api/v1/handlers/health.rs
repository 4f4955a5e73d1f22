/*
 * Responsibility
 * - GET /health (liveness probe)
 * - Intentionally outside the logging/claim middleware skip lists' scope:
 *   probes must stay cheap and quiet
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "message": "API is running"})),
    )
}

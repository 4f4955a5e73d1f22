/*
 * Responsibility
 * - GET /me: introspection of what the middleware chain produced
 *   (request id from the request-id layer, identity from the claim parser)
 * - Anonymous requests get a valid 200 with authenticated=false
 */
use axum::{Json, http::HeaderMap};
use serde_json::{Value, json};

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::{CurrentUser, RequireAuth};
use crate::error::AppError;

pub async fn me(headers: HeaderMap, CurrentUser(ctx): CurrentUser) -> Json<MeResponse> {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Json(MeResponse {
        request_id,
        authenticated: ctx.is_authenticated(),
        user_id: ctx.user_id,
        username: ctx.username,
        email: ctx.email,
        roles: ctx.roles,
        permissions: ctx.permissions,
        token_type: ctx.token_type,
        expires_at: ctx.expires_at,
    })
}

/// The full (unverified) claim set; requires an authenticated context.
pub async fn my_claims(RequireAuth(ctx): RequireAuth) -> Json<Value> {
    Json(json!({"claims": ctx.raw_claims}))
}

/// Role-gated route: 401 when anonymous, 403 without the admin role.
pub async fn admin_area(RequireAuth(ctx): RequireAuth) -> Result<Json<Value>, AppError> {
    if !ctx.has_role("admin") {
        return Err(AppError::Forbidden("role 'admin' required".to_string()));
    }

    Ok(Json(json!({
        "message": "welcome to the admin area",
        "user_id": ctx.user_id,
    })))
}

/*
 * Responsibility
 * - /errors/... demonstration routes: one per row of the error mapping table
 * - Exercises the centralized AppError -> HTTP response conversion end to end
 */
use anyhow::Context as _;
use axum::{
    Json,
    extract::{Query, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::v1::dto::errors::ProbeRequest;
use crate::error::AppError;

pub async fn validation() -> Result<Json<Value>, AppError> {
    Err(AppError::validation_with(
        "this is a demonstration validation error",
        json!({"field": "demo_field", "value": "invalid_value"}),
    ))
}

pub async fn business_logic() -> Result<Json<Value>, AppError> {
    Err(AppError::business_logic("business rule violation")
        .with_details(json!({"rule": "demo_rule", "violation": "demo_violation"})))
}

pub async fn resource_not_found() -> Result<Json<Value>, AppError> {
    Err(AppError::not_found("demo resource not found")
        .with_details(json!({"resource_id": "demo_123", "resource_type": "demo"})))
}

pub async fn database() -> Result<Json<Value>, AppError> {
    Err(AppError::database("database connection failed")
        .with_details(json!({"operation": "select", "table": "demo_table"})))
}

pub async fn external_service() -> Result<Json<Value>, AppError> {
    Err(AppError::external_service("external API is unavailable")
        .with_details(json!({"service": "demo_api", "endpoint": "/demo"})))
}

/// An error nobody mapped: the handler trips over ordinary code and the
/// `From<anyhow::Error>` conversion collapses it to INTERNAL_SERVER_ERROR.
pub async fn unexpected() -> Result<Json<Value>, AppError> {
    let result = 1u32
        .checked_div(0)
        .context("attempted to divide by zero")?;
    Ok(Json(json!({"result": result})))
}

#[derive(Debug, Deserialize)]
pub struct PickParams {
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "validation".to_string()
}

/// Select an error variant by query parameter, e.g. `/errors/pick?kind=database`.
pub async fn pick(Query(params): Query<PickParams>) -> Result<Json<Value>, AppError> {
    match params.kind.as_str() {
        "validation" => Err(AppError::validation("picked validation error")),
        "business" => Err(AppError::business_logic("picked business logic error")),
        "not-found" => Err(AppError::not_found("picked missing resource")),
        "database" => Err(AppError::database("picked database error")),
        "external" => Err(AppError::external_service("picked external service error")),
        other => Err(anyhow::anyhow!("unknown error kind: {other}").into()),
    }
}

/// Body-validated route: malformed JSON and field violations both surface as
/// 422 VALIDATION_ERROR with details, instead of axum's default rejection.
pub async fn payload(
    payload: Result<Json<ProbeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::validation_with(
            "request body is not a valid JSON payload",
            json!({"reason": rejection.body_text()}),
        )
    })?;

    req.validate().map_err(|errors| {
        AppError::validation_with(
            "request validation failed",
            json!({"validation_errors": errors}),
        )
    })?;

    Ok(Json(json!({"message": "validation passed", "data": req})))
}

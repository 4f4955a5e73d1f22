//! Unverified JWT claim extraction - core logic.
//!
//! The upstream gateway verifies token signatures before requests reach this
//! service, so we only decode the payload segment and read claims out of it.
//! Nothing here rejects a request; callers treat every error as "anonymous".
//!
//! This module is intentionally "core-only": it does not know about axum
//! requests or headers. The middleware calls `decode_claims` and
//! `user_context_from_claims` and decides what to do with the outcome.

use base64::Engine as _;
use serde_json::{Map, Value};

use crate::api::v1::extractors::UserContext;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("token is not a three-segment JWT")]
    MalformedToken,
    #[error("payload segment is not valid base64url: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),
    #[error("payload is not valid JSON: {0}")]
    PayloadJson(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    PayloadShape,
}

/// Decode the payload segment of a JWT without verifying the signature.
///
/// The signature segment must be present (three segments total) but its
/// content is never inspected.
pub fn decode_claims(token: &str) -> Result<Map<String, Value>, DecodeError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(DecodeError::MalformedToken),
    };

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(payload)?;
    let value: Value = serde_json::from_slice(&bytes)?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::PayloadShape),
    }
}

/// Build a `UserContext` from raw claims.
///
/// Claim sources, first present wins:
/// - roles: `roles` | `realm_access.roles` (Keycloak) | `groups`
/// - permissions: `permissions` | OAuth2 `scope` (space-delimited)
/// - username: `preferred_username` | `username`
/// - token type: `typ` | `token_type`
///
/// `exp` is surfaced but never enforced; token lifetime is the gateway's
/// problem.
pub fn user_context_from_claims(claims: &Map<String, Value>) -> UserContext {
    let roles = if let Some(value) = claims.get("roles") {
        string_list(value)
    } else if let Some(value) = claims.get("realm_access").and_then(|ra| ra.get("roles")) {
        string_list(value)
    } else if let Some(value) = claims.get("groups") {
        string_list(value)
    } else {
        Vec::new()
    };

    let permissions = if let Some(value) = claims.get("permissions") {
        string_list(value)
    } else if let Some(value) = claims.get("scope") {
        match value {
            Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
            other => string_list(other),
        }
    } else {
        Vec::new()
    };

    UserContext {
        user_id: scalar_claim(claims.get("sub")),
        username: scalar_claim(claims.get("preferred_username"))
            .or_else(|| scalar_claim(claims.get("username"))),
        email: scalar_claim(claims.get("email")),
        roles,
        permissions,
        token_type: scalar_claim(claims.get("typ"))
            .or_else(|| scalar_claim(claims.get("token_type"))),
        issued_at: claims.get("iat").and_then(Value::as_i64),
        expires_at: claims.get("exp").and_then(Value::as_i64),
        raw_claims: Some(Value::Object(claims.clone())),
    }
}

/// Scalar claims may arrive as strings or numbers; anything else is ignored.
fn scalar_claim(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a claim into a list of strings.
///
/// Accepts a JSON array of scalars, a comma- or space-separated string, or a
/// lone scalar. Unusable entries are skipped rather than erroring.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => {
            if s.contains(',') {
                s.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            } else if s.contains(char::is_whitespace) {
                s.split_whitespace().map(str::to_string).collect()
            } else if s.is_empty() {
                Vec::new()
            } else {
                vec![s.clone()]
            }
        }
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(b) => vec![b.to_string()],
        _ => Vec::new(),
    }
}

//! Bearer-token claim parsing → `UserContext` in request extensions.
//!
//! The upstream gateway has already verified the token signature, so this
//! middleware only extracts claims. It is deliberately fail-open: a missing,
//! malformed or undecodable token yields an empty (anonymous) context and the
//! request proceeds normally. Rejecting is the job of handlers/extractors
//! that actually require authentication (`RequireAuth`).

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::UserContext;
use crate::middleware::SKIP_PATHS;
use crate::services::auth::claims;

pub fn apply(router: Router) -> Router {
    router.layer(middleware::from_fn(claims_middleware))
}

async fn claims_middleware(mut req: Request<Body>, next: Next) -> Response {
    if SKIP_PATHS.contains(&req.uri().path()) {
        return next.run(req).await;
    }

    let ctx = match bearer_token(req.headers()) {
        Ok(token) => match claims::decode_claims(token) {
            Ok(raw) => {
                let ctx = claims::user_context_from_claims(&raw);
                tracing::debug!(
                    user_id = ctx.user_id.as_deref().unwrap_or(""),
                    username = ctx.username.as_deref().unwrap_or(""),
                    roles = ?ctx.roles,
                    "jwt claims extracted"
                );
                ctx
            }
            Err(err) => {
                tracing::debug!(error = %err, "jwt claim extraction failed, proceeding as anonymous");
                UserContext::default()
            }
        },
        // No header at all is the normal anonymous case; stay quiet.
        Err(BearerError::MissingHeader) => UserContext::default(),
        Err(err) => {
            tracing::debug!(error = %err, "unusable authorization header, proceeding as anonymous");
            UserContext::default()
        }
    };

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

#[derive(Debug, thiserror::Error)]
enum BearerError {
    #[error("no authorization header")]
    MissingHeader,
    #[error("authorization header is not valid UTF-8")]
    InvalidEncoding,
    #[error("authorization header does not use the Bearer scheme")]
    InvalidScheme,
    #[error("empty bearer token")]
    EmptyToken,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?;
    let value = value.to_str().map_err(|_| BearerError::InvalidEncoding)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(BearerError::InvalidScheme)?
        .trim();

    if token.is_empty() {
        Err(BearerError::EmptyToken)
    } else {
        Ok(token)
    }
}

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::UserContext;

/// Extractor handing the request's `UserContext` to a handler.
/// Never rejects: if the claim middleware did not run, or the request carried
/// no usable token, the context is empty (anonymous).
pub struct CurrentUser(pub UserContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(
            parts.extensions.get::<UserContext>().cloned().unwrap_or_default(),
        ))
    }
}

/// Like `CurrentUser`, but rejects anonymous requests with 401.
pub struct RequireAuth(pub UserContext);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<UserContext>().cloned().unwrap_or_default();
        if ctx.is_authenticated() {
            Ok(RequireAuth(ctx))
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

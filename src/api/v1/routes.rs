/*
 * Responsibility
 * - v1 URL structure
 * - /health, /me, and the /errors demonstration block
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    errors,
    health::health,
    me::{admin_area, me, my_claims},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
        .route("/me/claims", get(my_claims))
        .route("/admin", get(admin_area))
        .route("/errors/validation", get(errors::validation))
        .route("/errors/business-logic", get(errors::business_logic))
        .route("/errors/resource-not-found", get(errors::resource_not_found))
        .route("/errors/database", get(errors::database))
        .route("/errors/external-service", get(errors::external_service))
        .route("/errors/unexpected", get(errors::unexpected))
        .route("/errors/pick", get(errors::pick))
        .route("/errors/payload", post(errors::payload))
}

/*!
 * Request user context extractors
 *
 * Responsibility:
 * - Give handlers access to the per-request identity populated by the JWT
 *   claim middleware
 * - HTTP / axum wiring lives in core; the type (contract) lives in types
 *
 * Public API:
 * - UserContext
 * - CurrentUser (never rejects; empty context for anonymous requests)
 * - RequireAuth (401 when anonymous)
 */

mod core;
mod types;

pub use self::core::{CurrentUser, RequireAuth};
pub use self::types::UserContext;

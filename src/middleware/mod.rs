/*
 * Responsibility
 * - middleware public interface (re-export)
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod request_log;

/// Paths exempt from per-request logging and claim parsing (probes and
/// browser noise). One list so the two filters cannot drift apart.
pub(crate) const SKIP_PATHS: &[&str] = &["/api/v1/health", "/favicon.ico"];

/*
 * Responsibility
 * - Process-level services, kept free of axum types where possible
 */
pub mod auth;

//! demo-api crate
//!
//! A clean async demo backend intended to run behind an API gateway.
//! The gateway terminates authentication; this service extracts JWT claims
//! without verifying signatures and fails open for anonymous requests.
//!
//! ## Endpoints
//! - `GET /` - Welcome
//! - `GET /api/v1/health` - Health Check
//! - `GET /api/v1/me` - Identity introspection (middleware chain output)
//! - `GET /api/v1/errors/*` - Error-handling demonstrations

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

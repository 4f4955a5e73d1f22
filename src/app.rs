/*
 * Responsibility
 * - Config load -> startup validation -> Router assembly
 * - Middleware application (request-id/logging/limits, CORS, claim parsing)
 * - axum::serve() startup
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, error::AppError, middleware, state::AppState};

fn init_tracing(config: &Config) {
    // Prefer RUST_LOG if set; otherwise fall back to the configured level.
    // Ex: RUST_LOG=info,demo_api=debug,tower_http=debug cargo run
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // Human-readable lines for local work, JSON lines everywhere else.
    if config.app_env.is_development() {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    }
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice
        // immediately. In production, prefer the default behavior (stderr)
        // and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);
    init_panic_hook(!config.app_env.is_production());

    // Flat rule checklist, evaluated once. Errors abort before binding.
    let warnings = config.validate().into_result()?;
    for warning in &warnings {
        tracing::warn!(%warning, "configuration warning");
    }

    tracing::info!(
        "starting {} {} in {} mode on {}",
        config.app_name,
        config.version,
        config.app_env.as_str(),
        config.addr
    );

    let addr = config.addr;
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assemble routes + the middleware chain.
///
/// Chain order (outermost first): request-id assignment/propagation ->
/// request/response logging -> body limit/timeout -> CORS -> JWT claim
/// parsing -> handlers.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        .route("/", get(welcome))
        .nest("/api/v1", api::v1::routes())
        .fallback(fallback)
        .with_state(state);

    let router = middleware::auth::claims::apply(router);
    let router = middleware::cors::apply(router, &config);
    middleware::http::apply(router, &config)
}

async fn welcome(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {}!", state.config.app_name),
        "version": state.config.version,
        "environment": state.config.app_env.as_str(),
    }))
}

/// Unknown routes get the same JSON envelope as every other error.
async fn fallback() -> AppError {
    AppError::not_found("the requested route does not exist")
}

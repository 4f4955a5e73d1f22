/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone-cheap (internals behind Arc)
 */
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

//! HTTP API for the call screener

mod handlers;
mod types;

pub use handlers::create_router;

use crate::screener::CallScreener;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub screener: Arc<CallScreener>,
}

impl AppState {
    pub fn new(screener: Arc<CallScreener>) -> Self {
        Self { screener }
    }
}

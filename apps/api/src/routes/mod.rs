pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/benchmark", post(handlers::handle_benchmark))
        .route("/api/v1/elevate", post(handlers::handle_elevate))
        .route("/api/v1/ace", post(handlers::handle_ace))
        .with_state(state)
}

//! HTTP API module
//!
//! Plays the seek control: gestures arrive as requests, the resulting timer
//! snapshot goes back in the response.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/seek/start", post(drag_start_handler))
        .route("/seek/move", post(drag_move_handler))
        .route("/seek/end", post(drag_end_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, SeekFailure},
    tasks::SeekEvent,
};
use super::responses::{ApiResponse, ErrorResponse, HealthResponse, SeekRequest, StatusResponse};

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

async fn forward(state: &AppState, event: SeekEvent, message: &str) -> HandlerResult<ApiResponse> {
    match state.apply_seek(event).await {
        Ok(snapshot) => Ok(Json(ApiResponse::new(message.to_string(), snapshot))),
        Err(SeekFailure::Rejected(e)) => {
            warn!("Rejected {}: {}", event.action_name(), e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
        Err(SeekFailure::Unavailable) => {
            error!("Countdown task is not running, cannot apply {}", event.action_name());
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Countdown is not running".to_string())),
            ))
        }
    }
}

/// Handle POST /seek/start - The user grabbed the seek control
pub async fn drag_start_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let response = forward(&state, SeekEvent::DragStart, "Seek grabbed").await?;
    info!("Drag start handled, timer is {}", response.timer.state);
    Ok(response)
}

/// Handle POST /seek/move - Live drag feedback
pub async fn drag_move_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeekRequest>,
) -> HandlerResult<ApiResponse> {
    let event = SeekEvent::DragMove {
        minutes: request.minutes,
        origin: request.origin,
    };
    forward(&state, event, "Seek moved").await
}

/// Handle POST /seek/end - The user released the seek control
pub async fn drag_end_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeekRequest>,
) -> HandlerResult<ApiResponse> {
    let event = SeekEvent::DragEnd {
        minutes: request.minutes,
    };
    let response = forward(&state, event, "Seek released").await?;
    info!(
        "Drag end at {} minutes handled, timer is {}",
        request.minutes, response.timer.state
    );
    Ok(response)
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_snapshot(),
        max_minutes: state.seek_range.max(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

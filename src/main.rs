//! Seek Timer - a seek-driven interval timer with audio cues
//!
//! This is the main entry point for the seek-timer application.

use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use seek_timer::{
    api::create_router,
    config::Config,
    services::AudioPlayer,
    state::{AppState, Panel},
    tasks::{spawn_countdown, CountdownEvent},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("seek_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting seek-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, max={}min, muted={}",
        config.host, config.port, config.max_minutes, config.mute
    );

    // Start the countdown task that owns the timer controller
    let (panel, _panel_rx) = Panel::new();
    let audio = AudioPlayer::new(config.audio());
    let (events_tx, countdown) = spawn_countdown(panel.clone(), Box::new(audio));

    let state = Arc::new(AppState::new(
        events_tx.clone(),
        panel,
        config.seek_range(),
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /seek/start - Grab the seek control (stops a running countdown)");
    info!("  POST /seek/move  - Preview a duration {{\"minutes\": n}}");
    info!("  POST /seek/end   - Release at a duration {{\"minutes\": n}}");
    info!("  GET  /status     - Current display, seek position and timer state");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app).into_future();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop the ticking cue and the tick schedule before exiting
    if events_tx.send(CountdownEvent::Shutdown).is_ok() {
        countdown.await?;
    }

    info!("Server shutdown complete");
    Ok(())
}

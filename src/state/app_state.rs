//! Shared state handed to the HTTP layer

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::{Panel, Snapshot};
use crate::{
    controller::{SeekError, SeekRange},
    tasks::{CountdownEvent, SeekEvent},
};

/// Application state shared by every request handler.
///
/// Handlers never touch the controller: they validate input against the seek
/// range and forward events to the countdown task that owns it.
#[derive(Debug)]
pub struct AppState {
    /// Inbox of the countdown task
    pub events_tx: mpsc::UnboundedSender<CountdownEvent>,
    /// Read side of the display/seek panel
    pub panel: Panel,
    pub seek_range: SeekRange,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

/// Why a seek event could not be applied
#[derive(Debug)]
pub enum SeekFailure {
    Rejected(SeekError),
    /// The countdown task is no longer running
    Unavailable,
}

impl AppState {
    pub fn new(
        events_tx: mpsc::UnboundedSender<CountdownEvent>,
        panel: Panel,
        seek_range: SeekRange,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            events_tx,
            panel,
            seek_range,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Validate a seek event, hand it to the countdown task and wait for the
    /// resulting snapshot
    pub async fn apply_seek(&self, event: SeekEvent) -> Result<Snapshot, SeekFailure> {
        match event {
            SeekEvent::DragMove { minutes, .. } | SeekEvent::DragEnd { minutes } => {
                self.seek_range.check(minutes).map_err(SeekFailure::Rejected)?;
            }
            SeekEvent::DragStart => {}
        }

        let action = event.action_name();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events_tx
            .send(CountdownEvent::Seek {
                event,
                reply: Some(reply_tx),
            })
            .map_err(|_| SeekFailure::Unavailable)?;

        let snapshot = reply_rx.await.map_err(|_| SeekFailure::Unavailable)?;
        self.record_action(action);
        Ok(snapshot)
    }

    pub fn get_snapshot(&self) -> Snapshot {
        self.panel.current()
    }

    fn record_action(&self, action: &str) {
        debug!("Recording action: {}", action);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

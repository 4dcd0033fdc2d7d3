//! Observable display/seek panel backed by a watch channel

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{Reading, TimerState};
use crate::controller::{DisplaySink, SeekSink};

/// Everything a front end needs to render the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: String,
    pub minutes_text: String,
    pub seconds_text: String,
    pub seek_position: u32,
    pub remaining_ms: Option<u64>,
}

impl Snapshot {
    pub fn new() -> Self {
        let reading = Reading::default();
        Self {
            state: TimerState::Idle.label().to_string(),
            minutes_text: reading.minutes_text(),
            seconds_text: reading.seconds_text(),
            seek_position: 0,
            remaining_ms: None,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Display and seek sink that publishes every change as a [`Snapshot`]
#[derive(Debug, Clone)]
pub struct Panel {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl Panel {
    pub fn new() -> (Self, watch::Receiver<Snapshot>) {
        let (tx, rx) = watch::channel(Snapshot::new());
        (Self { tx: Arc::new(tx) }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Record the controller state after an event has been handled
    pub fn publish_state(&self, state: TimerState) {
        self.tx.send_modify(|snapshot| {
            snapshot.state = state.label().to_string();
            snapshot.remaining_ms = state.remaining().map(|r| r.as_millis());
        });
    }
}

impl DisplaySink for Panel {
    fn show(&mut self, reading: Reading) {
        self.tx.send_modify(|snapshot| {
            snapshot.minutes_text = reading.minutes_text();
            snapshot.seconds_text = reading.seconds_text();
        });
    }
}

impl SeekSink for Panel {
    fn set_position(&mut self, minutes: u32) {
        self.tx.send_modify(|snapshot| snapshot.seek_position = minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RemainingTime;

    #[test]
    fn sinks_and_state_land_in_one_snapshot() {
        let (mut panel, rx) = Panel::new();
        assert_eq!(*rx.borrow(), Snapshot::new());

        let remaining = RemainingTime::from_minutes(5).after_tick();
        panel.show(remaining.reading());
        panel.set_position(remaining.whole_minutes());
        panel.publish_state(TimerState::Running { remaining });

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.state, "running");
        assert_eq!(snapshot.minutes_text, "04'");
        assert_eq!(snapshot.seconds_text, "59");
        assert_eq!(snapshot.seek_position, 4);
        assert_eq!(snapshot.remaining_ms, Some(299_000));

        panel.publish_state(TimerState::Idle);
        assert_eq!(panel.current().remaining_ms, None);
        assert_eq!(panel.current().state, "idle");
    }
}

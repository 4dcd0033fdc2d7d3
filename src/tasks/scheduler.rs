//! Tokio-backed tick driver

use std::{collections::HashMap, time::Duration};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use super::CountdownEvent;
use crate::controller::{Scheduler, TickHandle};

/// Feeds `CountdownEvent::Tick` into the countdown task's inbox.
///
/// Every schedule runs in its own task; cancelling aborts it. A tick that was
/// already queued when the schedule got cancelled still carries the old
/// handle, which the countdown task discards.
#[derive(Debug)]
pub struct TokioScheduler {
    events_tx: mpsc::UnboundedSender<CountdownEvent>,
    next_id: u64,
    running: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(events_tx: mpsc::UnboundedSender<CountdownEvent>) -> Self {
        Self {
            events_tx,
            next_id: 0,
            running: HashMap::new(),
        }
    }

    /// Number of schedules currently alive
    pub fn active(&self) -> usize {
        self.running.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let events_tx = self.events_tx.clone();

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if events_tx.send(CountdownEvent::Tick(handle)).is_err() {
                    debug!("Countdown inbox closed, stopping schedule {}", handle);
                    break;
                }
            }
        });

        self.running.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        match self.running.remove(&handle) {
            Some(task) => task.abort(),
            None => debug!("Cancel for unknown schedule {} ignored", handle),
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.running.drain() {
            task.abort();
        }
    }
}

//! Countdown task: the single event loop that owns the timer controller

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, info};

use super::TokioScheduler;
use crate::{
    controller::{AudioSink, Ports, SeekOrigin, TickHandle, TimerController},
    state::{Panel, Snapshot, TickOutcome},
};

/// Gestures coming from the seek control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekEvent {
    DragStart,
    DragMove { minutes: u32, origin: SeekOrigin },
    DragEnd { minutes: u32 },
}

impl SeekEvent {
    pub fn action_name(&self) -> &'static str {
        match self {
            SeekEvent::DragStart => "drag-start",
            SeekEvent::DragMove { .. } => "drag-move",
            SeekEvent::DragEnd { .. } => "drag-end",
        }
    }
}

/// Everything the countdown task reacts to, handled strictly one at a time
#[derive(Debug)]
pub enum CountdownEvent {
    Seek {
        event: SeekEvent,
        reply: Option<oneshot::Sender<Snapshot>>,
    },
    Tick(TickHandle),
    Shutdown,
}

/// Build a controller wired to `panel`, `audio` and a tokio scheduler, and
/// spawn the task that drives it
pub fn spawn_countdown(
    panel: Panel,
    audio: Box<dyn AudioSink>,
) -> (mpsc::UnboundedSender<CountdownEvent>, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let controller = TimerController::new(Ports {
        seek: Box::new(panel.clone()),
        display: Box::new(panel.clone()),
        audio,
        scheduler: Box::new(TokioScheduler::new(events_tx.clone())),
    });

    let task = tokio::spawn(countdown_task(controller, panel, events_rx));
    (events_tx, task)
}

/// Process countdown events until shutdown, then tear the controller down
pub async fn countdown_task(
    mut controller: TimerController,
    panel: Panel,
    mut events_rx: mpsc::UnboundedReceiver<CountdownEvent>,
) {
    info!("Starting countdown task");

    while let Some(event) = events_rx.recv().await {
        match event {
            CountdownEvent::Seek { event, reply } => {
                debug!("Seek event: {:?}", event);
                match event {
                    SeekEvent::DragStart => controller.on_drag_start(),
                    SeekEvent::DragMove { minutes, origin } => {
                        controller.on_drag_move(minutes, origin)
                    }
                    SeekEvent::DragEnd { minutes } => controller.on_drag_end(minutes),
                }
                panel.publish_state(controller.state());

                if let Some(reply) = reply {
                    // The requester may have gone away; the event still applied
                    let _ = reply.send(panel.current());
                }
            }

            CountdownEvent::Tick(handle) => {
                if controller.active_tick() != Some(handle) {
                    debug!("Dropping tick from cancelled schedule {}", handle);
                    continue;
                }

                if controller.on_tick() == TickOutcome::Completed {
                    info!("Countdown finished, bell requested");
                }
                panel.publish_state(controller.state());
            }

            CountdownEvent::Shutdown => {
                info!("Countdown task received shutdown");
                break;
            }
        }
    }

    controller.on_teardown();
    panel.publish_state(controller.state());
    info!("Countdown task stopped");
}

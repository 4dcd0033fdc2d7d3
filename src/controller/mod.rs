//! Countdown controller
//!
//! Owns the timer state and turns seek gestures and ticks into display,
//! seek-position and audio requests on its collaborators.

pub mod ports;
pub mod range;


use std::time::Duration;

use tracing::{debug, info, warn};

use crate::state::{Reading, RemainingTime, TickOutcome, TimerState, TICK_MILLIS};

pub use ports::{
    AudioCue, AudioSink, DisplaySink, PlayMode, Ports, Scheduler, SeekOrigin, SeekSink,
    TickHandle,
};
pub use range::{SeekError, SeekRange};

pub struct TimerController {
    state: TimerState,
    /// Minutes shown while idle; derived from the remaining time while running
    duration_minutes: u32,
    active_tick: Option<TickHandle>,
    ports: Ports,
}

impl TimerController {
    /// Create an idle controller showing zero minutes
    pub fn new(ports: Ports) -> Self {
        Self {
            state: TimerState::Idle,
            duration_minutes: 0,
            active_tick: None,
            ports,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration_minutes(&self) -> u32 {
        match self.state {
            TimerState::Running { remaining } => remaining.whole_minutes(),
            TimerState::Idle => self.duration_minutes,
        }
    }

    /// Handle of the schedule currently feeding ticks, if any
    pub fn active_tick(&self) -> Option<TickHandle> {
        self.active_tick
    }

    /// The user grabbed the seek control
    pub fn on_drag_start(&mut self) {
        if self.halt() {
            info!("Countdown interrupted by drag at {} minutes", self.duration_minutes);
        }
    }

    /// Live drag feedback; never touches the countdown
    pub fn on_drag_move(&mut self, minutes: u32, origin: SeekOrigin) {
        if origin == SeekOrigin::Programmatic {
            debug!("Ignoring programmatic seek position change to {}", minutes);
            return;
        }
        if self.state.is_running() {
            debug!("Ignoring drag move to {} while running", minutes);
            return;
        }

        self.duration_minutes = minutes;
        self.ports.display.show(Reading::whole_minutes(minutes));
        self.ports.seek.set_position(minutes);
    }

    /// The user released the seek control at `minutes`
    pub fn on_drag_end(&mut self, minutes: u32) {
        if minutes == 0 {
            self.halt();
            self.duration_minutes = 0;
            self.ports.display.show(Reading::default());
            self.ports.seek.set_position(0);
            debug!("Seek released at zero, staying idle");
            return;
        }

        if self.state.is_running() {
            warn!("Countdown restarted without a drag start, replacing the running schedule");
            self.halt();
        }

        let remaining = RemainingTime::from_minutes(minutes);
        self.start_schedule();
        self.state = TimerState::Running { remaining };
        self.duration_minutes = minutes;

        self.ports.display.show(remaining.reading());
        self.ports.seek.set_position(minutes);
        self.ports.audio.start(AudioCue::TickingLoop, PlayMode::Loop);

        info!("Countdown started for {} minutes", minutes);
    }

    /// One tick of the periodic driver has elapsed
    pub fn on_tick(&mut self) -> TickOutcome {
        let TimerState::Running { remaining } = self.state else {
            debug!("Tick while idle, ignoring");
            return TickOutcome::Ignored;
        };

        let remaining = remaining.after_tick();
        self.ports.display.show(remaining.reading());
        self.ports.seek.set_position(remaining.whole_minutes());

        if !remaining.is_zero() {
            self.state = TimerState::Running { remaining };
            debug!("Tick, {} remaining", remaining.reading());
            return TickOutcome::Continued(remaining);
        }

        self.cancel_schedule();
        self.ports.audio.stop(AudioCue::TickingLoop);
        self.ports.audio.start(AudioCue::BellOnce, PlayMode::Once);
        self.state = TimerState::Idle;
        self.duration_minutes = 0;

        info!("Countdown completed");
        TickOutcome::Completed
    }

    /// Release everything before the host goes away
    pub fn on_teardown(&mut self) {
        self.halt();
        self.ports.audio.stop(AudioCue::BellOnce);
        info!("Timer controller torn down");
    }

    /// Stop a running countdown, keeping its last whole minute as the duration.
    /// Returns whether anything was running.
    fn halt(&mut self) -> bool {
        let TimerState::Running { remaining } = self.state else {
            return false;
        };

        self.cancel_schedule();
        self.ports.audio.stop(AudioCue::TickingLoop);
        self.duration_minutes = remaining.whole_minutes();
        self.state = TimerState::Idle;
        true
    }

    fn start_schedule(&mut self) {
        if let Some(stale) = self.active_tick.take() {
            warn!("Tick schedule {} still active at start, cancelling it", stale);
            self.ports.scheduler.cancel(stale);
        }

        let handle = self
            .ports
            .scheduler
            .schedule_repeating(Duration::from_millis(TICK_MILLIS));
        debug!("Tick schedule {} started", handle);
        self.active_tick = Some(handle);
    }

    fn cancel_schedule(&mut self) {
        if let Some(handle) = self.active_tick.take() {
            self.ports.scheduler.cancel(handle);
            debug!("Tick schedule {} cancelled", handle);
        }
    }
}

//! Narrow capability interfaces the controller drives

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::state::Reading;

/// Sound effects the controller can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    TickingLoop,
    BellOnce,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::TickingLoop => "ticking",
            AudioCue::BellOnce => "bell",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Repeat until explicitly stopped
    Loop,
    /// Play a single time, fire-and-forget
    Once,
}

/// Identifies one repeating schedule handed out by a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(pub u64);

impl fmt::Display for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Who moved the seek control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekOrigin {
    #[default]
    User,
    /// An echo of a position the controller itself set
    Programmatic,
}

/// Where the controller sends position updates for the seek control
pub trait SeekSink: Send {
    fn set_position(&mut self, minutes: u32);
}

/// Renders the minutes/seconds pair
pub trait DisplaySink: Send {
    fn show(&mut self, reading: Reading);
}

/// Plays cues. Implementations own the sound assets and report nothing back.
pub trait AudioSink: Send {
    fn start(&mut self, cue: AudioCue, mode: PlayMode);
    fn stop(&mut self, cue: AudioCue);
}

/// Drives the periodic tick.
///
/// `cancel` must take effect before the next firing of that schedule, and
/// cancelling a handle that is no longer active is a no-op.
pub trait Scheduler: Send {
    /// Start a repeating schedule whose first firing is one `period` from now
    fn schedule_repeating(&mut self, period: Duration) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// The four collaborators a controller is built from
pub struct Ports {
    pub seek: Box<dyn SeekSink>,
    pub display: Box<dyn DisplaySink>,
    pub audio: Box<dyn AudioSink>,
    pub scheduler: Box<dyn Scheduler>,
}

//! Timer state structure and countdown arithmetic

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cadence of the countdown in milliseconds
pub const TICK_MILLIS: u64 = 1_000;

const MINUTE_MILLIS: u64 = 60_000;

/// Milliseconds left until the countdown completes.
///
/// Always a whole number of ticks, the only other value being the terminal 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RemainingTime(u64);

impl RemainingTime {
    /// Remaining time for a countdown of `minutes` whole minutes
    pub fn from_minutes(minutes: u32) -> Self {
        Self(u64::from(minutes) * MINUTE_MILLIS)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Remaining time after one more tick, floored at zero
    pub fn after_tick(self) -> Self {
        Self(self.0.saturating_sub(TICK_MILLIS))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole minutes left, which is also where the seek control sits
    pub fn whole_minutes(&self) -> u32 {
        u32::try_from(self.0 / MINUTE_MILLIS).unwrap_or(u32::MAX)
    }

    pub fn reading(&self) -> Reading {
        let seconds = self.0 / TICK_MILLIS;
        Reading {
            minutes: seconds / 60,
            seconds: seconds % 60,
        }
    }
}

/// Countdown state machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running { remaining: RemainingTime },
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    /// Remaining time, defined only while running
    pub fn remaining(&self) -> Option<RemainingTime> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { remaining } => Some(*remaining),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running { .. } => "running",
        }
    }
}

/// Result of feeding one tick to the controller.
///
/// `Completed` is the transient completion state: it is reported here but the
/// controller has already folded back to idle when the caller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The controller was idle, nothing changed
    Ignored,
    Continued(RemainingTime),
    Completed,
}

/// Minutes and seconds as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reading {
    pub minutes: u64,
    pub seconds: u64,
}

impl Reading {
    /// Reading for a whole number of minutes with the seconds at zero
    pub fn whole_minutes(minutes: u32) -> Self {
        Self {
            minutes: u64::from(minutes),
            seconds: 0,
        }
    }

    /// Zero-padded minutes with the trailing minute mark, e.g. `04'`.
    /// Values above 99 keep all their digits.
    pub fn minutes_text(&self) -> String {
        format!("{:02}'", self.minutes)
    }

    pub fn seconds_text(&self) -> String {
        format!("{:02}", self.seconds)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_off_five_minutes_reads_four_fifty_nine() {
        let remaining = RemainingTime::from_minutes(5).after_tick();
        assert_eq!(remaining.as_millis(), 299_000);

        let reading = remaining.reading();
        assert_eq!(reading.minutes_text(), "04'");
        assert_eq!(reading.seconds_text(), "59");
        assert_eq!(remaining.whole_minutes(), 4);
    }

    #[test]
    fn tick_floors_at_zero() {
        let remaining = RemainingTime::from_minutes(0).after_tick();
        assert!(remaining.is_zero());
        assert_eq!(remaining.reading(), Reading::default());
    }

    #[test]
    fn minutes_above_ninety_nine_are_not_truncated() {
        let reading = RemainingTime::from_minutes(125).reading();
        assert_eq!(reading.minutes_text(), "125'");
        assert_eq!(reading.seconds_text(), "00");
        assert_eq!(reading.to_string(), "125:00");
    }

    #[test]
    fn remaining_is_only_defined_while_running() {
        assert_eq!(TimerState::Idle.remaining(), None);
        let running = TimerState::Running {
            remaining: RemainingTime::from_minutes(2),
        };
        assert_eq!(running.remaining(), Some(RemainingTime::from_minutes(2)));
        assert!(running.is_running());
        assert_eq!(running.label(), "running");
    }
}

//! State management module
//!
//! Timer data model, the observable panel, and the state shared with the
//! HTTP layer.

pub mod app_state;
pub mod panel;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, SeekFailure};
pub use panel::{Panel, Snapshot};
pub use timer_state::{Reading, RemainingTime, TickOutcome, TimerState, TICK_MILLIS};

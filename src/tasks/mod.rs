//! Background tasks module
//!
//! The countdown task owns the timer controller; the scheduler feeds it ticks.

pub mod countdown;
pub mod scheduler;

// Re-export main types
pub use countdown::{countdown_task, spawn_countdown, CountdownEvent, SeekEvent};
pub use scheduler::TokioScheduler;

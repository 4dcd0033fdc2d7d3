//! Seek Timer - a seek-driven interval timer
//!
//! A seek control sets a duration in whole minutes, a countdown ticks once a
//! second, and audio cues play while it runs and when it completes. The
//! countdown logic lives in [`controller::TimerController`]; everything else
//! hosts it behind a small local HTTP API.

pub mod api;
pub mod config;
pub mod controller;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controller::TimerController;
pub use state::AppState;
pub use utils::signals::shutdown_signal;

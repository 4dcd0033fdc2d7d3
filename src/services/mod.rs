//! External service module
//!
//! Collaborators backed by the host system, currently audio playback.

pub mod audio;

// Re-export main types
pub use audio::{default_player, play_file, AudioConfig, AudioPlayer};

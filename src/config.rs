//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    controller::SeekRange,
    services::{default_player, AudioConfig},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "seek-timer")]
#[command(about = "A seek-driven interval timer with audio cues")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Largest minute value the seek control accepts
    #[arg(short, long, default_value = "60")]
    pub max_minutes: u32,

    /// Sound file looped while the countdown runs
    #[arg(long)]
    pub ticking_sound: Option<PathBuf>,

    /// Sound file played once when the countdown completes
    #[arg(long)]
    pub bell_sound: Option<PathBuf>,

    /// Command used to play sound files (defaults to afplay on macOS, paplay elsewhere)
    #[arg(long)]
    pub player: Option<String>,

    /// Do not play any sounds
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn seek_range(&self) -> SeekRange {
        SeekRange::new(self.max_minutes)
    }

    pub fn audio(&self) -> AudioConfig {
        AudioConfig {
            player: self
                .player
                .clone()
                .unwrap_or_else(|| default_player().to_string()),
            ticking_sound: self.ticking_sound.clone(),
            bell_sound: self.bell_sound.clone(),
            muted: self.mute,
        }
    }
}

//! Audio cue playback through an external command-line player

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::{
    process::Command,
    task::JoinHandle,
    time::{sleep, Instant},
};
use tracing::{debug, info, warn};

use crate::controller::{AudioCue, AudioSink, PlayMode};

/// Shortest time one pass of a looping cue may take before the next starts
const MIN_LOOP_PASS: Duration = Duration::from_millis(500);

/// Player used when none is configured
pub fn default_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "paplay"
    }
}

/// Which files to play for each cue, and with what
#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub player: String,
    pub ticking_sound: Option<PathBuf>,
    pub bell_sound: Option<PathBuf>,
    pub muted: bool,
}

impl AudioConfig {
    pub fn sound_for(&self, cue: AudioCue) -> Option<&Path> {
        match cue {
            AudioCue::TickingLoop => self.ticking_sound.as_deref(),
            AudioCue::BellOnce => self.bell_sound.as_deref(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            player: default_player().to_string(),
            ticking_sound: None,
            bell_sound: None,
            muted: false,
        }
    }
}

/// Plays each cue in its own task. Playback is best effort: failures are
/// logged and never reach the controller.
#[derive(Debug)]
pub struct AudioPlayer {
    config: Arc<AudioConfig>,
    playing: HashMap<AudioCue, JoinHandle<()>>,
}

impl AudioPlayer {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config: Arc::new(config),
            playing: HashMap::new(),
        }
    }

    /// Whether a playback task for `cue` is still alive
    pub fn is_playing(&self, cue: AudioCue) -> bool {
        self.playing
            .get(&cue)
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}

impl AudioSink for AudioPlayer {
    fn start(&mut self, cue: AudioCue, mode: PlayMode) {
        if self.config.muted {
            debug!("Muted, skipping {} cue", cue);
            return;
        }
        let Some(path) = self.config.sound_for(cue).map(Path::to_path_buf) else {
            debug!("No sound configured for {} cue", cue);
            return;
        };

        // A cue is never played twice at the same time
        self.stop(cue);

        let player = self.config.player.clone();
        info!("Playing {} cue ({:?}) from {}", cue, mode, path.display());
        let task = tokio::spawn(async move {
            match mode {
                PlayMode::Once => {
                    if let Err(e) = play_file(&player, &path).await {
                        warn!("Failed to play {} cue: {}", cue, e);
                    }
                }
                PlayMode::Loop => loop {
                    let started = Instant::now();
                    if let Err(e) = play_file(&player, &path).await {
                        warn!("Failed to play {} cue, giving up on the loop: {}", cue, e);
                        break;
                    }
                    if let Some(pause) = loop_pause(started.elapsed()) {
                        debug!("{} cue ended early, pausing {:?}", cue, pause);
                        sleep(pause).await;
                    }
                },
            }
        });

        self.playing.insert(cue, task);
    }

    fn stop(&mut self, cue: AudioCue) {
        if let Some(task) = self.playing.remove(&cue) {
            task.abort();
            debug!("Stopped {} cue", cue);
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        for (_, task) in self.playing.drain() {
            task.abort();
        }
    }
}

/// Delay before replaying a looped cue whose last pass took `pass`
fn loop_pause(pass: Duration) -> Option<Duration> {
    MIN_LOOP_PASS.checked_sub(pass).filter(|pause| !pause.is_zero())
}

/// Play `path` once with `player`, waiting for it to finish.
/// The child process is killed if the future is dropped.
pub async fn play_file(player: &str, path: &Path) -> Result<(), String> {
    let output = Command::new(player)
        .arg(path)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", player, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} exited with {}: {}", player, output.status, stderr.trim()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(player: &str, ticking: Option<&str>) -> AudioConfig {
        AudioConfig {
            player: player.to_string(),
            ticking_sound: ticking.map(PathBuf::from),
            bell_sound: None,
            muted: false,
        }
    }

    #[test]
    fn sounds_are_looked_up_per_cue() {
        let config = config("paplay", Some("ticking.wav"));
        assert_eq!(config.sound_for(AudioCue::TickingLoop), Some(Path::new("ticking.wav")));
        assert_eq!(config.sound_for(AudioCue::BellOnce), None);
    }

    #[test]
    fn short_loop_passes_are_padded() {
        assert_eq!(loop_pause(Duration::ZERO), Some(MIN_LOOP_PASS));
        assert_eq!(loop_pause(Duration::from_millis(200)), Some(Duration::from_millis(300)));
        assert_eq!(loop_pause(MIN_LOOP_PASS), None);
        assert_eq!(loop_pause(Duration::from_secs(3)), None);
    }

    #[cfg(unix)]
    #[tokio::test(start_paused = true)]
    async fn instant_player_does_not_spin() {
        // `true` exits at once, like a player handed an empty file
        let mut player = AudioPlayer::new(config("true", Some("empty.wav")));

        player.start(AudioCue::TickingLoop, PlayMode::Loop);
        sleep(Duration::from_millis(100)).await;
        assert!(player.is_playing(AudioCue::TickingLoop));

        player.stop(AudioCue::TickingLoop);
        assert!(!player.is_playing(AudioCue::TickingLoop));
    }

    #[tokio::test]
    async fn muted_player_starts_nothing() {
        let mut player = AudioPlayer::new(AudioConfig {
            muted: true,
            ..config("paplay", Some("ticking.wav"))
        });

        player.start(AudioCue::TickingLoop, PlayMode::Loop);
        assert!(!player.is_playing(AudioCue::TickingLoop));
    }

    #[tokio::test]
    async fn unconfigured_cue_is_skipped() {
        let mut player = AudioPlayer::new(config("paplay", None));

        player.start(AudioCue::BellOnce, PlayMode::Once);
        assert!(!player.is_playing(AudioCue::BellOnce));

        // Stopping something that never started is fine
        player.stop(AudioCue::BellOnce);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn looping_cue_runs_until_stopped() {
        // `sleep 30` stands in for a long sound file
        let mut player = AudioPlayer::new(config("sleep", Some("30")));

        player.start(AudioCue::TickingLoop, PlayMode::Loop);
        assert!(player.is_playing(AudioCue::TickingLoop));

        player.stop(AudioCue::TickingLoop);
        assert!(!player.is_playing(AudioCue::TickingLoop));
    }

    #[tokio::test]
    async fn missing_player_is_reported() {
        let err = play_file("seek-timer-no-such-player", Path::new("bell.wav"))
            .await
            .unwrap_err();
        assert!(err.starts_with("Failed to execute seek-timer-no-such-player"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_player_is_reported() {
        assert!(play_file("true", Path::new("bell.wav")).await.is_ok());

        let err = play_file("false", Path::new("bell.wav")).await.unwrap_err();
        assert!(err.starts_with("false exited with"));
    }
}

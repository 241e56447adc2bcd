use anyhow::{Context, Result};
use std::process::Command;

/// Audio playback capability: play a sound resource by locator
pub trait AudioPlayer {
    fn play(&self, locator: &str) -> Result<()>;
}

/// Desktop audio player shelling out to the platform playback command
#[derive(Default)]
pub struct SystemAudio;

impl AudioPlayer for SystemAudio {
    fn play(&self, locator: &str) -> Result<()> {
        let player = if cfg!(target_os = "macos") {
            "afplay"
        } else {
            "paplay"
        };

        // Spawn and detach so playback never blocks the event loop
        Command::new(player)
            .arg(locator)
            .spawn()
            .with_context(|| format!("Failed to play sound: {}", locator))?;
        Ok(())
    }
}

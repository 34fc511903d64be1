//! Sound effects
//!
//! Cue sounds are loaded once at startup. A sound that fails to load is
//! logged and its cue plays nothing.

use std::collections::HashMap;
use macroquad::audio::{load_sound, play_sound_once, Sound};
use tracing::{info, warn};
use super::event::SoundCue;

#[derive(Default)]
pub struct SoundBank {
    sounds: HashMap<SoundCue, Sound>,
}

impl SoundBank {
    pub async fn load(cues: impl IntoIterator<Item = (SoundCue, String)>) -> Self {
        let mut sounds = HashMap::new();
        for (cue, path) in cues {
            match load_sound(&path).await {
                Ok(sound) => {
                    sounds.insert(cue, sound);
                }
                Err(e) => warn!(?cue, %path, error = %e, "sound failed to load, cue will be silent"),
            }
        }
        info!(count = sounds.len(), "sounds ready");
        Self { sounds }
    }

    /// Fire and forget
    pub fn play(&self, cue: SoundCue) {
        if let Some(sound) = self.sounds.get(&cue) {
            play_sound_once(sound);
        }
    }
}

//! Host run loop
//!
//! Views implement `GameHandler`; `run_game` owns the window loop and calls
//! back into the view once per frame in a fixed order:
//! key presses, key releases, update, sound cues, draw.
//! Restart keys are delivered before other presses of the same frame, so
//! everything pressed alongside them reaches the fresh session.
//! Everything runs on the one macroquad thread, so callbacks never overlap.

use macroquad::prelude::*;
use tracing::info;
use crate::game::{Canvas, MacroquadCanvas, SoundBank, SoundCue, TextureCache};

/// Modifier keys held when a key event was delivered
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Sample the keyboard right now
    pub fn current() -> Self {
        Self {
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            ctrl: is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl),
            alt: is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt),
        }
    }
}

/// Callbacks a view receives from the run loop.
pub trait GameHandler {
    /// Clear colour for the frame
    fn background(&self) -> Color;

    /// A key went down. Errors end the run loop.
    fn on_key_down(&mut self, _key: KeyCode, _modifiers: Modifiers) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_key_up(&mut self, _key: KeyCode, _modifiers: Modifiers) {}

    /// Does `key` throw away the current session?
    fn is_restart_key(&self, _key: KeyCode) -> bool {
        false
    }

    /// Advance one frame. `delta_time` is seconds since the previous frame, never negative.
    fn on_update(&mut self, _delta_time: f32) {}

    /// Issue draw calls. Must not change game state.
    fn on_draw(&self, canvas: &mut dyn Canvas);

    /// Sound cues queued since the last call
    fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        Vec::new()
    }
}

/// Order one frame's key presses: restart keys first, then by key code.
pub fn delivery_order(mut keys: Vec<KeyCode>, is_restart: impl Fn(KeyCode) -> bool) -> Vec<KeyCode> {
    keys.sort_by_key(|&k| (!is_restart(k), k as u32));
    keys
}

/// Run `handler` until the window closes or a callback fails.
pub async fn run_game<H: GameHandler>(
    mut handler: H,
    textures: TextureCache,
    sounds: SoundBank,
) -> anyhow::Result<()> {
    info!("entering run loop");
    loop {
        let modifiers = Modifiers::current();

        let pressed = delivery_order(
            get_keys_pressed().into_iter().collect(),
            |k| handler.is_restart_key(k),
        );
        for key in pressed {
            handler.on_key_down(key, modifiers)?;
        }

        // Sorted so simultaneous releases are delivered in a stable order
        let mut released: Vec<KeyCode> = get_keys_released().into_iter().collect();
        released.sort_by_key(|k| *k as u32);
        for key in released {
            handler.on_key_up(key, modifiers);
        }

        handler.on_update(get_frame_time().max(0.0));

        for cue in handler.drain_sound_cues() {
            sounds.play(cue);
        }

        {
            let mut canvas = MacroquadCanvas::new(&textures);
            canvas.clear(handler.background());
            handler.on_draw(&mut canvas);
        }
        set_default_camera();

        next_frame().await;
    }
}

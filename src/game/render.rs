//! Rendering
//!
//! Game code draws through the `Canvas` trait so draw order can be checked
//! without a window. `MacroquadCanvas` is the real backend; textures are
//! looked up by asset path in a `TextureCache` loaded once at startup.

use std::collections::HashMap;
use macroquad::prelude::*;
use tracing::{info, warn};
use super::camera::Camera;
use super::sprite::Sprite;
use super::text::Label;

/// Which projection a camera is used with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSpace {
    /// y-up world coordinates
    World,
    /// Fixed screen overlay
    Screen,
}

/// Drawing surface used by views during `on_draw`.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    /// Make `camera` the active projection for subsequent draws.
    fn use_camera(&mut self, camera: &Camera, space: CameraSpace);
    fn draw_sprite(&mut self, sprite: &Sprite, alpha: f32);
    fn draw_label(&mut self, label: &Label);
}

/// Textures keyed by asset path.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture2D>,
}

impl TextureCache {
    /// Load every path. Failures are logged and replaced by a flat-colour
    /// placeholder so a missing image never stops the game.
    pub async fn load(paths: impl IntoIterator<Item = String>) -> Self {
        let mut textures = HashMap::new();
        let mut missing = 0;
        for path in paths {
            if textures.contains_key(&path) {
                continue;
            }
            let texture = match load_texture(&path).await {
                Ok(tex) => {
                    tex.set_filter(FilterMode::Nearest);
                    tex
                }
                Err(e) => {
                    warn!(%path, error = %e, "texture failed to load, using placeholder");
                    missing += 1;
                    let image = Image::gen_image_color(16, 16, placeholder_color(&path));
                    let tex = Texture2D::from_image(&image);
                    tex.set_filter(FilterMode::Nearest);
                    tex
                }
            };
            textures.insert(path, texture);
        }
        info!(loaded = textures.len() - missing, placeholders = missing, "textures ready");
        Self { textures }
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.textures.get(key)
    }
}

/// Stable, distinguishable colour for a missing texture (FNV-1a of the path).
pub fn placeholder_color(key: &str) -> Color {
    let mut hash: u32 = 0x811c_9dc5;
    for b in key.bytes() {
        hash ^= b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    // Keep channels in the mid range so placeholders stand out from the sky
    let channel = |shift: u32| 64 + ((hash >> shift) & 0x7f) as u8;
    Color::from_rgba(channel(0), channel(8), channel(16), 255)
}

/// The real backend.
pub struct MacroquadCanvas<'a> {
    textures: &'a TextureCache,
    /// Viewport height of the active screen-space camera (for y flipping labels)
    screen_height: Option<f32>,
}

impl<'a> MacroquadCanvas<'a> {
    pub fn new(textures: &'a TextureCache) -> Self {
        Self { textures, screen_height: None }
    }
}

impl Canvas for MacroquadCanvas<'_> {
    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn use_camera(&mut self, camera: &Camera, space: CameraSpace) {
        match space {
            CameraSpace::World => {
                set_camera(&camera.world_projection());
                self.screen_height = None;
            }
            CameraSpace::Screen => {
                set_camera(&camera.screen_projection());
                self.screen_height = Some(camera.viewport.y);
            }
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, alpha: f32) {
        let mut color = sprite.visual.tint;
        color.a *= alpha.clamp(0.0, 1.0);
        match self.textures.get(&sprite.visual.texture) {
            Some(tex) => draw_texture_ex(
                tex,
                sprite.left(),
                sprite.bottom(),
                color,
                DrawTextureParams {
                    dest_size: Some(sprite.size),
                    // Image rows run top-down, the world runs bottom-up
                    flip_y: true,
                    ..Default::default()
                },
            ),
            None => draw_rectangle(sprite.left(), sprite.bottom(), sprite.size.x, sprite.size.y, color),
        }
    }

    fn draw_label(&mut self, label: &Label) {
        // Labels are authored y-up; the screen projection is y-down
        let y = match self.screen_height {
            Some(height) => height - label.position.y,
            None => label.position.y,
        };
        draw_text(&label.text, label.position.x, y, label.font_size, label.color);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_color_is_stable_and_opaque() {
        let a = placeholder_color("assets/images/tiles/grassMid.png");
        let b = placeholder_color("assets/images/tiles/grassMid.png");
        let c = placeholder_color("assets/images/items/coinGold.png");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.a, 1.0);
    }
}

//! Game configuration
//!
//! Every knob the tutorial hard-codes, with the tutorial's values as
//! defaults. An optional RON file can override any subset of fields.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use macroquad::prelude::{vec2, Color, Vec2};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use crate::world::LayerOptions;

/// Where the optional config file lives, relative to the working directory
pub const CONFIG_PATH: &str = "assets/config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Which tutorial step to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Stage {
    /// A single sprite on a coloured background
    DrawSprite,
    /// Player plus a hand-placed row of walls and crates
    SpriteList,
    /// Tile map, physics, input, coins, score and camera
    #[default]
    Platformer,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub stage: Stage,

    // Window
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Clear colour, RGB
    pub background: [u8; 3],

    // Physics and movement (units per frame)
    pub gravity: f32,
    pub player_movement_speed: f32,
    pub player_jump_speed: f32,

    // Placement
    pub tile_scaling: f32,
    pub coin_scaling: f32,
    pub player_start: (f32, f32),
    /// Player hit box, width x height
    pub player_size: (f32, f32),
    pub coin_positions: Vec<(f32, f32)>,

    // Rules
    pub coin_reward: u32,

    // Map
    pub map_path: String,
    /// Layer the physics treats as solid
    pub solid_layer: String,
    /// Layer the coins are placed in
    pub coin_layer: String,
    pub layer_options: HashMap<String, LayerOptions>,

    // Assets
    pub player_texture: String,
    pub coin_texture: String,
    pub grass_texture: String,
    pub crate_texture: String,
    pub jump_sound: String,
    pub coin_sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut layer_options = HashMap::new();
        layer_options.insert("Platforms".to_string(), LayerOptions { use_spatial_hash: true });

        Self {
            stage: Stage::default(),
            window_title: "Platformer".to_string(),
            window_width: 1280,
            window_height: 720,
            // CSS cornflower blue
            background: [100, 149, 237],
            gravity: 1.0,
            player_movement_speed: 5.0,
            player_jump_speed: 20.0,
            tile_scaling: 0.5,
            coin_scaling: 0.5,
            player_start: (64.0, 128.0),
            player_size: (72.0, 96.0),
            coin_positions: vec![(512.0, 300.0), (256.0, 300.0), (768.0, 300.0)],
            coin_reward: 75,
            map_path: "assets/maps/level_1.ron".to_string(),
            solid_layer: "Platforms".to_string(),
            coin_layer: "Coins".to_string(),
            layer_options,
            player_texture: "assets/images/animated_characters/female_adventurer/femaleAdventurer_idle.png".to_string(),
            coin_texture: "assets/images/items/coinGold.png".to_string(),
            grass_texture: "assets/images/tiles/grassMid.png".to_string(),
            crate_texture: "assets/images/tiles/boxCrate_double.png".to_string(),
            jump_sound: "assets/sounds/jump1.wav".to_string(),
            coin_sound: "assets/sounds/coin1.wav".to_string(),
        }
    }
}

/// Source art is 128 px square; the scaling factors size sprites from it
pub const SOURCE_TILE_SIZE: f32 = 128.0;

impl GameConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.as_ref().display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`GameConfig::load`] but a bad file is logged and ignored.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            warn!(path = %path.as_ref().display(), error = %e, "ignoring invalid config file");
            Self::default()
        })
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::from_rgba(r, g, b, 255)
    }

    pub fn window_size(&self) -> Vec2 {
        vec2(self.window_width as f32, self.window_height as f32)
    }

    pub fn player_start(&self) -> Vec2 {
        vec2(self.player_start.0, self.player_start.1)
    }

    pub fn player_size(&self) -> Vec2 {
        vec2(self.player_size.0, self.player_size.1)
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::splat(SOURCE_TILE_SIZE * self.tile_scaling)
    }

    pub fn coin_size(&self) -> Vec2 {
        Vec2::splat(SOURCE_TILE_SIZE * self.coin_scaling)
    }

    /// Every texture any stage may draw, for preloading
    pub fn textures(&self) -> Vec<String> {
        vec![
            self.player_texture.clone(),
            self.coin_texture.clone(),
            self.grass_texture.clone(),
            self.crate_texture.clone(),
        ]
    }
}

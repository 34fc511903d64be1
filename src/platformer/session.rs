//! Session state
//!
//! Everything that `setup()` rebuilds from scratch: the scene, the player,
//! the physics wiring, cameras, score and pending events. Restarting means
//! replacing the whole `Session`, never patching parts of it.

use std::fmt;
use macroquad::prelude::vec2;
use tracing::warn;
use crate::config::GameConfig;
use crate::game::{EntityAllocator, Events, Label, PlatformerPhysics, Scene, Sprite, Visual};
use crate::world::TileMap;
use super::camera::CameraController;

/// Points collected this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score(u32);

impl Score {
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}", self.0)
    }
}

pub struct Session {
    pub entities: EntityAllocator,
    pub scene: Scene,
    /// The player is not part of any scene layer
    pub player: Sprite,
    pub physics: PlatformerPhysics,
    pub cameras: CameraController,
    pub score: Score,
    pub score_text: Label,
    pub events: Events,
    /// Layer holding collectibles
    pub coin_layer: String,
    pub coin_reward: u32,
    /// Frames updated since setup
    pub frame: u64,
    /// Seconds simulated since setup
    pub elapsed: f32,
}

impl Session {
    /// Build a fresh session from a parsed map.
    pub fn new(config: &GameConfig, map: &TileMap) -> Self {
        let mut entities = EntityAllocator::new();
        let mut scene = Scene::from_tilemap(map, config.tile_scaling, &config.layer_options, &mut entities);

        if scene.layer(&config.solid_layer).is_none() {
            warn!(layer = %config.solid_layer, "map has no solid layer, nothing will stop the player");
        }

        let player = Sprite::new(entities.allocate(), Visual::new(config.player_texture.clone()), config.player_size())
            .at(config.player_start());

        scene.add_layer(&config.coin_layer, true);
        for &(x, y) in &config.coin_positions {
            let coin = Sprite::new(entities.allocate(), Visual::new(config.coin_texture.clone()), config.coin_size())
                .at(vec2(x, y));
            scene.add_sprite(&config.coin_layer, coin);
        }

        let physics = PlatformerPhysics::new(config.gravity, [config.solid_layer.clone()]);
        let window = config.window_size();
        let score = Score::default();
        let score_text = Label::new(score.to_string(), vec2(10.0, window.y - 20.0));

        Self {
            entities,
            scene,
            player,
            physics,
            cameras: CameraController::new(window),
            score,
            score_text,
            events: Events::new(),
            coin_layer: config.coin_layer.clone(),
            coin_reward: config.coin_reward,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Is the player standing on solid ground right now?
    pub fn grounded(&self) -> bool {
        self.physics.can_jump(&self.player, &self.scene)
    }

    pub fn coins_left(&self) -> usize {
        self.scene.layer(&self.coin_layer).map_or(0, |l| l.len())
    }
}

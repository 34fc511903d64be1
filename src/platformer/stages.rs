//! Earlier tutorial steps
//!
//! Static scenes with no input or physics, kept runnable through the
//! `stage` config field.

use macroquad::prelude::{vec2, Color};
use crate::app::GameHandler;
use crate::config::GameConfig;
use crate::game::{Camera, CameraSpace, Canvas, EntityAllocator, Layer, Sprite, Visual};

/// Crate positions in the sprite-list step
const CRATES: [(f32, f32); 3] = [(512.0, 96.0), (256.0, 96.0), (768.0, 96.0)];
const GROUND_Y: f32 = 32.0;
const GROUND_END: usize = 1250;
const WALL_ALPHA: f32 = 0.8;

fn player(config: &GameConfig, entities: &mut EntityAllocator) -> Sprite {
    Sprite::new(entities.allocate(), Visual::new(config.player_texture.clone()), config.player_size())
        .at(config.player_start())
}

/// One sprite on a plain background
pub struct DrawSpriteView {
    background: Color,
    camera: Camera,
    player: Sprite,
}

impl DrawSpriteView {
    pub fn new(config: &GameConfig) -> Self {
        let window = config.window_size();
        Self {
            background: config.background_color(),
            camera: Camera::new(window.x, window.y),
            player: player(config, &mut EntityAllocator::new()),
        }
    }
}

impl GameHandler for DrawSpriteView {
    fn background(&self) -> Color {
        self.background
    }

    fn on_draw(&self, canvas: &mut dyn Canvas) {
        canvas.use_camera(&self.camera, CameraSpace::World);
        canvas.draw_sprite(&self.player, 1.0);
    }
}

/// Player plus a row of grass and some crates, drawn as two lists
pub struct SpriteListView {
    background: Color,
    camera: Camera,
    players: Layer,
    walls: Layer,
}

impl SpriteListView {
    pub fn new(config: &GameConfig) -> Self {
        let mut entities = EntityAllocator::new();
        let window = config.window_size();
        let tile = config.tile_size();

        let mut players = Layer::new(false);
        players.push(player(config, &mut entities));

        let mut walls = Layer::new(true);
        walls.alpha = WALL_ALPHA;
        for x in (0..GROUND_END).step_by(tile.x.max(1.0) as usize) {
            walls.push(
                Sprite::new(entities.allocate(), Visual::new(config.grass_texture.clone()), tile)
                    .at(vec2(x as f32, GROUND_Y)),
            );
        }
        for (x, y) in CRATES {
            walls.push(
                Sprite::new(entities.allocate(), Visual::new(config.crate_texture.clone()), tile)
                    .at(vec2(x, y)),
            );
        }

        Self {
            background: config.background_color(),
            camera: Camera::new(window.x, window.y),
            players,
            walls,
        }
    }
}

impl GameHandler for SpriteListView {
    fn background(&self) -> Color {
        self.background
    }

    fn on_draw(&self, canvas: &mut dyn Canvas) {
        canvas.use_camera(&self.camera, CameraSpace::World);
        self.players.draw(canvas);
        self.walls.draw(canvas);
    }
}

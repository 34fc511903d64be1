//! Sprites
//!
//! A sprite is the only kind of game object: the player, every wall tile and
//! every coin. Positions are sprite centres in a y-up world (larger `y` is
//! higher on screen), matching the way the tile maps and start coordinates
//! are authored.

use macroquad::prelude::{Color, Rect, Vec2, WHITE};
use super::entity::EntityId;

/// What to draw for a sprite: a texture key plus a tint.
///
/// The key is the asset path; the renderer resolves it through its texture
/// cache, so game logic never holds GPU handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub texture: String,
    pub tint: Color,
}

impl Visual {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            tint: WHITE,
        }
    }
}

/// A positioned, drawable, collidable game object.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: EntityId,
    /// Centre of the sprite
    pub position: Vec2,
    /// Full width and height of the hit box (and of the drawn quad)
    pub size: Vec2,
    /// Per-frame movement (change_x, change_y). Only the player moves.
    pub velocity: Vec2,
    pub visual: Visual,
}

impl Sprite {
    pub fn new(id: EntityId, visual: Visual, size: Vec2) -> Self {
        Self {
            id,
            position: Vec2::ZERO,
            size,
            velocity: Vec2::ZERO,
            visual,
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Axis-aligned hit box. `x`/`y` hold the left and bottom edges.
    pub fn hit_box(&self) -> Rect {
        Rect::new(self.left(), self.bottom(), self.size.x, self.size.y)
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.size.x * 0.5
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.position.y - self.size.y * 0.5
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }

    pub fn set_left(&mut self, left: f32) {
        self.position.x = left + self.size.x * 0.5;
    }

    pub fn set_right(&mut self, right: f32) {
        self.position.x = right - self.size.x * 0.5;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.position.y = bottom + self.size.y * 0.5;
    }

    pub fn set_top(&mut self, top: f32) {
        self.position.y = top - self.size.y * 0.5;
    }
}

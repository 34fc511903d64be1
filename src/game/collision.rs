//! Collision tests
//!
//! Axis-aligned box overlap between sprites. Boxes that merely touch do not
//! collide, so a player standing exactly on a floor tile can still slide
//! sideways along the row of tiles beneath it.

use macroquad::prelude::Rect;
use super::entity::EntityId;
use super::layer::Layer;
use super::sprite::Sprite;

/// Overlap smaller than this (in world units) is treated as touching.
pub const COLLISION_EPSILON: f32 = 0.01;

/// Do two hit boxes overlap by more than [`COLLISION_EPSILON`] on both axes?
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let x_overlap = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
    let y_overlap = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
    x_overlap > COLLISION_EPSILON && y_overlap > COLLISION_EPSILON
}

/// Ids of sprites in `layer` overlapping `sprite`, in layer order.
pub fn check_for_collision_with_layer(sprite: &Sprite, layer: &Layer) -> Vec<EntityId> {
    layer.overlapping(&sprite.hit_box())
        .into_iter()
        .filter(|&id| id != sprite.id)
        .collect()
}

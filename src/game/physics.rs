//! Platformer Physics
//!
//! Moves a single controlled sprite against named wall layers of a scene.
//! Each step is frame based (velocities are units per frame):
//! 1. Gravity is subtracted from vertical velocity
//! 2. The sprite moves vertically; on contact it is snapped flush to the
//!    surface it hit and vertical velocity is zeroed
//! 3. The sprite moves horizontally; on contact it is snapped flush against
//!    the wall side. Horizontal intent is kept so holding a key keeps pushing.

use super::collision::check_for_collision_with_layer;
use super::entity::EntityId;
use super::scene::Scene;
use super::sprite::Sprite;

/// How far below the player to probe when asking "am I standing on something?"
pub const JUMP_PROBE_DISTANCE: f32 = 5.0;

/// Result of one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepResult {
    /// Landed on or bumped into something vertically
    pub hit_vertical: bool,
    /// Blocked by a wall horizontally
    pub hit_horizontal: bool,
}

#[derive(Debug, Clone)]
pub struct PlatformerPhysics {
    pub gravity: f32,
    /// Names of scene layers that are solid
    walls: Vec<String>,
}

impl PlatformerPhysics {
    pub fn new(gravity: f32, walls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gravity,
            walls: walls.into_iter().map(Into::into).collect(),
        }
    }

    /// Solid sprites currently overlapping `sprite`, with their hit boxes.
    fn wall_hits(&self, sprite: &Sprite, scene: &Scene) -> Vec<(EntityId, f32, f32, f32, f32)> {
        self.walls.iter()
            .filter_map(|name| scene.layer(name))
            .flat_map(|layer| {
                check_for_collision_with_layer(sprite, layer)
                    .into_iter()
                    .filter_map(|id| layer.get(id))
                    .map(|w| (w.id, w.left(), w.right(), w.bottom(), w.top()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Advance one frame.
    pub fn update(&self, player: &mut Sprite, scene: &Scene) -> StepResult {
        let mut result = StepResult::default();

        player.velocity.y -= self.gravity;

        player.position.y += player.velocity.y;
        let hits = self.wall_hits(player, scene);
        if !hits.is_empty() {
            if player.velocity.y > 0.0 {
                let ceiling = hits.iter().map(|h| h.3).fold(f32::INFINITY, f32::min);
                player.set_top(ceiling);
            } else {
                let floor = hits.iter().map(|h| h.4).fold(f32::NEG_INFINITY, f32::max);
                player.set_bottom(floor);
            }
            player.velocity.y = 0.0;
            result.hit_vertical = true;
        }

        player.position.x += player.velocity.x;
        let hits = self.wall_hits(player, scene);
        if !hits.is_empty() {
            if player.velocity.x > 0.0 {
                let wall = hits.iter().map(|h| h.1).fold(f32::INFINITY, f32::min);
                player.set_right(wall);
            } else if player.velocity.x < 0.0 {
                let wall = hits.iter().map(|h| h.2).fold(f32::NEG_INFINITY, f32::max);
                player.set_left(wall);
            }
            result.hit_horizontal = true;
        }

        result
    }

    /// Is the player resting on solid geometry?
    pub fn can_jump(&self, player: &Sprite, scene: &Scene) -> bool {
        let mut probe = player.clone();
        probe.position.y -= JUMP_PROBE_DISTANCE;
        !self.wall_hits(&probe, scene).is_empty()
    }
}

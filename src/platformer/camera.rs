//! Camera controller
//!
//! The world camera snaps to the player every frame (no easing). The UI
//! camera is set once at session start and never moves, so overlay text
//! stays put on screen.

use macroquad::prelude::Vec2;
use crate::game::Camera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    pub world: Camera,
    pub ui: Camera,
}

impl CameraController {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            world: Camera::new(viewport.x, viewport.y),
            ui: Camera::new(viewport.x, viewport.y),
        }
    }

    /// Centre the world camera on `target`.
    pub fn follow(&mut self, target: Vec2) {
        self.world.position = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    #[test]
    fn test_follow_moves_world_camera_only() {
        let mut cams = CameraController::new(vec2(1280.0, 720.0));
        let ui_before = cams.ui;

        cams.follow(vec2(900.0, -40.0));
        assert_eq!(cams.world.position, vec2(900.0, -40.0));
        assert_eq!(cams.ui, ui_before);

        cams.follow(vec2(10.0, 10.0));
        assert_eq!(cams.world.position, vec2(10.0, 10.0));
    }
}

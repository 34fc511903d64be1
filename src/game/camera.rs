//! 2D cameras
//!
//! A camera is just a centre point and a viewport size. The world camera
//! projects the y-up world; the UI camera projects fixed screen space with
//! y pointing down so text renders upright.

use macroquad::prelude::{vec2, Camera2D, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at the centre of the viewport
    pub position: Vec2,
    /// Visible width and height in world units
    pub viewport: Vec2,
}

impl Camera {
    /// Camera whose view starts at the origin, covering `width` x `height`.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: vec2(width * 0.5, height * 0.5),
            viewport: vec2(width, height),
        }
    }

    /// Projection for the y-up world.
    ///
    /// Macroquad flips y for screen targets, so a negative zoom.y keeps
    /// world y pointing up.
    pub fn world_projection(&self) -> Camera2D {
        Camera2D {
            target: self.position,
            zoom: vec2(2.0 / self.viewport.x, -2.0 / self.viewport.y),
            ..Default::default()
        }
    }

    /// Projection for screen-space overlays, y pointing down.
    pub fn screen_projection(&self) -> Camera2D {
        Camera2D {
            target: self.position,
            zoom: vec2(2.0 / self.viewport.x, 2.0 / self.viewport.y),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_camera_is_centred_on_viewport() {
        let cam = Camera::new(1280.0, 720.0);
        assert_eq!(cam.position, vec2(640.0, 360.0));
        assert_eq!(cam.viewport, vec2(1280.0, 720.0));
    }

    #[test]
    fn test_projections_differ_only_in_y_direction() {
        let cam = Camera::new(1280.0, 720.0);
        let world = cam.world_projection();
        let screen = cam.screen_projection();
        assert_eq!(world.target, screen.target);
        assert_eq!(world.zoom.x, screen.zoom.x);
        assert_eq!(world.zoom.y, -screen.zoom.y);
    }
}

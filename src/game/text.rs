//! Text labels drawn in screen space

use macroquad::prelude::{Color, Vec2, WHITE};

/// Default font size for overlay text
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Baseline start, y-up screen coordinates (0 at the bottom edge)
    pub position: Vec2,
    pub color: Color,
    pub font_size: f32,
}

impl Label {
    pub fn new(text: impl Into<String>, position: Vec2) -> Self {
        Self {
            text: text.into(),
            position,
            color: WHITE,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

//! Draw command types for 2D rendering

use crate::Color;

/// One primitive for the host's drawing surface (logical pixels, y down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled axis-aligned rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Debug text, top-left anchored
    Text {
        text: String,
        x: f32,
        y: f32,
        color: Color,
    },
}

impl DrawCommand {
    pub fn rect(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        }
    }

    pub fn text(text: impl Into<String>, x: f32, y: f32, color: Color) -> Self {
        DrawCommand::Text {
            text: text.into(),
            x,
            y,
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::Color;

    pub const BACKGROUND: Color = Color::BLACK;
    pub const PADDLE: Color = Color::WHITE;
    pub const BALL: Color = Color::WHITE;
    pub const TEXT: Color = Color::WHITE;
}

//! Breakout - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, game phase)
//! - `renderer`: Host-independent draw lists
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const ORANGE: Color = Color::rgb(0xff, 0x7f, 0x00);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// CSS color string, e.g. `rgba(255,127,0,1)`
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Game configuration constants
///
/// All speeds are in pixels per simulation frame.
pub mod consts {
    /// Logical screen size (the host viewport is always scaled to this)
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Default simulation rate
    pub const FRAME_RATE: f32 = 60.0;
    /// Maximum frames simulated per host callback to prevent spiral of death
    pub const MAX_CATCHUP_FRAMES: u32 = 8;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_SPEED: f32 = 5.0;
    pub const PADDLE_Y: f32 = SCREEN_HEIGHT - 40.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 8.0;
    pub const BALL_SPEED: f32 = 3.0;
    pub const BALL_START_Y: f32 = SCREEN_HEIGHT - 60.0;
    /// Max horizontal kick added on each paddle hit
    pub const REBOUND_SPIN: f32 = 0.5;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_GAP: f32 = 4.0;
    pub const BRICK_OFFSET: f32 = 40.0;
    pub const BRICK_COUNT: usize = BRICK_ROWS * BRICK_COLS;
}

//! Per-frame draw list generation

use super::command::{DrawCommand, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GamePhase, GameState};

/// Line height of the host's debug font
pub const TEXT_LINE_HEIGHT: f32 = 16.0;

/// Build everything to draw for the current state, back to front
pub fn render(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.bricks.len() + 4);

    let paddle = &state.paddle;
    commands.push(DrawCommand::rect(
        paddle.x,
        paddle.y,
        paddle.width,
        paddle.height,
        colors::PADDLE,
    ));

    let ball = &state.ball;
    commands.push(DrawCommand::rect(
        ball.pos.x,
        ball.pos.y,
        ball.size,
        ball.size,
        colors::BALL,
    ));

    for brick in state.bricks.iter().filter(|b| b.active) {
        let b = &brick.bounds;
        commands.push(DrawCommand::rect(
            b.min.x,
            b.min.y,
            b.size.x,
            b.size.y,
            brick.color,
        ));
    }

    commands.push(DrawCommand::text(
        format!("Score: {}", state.score),
        0.0,
        0.0,
        colors::TEXT,
    ));

    if let Some(banner) = phase_banner(state.phase) {
        commands.push(DrawCommand::text(
            banner,
            0.0,
            TEXT_LINE_HEIGHT,
            colors::TEXT,
        ));
    }

    commands
}

/// End-of-round message, if any
pub fn phase_banner(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::GameOver => Some("Game Over! Press SPACE to restart"),
        GamePhase::Victory => Some("You Win! Press SPACE to play again"),
    }
}

/// Logical resolution for any host window size.
///
/// The game always renders at 640x480 and lets the host scale it.
pub fn layout(_outside_width: u32, _outside_height: u32) -> (u32, u32) {
    (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
}

//! Idle/demo mode input
//!
//! Steers the paddle under the ball. Used by the headless native host and
//! by the browser host's demo toggle.

use super::state::GameState;
use super::tick::StepInput;

/// Frames of ball travel to lead the target by
const LEAD_FRAMES: f32 = 4.0;

/// Produce this frame's input for a computer-controlled paddle.
///
/// Never asks for a restart; the host decides what happens after a round.
pub fn autopilot_input(state: &GameState) -> StepInput {
    if state.phase.is_finished() {
        return StepInput::default();
    }

    let ball = &state.ball;
    let target = ball.bounds().center().x + ball.vel.x * LEAD_FRAMES;
    let paddle_center = state.paddle.center_x();
    // One paddle step of slack so the paddle doesn't jitter around the target
    let dead_zone = state.paddle.speed;

    StepInput {
        left: target < paddle_center - dead_zone,
        right: target > paddle_center + dead_zone,
        restart: false,
    }
}

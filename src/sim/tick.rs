//! Fixed timestep simulation step
//!
//! Core game loop that advances simulation one frame at a time.

use super::bricks::all_cleared;
use super::state::{GameEvent, GamePhase, GameState};

/// Held-key input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub left: bool,
    pub right: bool,
    /// Start a new round (only honoured once the round has ended)
    pub restart: bool,
}

/// Advance the game state by one frame
pub fn step(state: &mut GameState, input: &StepInput) {
    state.events.clear();

    if state.phase.is_finished() {
        if input.restart {
            state.restart();
        }
        return;
    }

    state.frame += 1;

    // Paddle first so this frame's collision sees this frame's input
    if input.left {
        state.paddle.move_left();
    }
    if input.right {
        state.paddle.move_right();
    }
    state.paddle.clamp_to_bounds();

    state.ball.integrate_position();

    if state.ball.resolve_wall_collision() {
        state.events.push(GameEvent::WallBounce);
    }

    let spin = state.tuning.rebound_spin;
    let (ball, paddle, rng) = state.paddle_contact_parts();
    let kick = ball.resolve_paddle_collision(paddle, spin, rng);
    if let Some(kick) = kick {
        log::debug!("Paddle hit at frame {} (spin {:+.3})", state.frame, kick);
        state.events.push(GameEvent::PaddleHit { spin: kick });
    }

    // Every overlapping brick is resolved on its own, in grid order. Two
    // bricks hit in the same frame flip dy twice.
    let ball_box = state.ball.bounds();
    for (index, brick) in state.bricks.iter_mut().enumerate() {
        if !brick.active || !ball_box.overlaps(&brick.bounds) {
            continue;
        }
        if let Some(score) = brick.destroy() {
            state.ball.vel.y = -state.ball.vel.y;
            state.score += score;
            log::debug!("Brick {} destroyed (+{}, total {})", index, score, state.score);
            state.events.push(GameEvent::BrickDestroyed { index, score });
        }
    }

    if state.ball.is_lost() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::RoundLost);
        log::info!(
            "Round {} lost after {} frames, score {}",
            state.round,
            state.frame,
            state.score
        );
    } else if all_cleared(&state.bricks) {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::RoundWon);
        log::info!(
            "Round {} won after {} frames, score {}",
            state.round,
            state.frame,
            state.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::bricks::BRICK_TIERS;
    use glam::Vec2;
    use proptest::prelude::*;

    const IDLE: StepInput = StepInput {
        left: false,
        right: false,
        restart: false,
    };
    const LEFT: StepInput = StepInput {
        left: true,
        right: false,
        restart: false,
    };
    const RESTART: StepInput = StepInput {
        left: false,
        right: false,
        restart: true,
    };

    /// Teleport the ball and set its velocity
    fn place_ball(state: &mut GameState, x: f32, y: f32, dx: f32, dy: f32) {
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(dx, dy);
    }

    #[test]
    fn test_first_frame_from_serve() {
        let mut state = GameState::new(12345);
        step(&mut state, &IDLE);

        assert_eq!(state.ball.pos, Vec2::new(323.0, 417.0));
        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_paddle_input_and_clamp() {
        let mut state = GameState::new(1);
        step(&mut state, &LEFT);
        assert_eq!(state.paddle.x, 285.0);

        let both = StepInput {
            left: true,
            right: true,
            restart: false,
        };
        step(&mut state, &both);
        assert_eq!(state.paddle.x, 285.0);

        for _ in 0..100 {
            place_ball(&mut state, 320.0, 300.0, 0.0, 0.0);
            step(&mut state, &LEFT);
        }
        assert_eq!(state.paddle.x, 0.0);

        let right = StepInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            place_ball(&mut state, 320.0, 300.0, 0.0, 0.0);
            step(&mut state, &right);
        }
        assert_eq!(state.paddle.x, SCREEN_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_clamp_runs_without_input() {
        let mut state = GameState::new(1);
        state.paddle.x = -50.0;
        step(&mut state, &IDLE);
        assert_eq!(state.paddle.x, 0.0);
    }

    #[test]
    fn test_wall_bounce() {
        let mut state = GameState::new(1);
        place_ball(&mut state, 1.0, 250.0, -3.0, 2.0);
        step(&mut state, &IDLE);

        assert_eq!(state.ball.pos, Vec2::new(-2.0, 252.0));
        assert_eq!(state.ball.vel, Vec2::new(3.0, 2.0));
        assert_eq!(state.events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut state = GameState::new(1);
        place_ball(&mut state, 300.0, 1.0, 1.0, -3.0);
        step(&mut state, &IDLE);
        assert_eq!(state.ball.vel, Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_paddle_bounce() {
        let mut state = GameState::new(42);
        place_ball(&mut state, 316.0, 430.0, 0.0, 3.0);
        step(&mut state, &IDLE);

        assert_eq!(state.ball.vel.y, -3.0);
        assert!(state.ball.vel.x.abs() <= REBOUND_SPIN);
        assert!(matches!(state.events.as_slice(), [GameEvent::PaddleHit { .. }]));
    }

    #[test]
    fn test_paddle_bounce_with_unchecked_tuning() {
        let tuning = crate::Tuning {
            rebound_spin: -0.5,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(42, tuning);
        place_ball(&mut state, 316.0, 430.0, 0.0, 3.0);
        step(&mut state, &IDLE);

        assert_eq!(state.ball.vel.y, -3.0);
        assert!(state.ball.vel.x.abs() <= 0.5);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paddle_uses_this_frames_position() {
        let mut state = GameState::new(42);
        // Ball lands just left of the paddle unless the paddle moves left first
        place_ball(&mut state, 280.0, 430.0, 0.0, 3.0);
        step(&mut state, &LEFT);
        assert_eq!(state.paddle.x, 285.0);
        assert_eq!(state.ball.vel.y, -3.0);
    }

    #[test]
    fn test_single_brick_hit() {
        let mut state = GameState::new(1);
        // Just under the bottom row's first brick (y 140..160)
        place_ball(&mut state, 20.0, 162.0, 0.0, -3.0);
        step(&mut state, &IDLE);

        let index = 4 * BRICK_COLS;
        assert!(!state.bricks[index].active);
        assert_eq!(state.bricks_remaining(), BRICK_COUNT - 1);
        assert_eq!(state.score, BRICK_TIERS[4].score);
        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(
            state.events,
            vec![GameEvent::BrickDestroyed { index, score: 10 }]
        );
    }

    #[test]
    fn test_two_bricks_in_one_frame_flip_twice() {
        let mut state = GameState::new(1);
        // Straddles the gap between row 0 (y 44..64) and row 1 (y 68..88)
        place_ball(&mut state, 20.0, 66.0, 0.0, -3.0);
        step(&mut state, &IDLE);

        assert!(!state.bricks[0].active);
        assert!(!state.bricks[BRICK_COLS].active);
        assert_eq!(state.score, 50 + 40);
        // Two reflections cancel out
        assert_eq!(state.ball.vel.y, -3.0);
        assert_eq!(
            state.events,
            vec![
                GameEvent::BrickDestroyed { index: 0, score: 50 },
                GameEvent::BrickDestroyed { index: BRICK_COLS, score: 40 },
            ]
        );
    }

    #[test]
    fn test_destroyed_brick_is_ignored() {
        let mut state = GameState::new(1);
        let index = 4 * BRICK_COLS;
        state.bricks[index].destroy();
        place_ball(&mut state, 20.0, 162.0, 0.0, -3.0);
        step(&mut state, &IDLE);

        assert_eq!(state.score, 0);
        assert_eq!(state.ball.vel.y, -3.0);
    }

    #[test]
    fn test_game_over_when_ball_falls() {
        let mut state = GameState::new(1);
        place_ball(&mut state, 100.0, 478.0, 3.0, 3.0);
        step(&mut state, &IDLE);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events, vec![GameEvent::RoundLost]);
    }

    #[test]
    fn test_exactly_at_bottom_is_not_lost() {
        let mut state = GameState::new(1);
        place_ball(&mut state, 100.0, 477.0, 0.0, 3.0);
        step(&mut state, &IDLE);
        assert_eq!(state.ball.pos.y, SCREEN_HEIGHT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_finished_round_ignores_play_input() {
        let mut state = GameState::new(1);
        place_ball(&mut state, 100.0, 478.0, 3.0, 3.0);
        step(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::GameOver);

        let paddle_x = state.paddle.x;
        let ball_pos = state.ball.pos;
        let frame = state.frame;
        for _ in 0..10 {
            step(&mut state, &LEFT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.paddle.x, paddle_x);
        assert_eq!(state.ball.pos, ball_pos);
        assert_eq!(state.frame, frame);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_victory_on_last_brick() {
        let mut state = GameState::new(1);
        let last = 4 * BRICK_COLS;
        for (i, brick) in state.bricks.iter_mut().enumerate() {
            if i != last {
                brick.destroy();
            }
        }
        place_ball(&mut state, 20.0, 162.0, 0.0, -3.0);
        step(&mut state, &IDLE);

        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.bricks_remaining(), 0);
        assert_eq!(
            state.events,
            vec![
                GameEvent::BrickDestroyed { index: last, score: 10 },
                GameEvent::RoundWon,
            ]
        );
    }

    #[test]
    fn test_victory_only_honours_restart() {
        let mut state = GameState::new(1);
        assert_eq!(state.bricks.len(), 50);
        assert!(state.bricks.iter().all(|b| b.active));

        for brick in state.bricks.iter_mut() {
            brick.destroy();
        }
        step(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::Victory);

        let ball_pos = state.ball.pos;
        step(&mut state, &LEFT);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.ball.pos, ball_pos);

        step(&mut state, &RESTART);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bricks_remaining(), BRICK_COUNT);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = GameState::new(1);
        place_ball(&mut state, 20.0, 162.0, 0.0, -3.0);
        step(&mut state, &IDLE);
        assert_eq!(state.score, 10);

        place_ball(&mut state, 100.0, 478.0, 3.0, 3.0);
        step(&mut state, &LEFT);
        assert_eq!(state.phase, GamePhase::GameOver);

        step(&mut state, &RESTART);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.round, 2);
        assert_eq!(state.ball.pos, Vec2::new(320.0, 420.0));
        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
        assert_eq!(state.paddle.x, 290.0);
        assert!(state.bricks.iter().all(|b| b.active));
        assert_eq!(state.events, vec![GameEvent::RoundStarted { round: 2 }]);

        // The restart frame does not also simulate
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(1);
        step(&mut state, &IDLE);
        step(&mut state, &RESTART);
        assert_eq!(state.round, 1);
        assert_eq!(state.frame, 2);
        assert_eq!(state.ball.pos, Vec2::new(326.0, 414.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for i in 0..2000 {
            let input = StepInput {
                left: i % 7 < 3,
                right: i % 5 == 0,
                restart: true,
            };
            step(&mut state1, &input);
            step(&mut state2, &input);
        }

        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.ball.vel, state2.ball.vel);
        assert_eq!(state1.paddle.x, state2.paddle.x);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.round, state2.round);
        assert_eq!(state1.phase, state2.phase);
    }

    fn input_strategy() -> impl Strategy<Value = StepInput> {
        (any::<bool>(), any::<bool>(), prop::bool::weighted(0.05)).prop_map(
            |(left, right, restart)| StepInput {
                left,
                right,
                restart,
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_round_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec(input_strategy(), 1..1500),
        ) {
            let mut state = GameState::new(seed);

            for input in &inputs {
                let before_phase = state.phase;
                let before_round = state.round;
                let before_active: Vec<bool> = state.bricks.iter().map(|b| b.active).collect();

                step(&mut state, input);

                // Paddle never leaves the screen
                prop_assert!(state.paddle.x >= 0.0);
                prop_assert!(state.paddle.x <= SCREEN_WIDTH - state.paddle.width);

                // Allowed phase transitions only
                match (before_phase, state.phase) {
                    (a, b) if a == b => {}
                    (GamePhase::Playing, GamePhase::GameOver) => {
                        prop_assert!(state.ball.is_lost());
                    }
                    (GamePhase::Playing, GamePhase::Victory) => {
                        prop_assert_eq!(state.bricks_remaining(), 0);
                    }
                    (GamePhase::GameOver | GamePhase::Victory, GamePhase::Playing) => {
                        prop_assert!(input.restart);
                    }
                    (a, b) => {
                        prop_assert!(false, "illegal transition {:?} -> {:?}", a, b);
                    }
                }

                // Bricks never come back within a round
                if state.round == before_round {
                    for (was, brick) in before_active.iter().zip(&state.bricks) {
                        prop_assert!(*was || !brick.active);
                    }
                }

                // Score is exactly the reward of destroyed bricks
                let destroyed: u32 = state.bricks.iter().filter(|b| !b.active).map(|b| b.score).sum();
                prop_assert_eq!(state.score, destroyed);
            }
        }
    }
}

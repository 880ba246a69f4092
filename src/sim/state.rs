//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]. It is owned by the host
//! and passed explicitly to `step` and `render`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bricks::{Brick, init_bricks};
use super::collision::{Aabb, wall_contact};
use crate::Tuning;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Ball fell past the bottom edge
    GameOver,
    /// Every brick destroyed
    Victory,
}

impl GamePhase {
    /// Round has ended and only restart input is honoured
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Things that happened during the last step (for logging/effects)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    WallBounce,
    PaddleHit { spin: f32 },
    BrickDestroyed { index: usize, score: u32 },
    RoundLost,
    RoundWon,
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (never changes)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Movement per frame
    pub speed: f32,
}

impl Paddle {
    /// Centered paddle near the bottom of the screen
    pub fn new(speed: f32) -> Self {
        Self {
            x: SCREEN_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn move_left(&mut self) {
        self.x -= self.speed;
    }

    pub fn move_right(&mut self) {
        self.x += self.speed;
    }

    /// Keep the paddle fully on screen. Safe to call every frame.
    pub fn clamp_to_bounds(&mut self) {
        let max_x = SCREEN_WIDTH - self.width;
        if self.x < 0.0 {
            self.x = 0.0;
        }
        if self.x > max_x {
            self.x = max_x;
        }
    }
}

/// The ball (a small square)
#[derive(Debug, Clone)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    /// Side length
    pub size: f32,
}

impl Ball {
    /// Ball at its serve position, heading up and to the right
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, BALL_START_Y),
            vel: Vec2::new(speed, -speed),
            size: BALL_SIZE,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn integrate_position(&mut self) {
        self.pos += self.vel;
    }

    /// Bounce off the side walls and ceiling. Returns true on any bounce.
    ///
    /// Only the sign of a velocity component changes, never its magnitude.
    pub fn resolve_wall_collision(&mut self) -> bool {
        let contact = wall_contact(&self.bounds(), SCREEN_WIDTH);
        if contact.side {
            self.vel.x = -self.vel.x;
        }
        if contact.top {
            self.vel.y = -self.vel.y;
        }
        contact.any()
    }

    /// Bounce off the paddle with a random horizontal kick in `[-spin, spin]`.
    ///
    /// Returns the kick applied, or `None` if the ball missed the paddle.
    /// The sign of `spin` is ignored; a spin whose range is not finite
    /// gives no kick.
    pub fn resolve_paddle_collision<R: Rng>(
        &mut self,
        paddle: &Paddle,
        spin: f32,
        rng: &mut R,
    ) -> Option<f32> {
        if !self.bounds().overlaps(&paddle.bounds()) {
            return None;
        }
        let spin = spin.abs();
        let kick = if spin > 0.0 && (2.0 * spin).is_finite() {
            rng.random_range(-spin..=spin)
        } else {
            0.0
        };
        self.vel.y = -self.vel.y;
        self.vel.x += kick;
        Some(kick)
    }

    /// Ball has dropped below the bottom edge
    pub fn is_lost(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Fixed-size grid in row-major order
    pub bricks: Vec<Brick>,
    pub score: u32,
    pub phase: GamePhase,
    /// Rounds started this session (1-based)
    pub round: u32,
    /// Frames simulated in the current round
    pub frame: u64,
    /// Events produced by the most recent step
    pub events: Vec<GameEvent>,
    /// Rebound spin source. Keeps running across restarts.
    rng: Pcg32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            paddle: Paddle::new(tuning.paddle_speed),
            ball: Ball::new(tuning.ball_speed),
            bricks: init_bricks(),
            score: 0,
            phase: GamePhase::Playing,
            round: 1,
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.events.push(GameEvent::RoundStarted { round: 1 });
        log::info!("Round 1 started (seed {})", seed);
        state
    }

    /// Reset paddle, ball, bricks and score and start a new round
    pub fn restart(&mut self) {
        self.paddle = Paddle::new(self.tuning.paddle_speed);
        self.ball = Ball::new(self.tuning.ball_speed);
        self.bricks = init_bricks();
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.round += 1;
        self.frame = 0;
        self.events.push(GameEvent::RoundStarted { round: self.round });
        log::info!("Round {} started", self.round);
    }

    /// Number of bricks still standing
    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// Split borrow used by the step: ball, paddle and RNG together
    pub(super) fn paddle_contact_parts(&mut self) -> (&mut Ball, &Paddle, &mut Pcg32) {
        (&mut self.ball, &self.paddle, &mut self.rng)
    }
}

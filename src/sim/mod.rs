//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (speeds are per frame)
//! - Seeded RNG only
//! - Stable iteration order (bricks in grid order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bricks;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use bricks::{BRICK_TIERS, Brick, BrickTier, init_bricks};
pub use clock::FrameClock;
pub use collision::{Aabb, WallContact, wall_contact};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{StepInput, step};

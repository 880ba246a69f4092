//! Brick grid
//!
//! The grid is rebuilt from scratch each round. Bricks never move and are
//! never removed from the sequence; destroyed bricks are only flagged
//! inactive so indices stay stable for the whole round.

use super::collision::Aabb;
use crate::Color;
use crate::consts::*;

/// Color and reward shared by every brick in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickTier {
    pub color: Color,
    pub score: u32,
}

/// Row tiers, top to bottom. Rows further from the paddle are worth more.
pub const BRICK_TIERS: [BrickTier; BRICK_ROWS] = [
    BrickTier { color: Color::RED, score: 50 },
    BrickTier { color: Color::ORANGE, score: 40 },
    BrickTier { color: Color::YELLOW, score: 30 },
    BrickTier { color: Color::GREEN, score: 20 },
    BrickTier { color: Color::BLUE, score: 10 },
];

/// A single brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub bounds: Aabb,
    pub active: bool,
    pub color: Color,
    pub score: u32,
}

impl Brick {
    /// Brick at the given grid cell
    pub fn at(row: usize, col: usize, tier: BrickTier) -> Self {
        let x = col as f32 * (BRICK_WIDTH + BRICK_GAP) + BRICK_GAP;
        let y = row as f32 * (BRICK_HEIGHT + BRICK_GAP) + BRICK_GAP + BRICK_OFFSET;
        Self {
            bounds: Aabb::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
            active: true,
            color: tier.color,
            score: tier.score,
        }
    }

    /// Deactivate the brick, returning its reward.
    ///
    /// Returns `None` if it was already destroyed, so a brick can only ever
    /// pay out once per round.
    pub fn destroy(&mut self) -> Option<u32> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.score)
    }
}

/// Build the full grid in row-major order
pub fn init_bricks() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_COUNT);
    for (row, tier) in BRICK_TIERS.iter().enumerate() {
        for col in 0..BRICK_COLS {
            bricks.push(Brick::at(row, col, *tier));
        }
    }
    bricks
}

/// True once every brick in the round has been destroyed
pub fn all_cleared(bricks: &[Brick]) -> bool {
    bricks.iter().all(|b| !b.active)
}

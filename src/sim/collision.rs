//! Collision detection for axis-aligned rectangles
//!
//! Everything in Breakout is a rectangle, so all tests are AABB overlaps.
//! Contact is inclusive: touching edges count as a hit. There is no
//! penetration depth and no positional correction.

use glam::Vec2;

/// An axis-aligned bounding box (top-left corner plus size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Four-way inclusive overlap test
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max().x >= other.min.x
            && self.min.x <= other.max().x
            && self.max().y >= other.min.y
            && self.min.y <= other.max().y
    }
}

/// Which walls a box is touching this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right wall
    pub side: bool,
    /// Ceiling
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Check a box against the left, right and top screen edges.
///
/// There is no bottom wall: falling out of the screen is the loss condition.
pub fn wall_contact(bounds: &Aabb, screen_width: f32) -> WallContact {
    WallContact {
        side: bounds.min.x <= 0.0 || bounds.min.x >= screen_width - bounds.size.x,
        top: bounds.min.y <= 0.0,
    }
}

//! Collision detection between the ball and paddles
//!
//! Plain overlap tests only. Response (flipping horizontal speed) is applied
//! by the caller with no positional correction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Check whether a circle overlaps a rectangle (touching counts)
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let half = rect.size / 2.0;
    let d = (center - rect.center()).abs();

    // Too far on either axis
    if d.x > half.x + radius || d.y > half.y + radius {
        return false;
    }

    // Centre within the rectangle's extent on one axis
    if d.x <= half.x || d.y <= half.y {
        return true;
    }

    // Corner region
    (d - half).length_squared() <= radius * radius
}

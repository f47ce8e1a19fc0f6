//! Axis-aligned collision detection
//!
//! Hitboxes are shrunk by a fixed margin on all four sides, so a graze that
//! only touches the drawn outlines is forgiven.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use crate::consts::COLLISION_MARGIN;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap after shrinking both rectangles by `margin` per side
    pub fn overlaps_with_margin(&self, other: &Rect, margin: f32) -> bool {
        let a_min = self.min + Vec2::splat(margin);
        let a_max = self.max() - Vec2::splat(margin);
        let b_min = other.min + Vec2::splat(margin);
        let b_max = other.max() - Vec2::splat(margin);

        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Index of the first obstacle hitting `car`, if any (stops at the first hit)
pub fn first_collision(car: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| car.overlaps_with_margin(&o.rect(), COLLISION_MARGIN))
}

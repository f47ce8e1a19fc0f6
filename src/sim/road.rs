//! Road geometry derived from the play-area size

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Lane layout for the current viewport
///
/// Recomputed only when the viewport changes; read-only during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadGeometry {
    /// Play-area width
    pub width: f32,
    /// Play-area height
    pub height: f32,
    /// Paved width (lanes span this)
    pub road_width: f32,
    pub lane_count: usize,
}

impl RoadGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_lanes(width, height, LANE_COUNT)
    }

    pub fn with_lanes(width: f32, height: f32, lane_count: usize) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            width,
            height,
            road_width: width * ROAD_WIDTH_FRACTION,
            lane_count: lane_count.max(1),
        }
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.road_width / self.lane_count as f32
    }

    /// Left edge of the paved road
    #[inline]
    pub fn road_left(&self) -> f32 {
        (self.width - self.road_width) / 2.0
    }

    /// Highest valid lane index
    #[inline]
    pub fn last_lane(&self) -> usize {
        self.lane_count - 1
    }

    /// X of an item of `item_width` centered in `lane`
    pub fn lane_x(&self, lane: usize, item_width: f32) -> f32 {
        let lane_width = self.lane_width();
        self.road_left() + lane as f32 * lane_width + (lane_width - item_width) / 2.0
    }

    /// Home position of the player car (horizontally centered, near the bottom)
    pub fn car_home(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - CAR_WIDTH / 2.0,
            self.height - CAR_HEIGHT - CAR_BOTTOM_GAP,
        )
    }

    /// Middle lane (where the car starts)
    #[inline]
    pub fn middle_lane(&self) -> usize {
        self.lane_count / 2
    }
}

/// Advance the cosmetic lane-dash phase by `speed`, wrapping at the dash period
pub fn scroll(offset: f32, speed: f32) -> f32 {
    let next = offset + speed;
    if next > ROAD_DASH_PERIOD { 0.0 } else { next }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_layout() {
        let road = RoadGeometry::new(500.0, 600.0);
        assert_eq!(road.road_width, 400.0);
        assert_eq!(road.road_left(), 50.0);
        assert!((road.lane_width() - 400.0 / 3.0).abs() < 1e-4);

        // Lanes are evenly spaced slots
        let x0 = road.lane_x(0, OBSTACLE_WIDTH);
        let x1 = road.lane_x(1, OBSTACLE_WIDTH);
        let x2 = road.lane_x(2, OBSTACLE_WIDTH);
        assert!(((x1 - x0) - road.lane_width()).abs() < 1e-4);
        assert!(((x2 - x1) - road.lane_width()).abs() < 1e-4);
    }

    #[test]
    fn test_middle_lane_is_centered() {
        let road = RoadGeometry::new(500.0, 600.0);
        let lane_x = road.lane_x(road.middle_lane(), CAR_WIDTH);
        assert!((lane_x - road.car_home().x).abs() < 1e-3);
        assert_eq!(road.car_home().y, 600.0 - CAR_HEIGHT - CAR_BOTTOM_GAP);
    }

    #[test]
    fn test_scroll_wraps() {
        assert_eq!(scroll(10.0, 5.0), 15.0);
        assert_eq!(scroll(38.0, 5.0), 0.0);
        assert_eq!(scroll(35.0, 5.0), 40.0);
    }
}

//! Obstacles, their motion, and pass scoring

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::road::RoadGeometry;
use crate::consts::*;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car,
    Cone,
    Barrier,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Car, ObstacleKind::Cone, ObstacleKind::Barrier];

    /// Stable index for table lookups
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ObstacleKind::Car => 0,
            ObstacleKind::Cone => 1,
            ObstacleKind::Barrier => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Car => "car",
            ObstacleKind::Cone => "cone",
            ObstacleKind::Barrier => "barrier",
        }
    }
}

/// An obstacle scrolling down the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the obstacle has scrolled past the car
    pub passed: bool,
}

impl Obstacle {
    /// Obstacle just above the top of the play area, centered in `lane`
    pub fn spawn(id: u32, kind: ObstacleKind, lane: usize, road: &RoadGeometry) -> Self {
        Self {
            id,
            kind,
            lane,
            pos: Vec2::new(road.lane_x(lane, OBSTACLE_WIDTH), -OBSTACLE_HEIGHT),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            passed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Advance obstacles by `step`, score first-time passes, drop off-screen ones
///
/// Returns the ids of obstacles that were passed this call.
pub fn advance_obstacles(
    obstacles: &mut Vec<Obstacle>,
    step: f32,
    car_trailing_edge: f32,
    visible_height: f32,
) -> Vec<u32> {
    let mut passed = Vec::new();

    for obstacle in obstacles.iter_mut() {
        obstacle.pos.y += step;

        if !obstacle.passed && obstacle.pos.y > car_trailing_edge {
            obstacle.passed = true;
            passed.push(obstacle.id);
        }
    }

    obstacles.retain(|o| o.pos.y <= visible_height);

    passed
}

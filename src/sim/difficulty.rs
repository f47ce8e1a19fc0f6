//! Difficulty curve
//!
//! Everything here is a pure function of distance traveled. The spawn interval
//! decays hyperbolically (`max / (1 + d * rate)`), not linearly; the pacing was
//! tuned against that shape.

use serde::{Deserialize, Serialize};

use crate::consts::DISTANCE_PER_LEVEL;
use crate::tuning::Tuning;

/// Difficulty derived from distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// 1-based tier, only used for spawn-count rolls
    pub level: u32,
    /// Ambient speed added to every obstacle's motion
    pub base_speed: f32,
    /// Minimum wall-clock gap between spawn events
    pub obstacle_interval_ms: f32,
}

impl Difficulty {
    /// Difficulty at distance 0
    pub fn initial(tuning: &Tuning) -> Self {
        compute_difficulty(0.0, tuning)
    }
}

/// Derive level, ambient speed and spawn interval from distance
pub fn compute_difficulty(distance: f32, tuning: &Tuning) -> Difficulty {
    let distance = distance.max(0.0);

    let level = 1 + (distance / DISTANCE_PER_LEVEL).floor() as u32;

    let base_speed = (tuning.base_speed + distance * tuning.base_speed_increase_rate)
        .min(tuning.max_base_speed);

    let factor = 1.0 + distance * tuning.difficulty_increase_rate;
    let obstacle_interval_ms =
        (tuning.max_obstacle_interval_ms / factor).max(tuning.min_obstacle_interval_ms);

    Difficulty {
        level,
        base_speed,
        obstacle_interval_ms,
    }
}

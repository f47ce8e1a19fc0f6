//! Obstacle spawning
//!
//! Spawn events happen on a wall-clock cadence set by the difficulty curve.
//! Each event places one obstacle, or two at higher levels, never two in the
//! same lane.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacles::{Obstacle, ObstacleKind};
use super::road::RoadGeometry;
use crate::consts::SPAWN_LANE_ATTEMPTS;
use crate::tuning::DoubleSpawnRule;

/// Tracks when the last spawn event happened
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub last_spawn_ms: f64,
}

impl SpawnTimer {
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_spawn_ms: now_ms,
        }
    }

    /// Strictly more than `interval_ms` has elapsed
    pub fn is_due(&self, now_ms: f64, interval_ms: f32) -> bool {
        now_ms - self.last_spawn_ms > f64::from(interval_ms)
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.last_spawn_ms = now_ms;
    }
}

/// How many obstacles this batch should try to place
///
/// Every rule whose level is reached rolls independently; any success
/// upgrades the batch to two. Never more than the lane count.
pub fn batch_size<R: Rng>(
    level: u32,
    rules: &[DoubleSpawnRule],
    lane_count: usize,
    rng: &mut R,
) -> usize {
    let mut count = 1;
    for rule in rules {
        if level >= rule.min_level && rng.random::<f64>() < rule.chance {
            count = 2;
        }
    }
    count.min(lane_count)
}

/// Uniformly random obstacle type
pub fn random_kind<R: Rng>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
}

/// Draw a lane not in `occupied`, giving up after a bounded number of draws
fn free_lane<R: Rng>(occupied: &[usize], lane_count: usize, rng: &mut R) -> Option<usize> {
    (0..SPAWN_LANE_ATTEMPTS)
        .map(|_| rng.random_range(0..lane_count))
        .find(|lane| !occupied.contains(lane))
}

/// Build one spawn batch. Lanes that could not be placed are skipped silently.
pub fn spawn_batch<R: Rng>(
    count: usize,
    road: &RoadGeometry,
    rng: &mut R,
    mut next_id: impl FnMut() -> u32,
) -> Vec<Obstacle> {
    let mut occupied = Vec::with_capacity(count);
    let mut batch = Vec::with_capacity(count);

    for _ in 0..count.min(road.lane_count) {
        let Some(lane) = free_lane(&occupied, road.lane_count, rng) else {
            log::debug!("No free lane after {} draws, skipping obstacle", SPAWN_LANE_ATTEMPTS);
            continue;
        };
        occupied.push(lane);

        let kind = random_kind(rng);
        batch.push(Obstacle::spawn(next_id(), kind, lane, road));
    }

    batch
}

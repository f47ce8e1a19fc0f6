//! Per-frame simulation tick
//!
//! Pipeline order (Playing only): car kinematics, difficulty, road scroll,
//! spawning, obstacle motion and scoring, collision.
//!
//! Positions advance by a fixed amount per tick; only spawn cadence is driven
//! by wall-clock time. Hosts running at a different frame rate will see a
//! different game speed.

use super::collision::first_collision;
use super::difficulty::compute_difficulty;
use super::input::Intents;
use super::obstacles::advance_obstacles;
use super::road;
use super::spawner;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Intents drained from the input aggregator
    pub intents: Intents,
    /// Wall-clock timestamp (ms) of this frame
    pub now_ms: f64,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    let now_ms = input.now_ms;

    match session.phase {
        GamePhase::Start | GamePhase::GameOver => {
            if input.intents.confirm {
                session.start(now_ms);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    session.time_ticks += 1;

    // Car
    session
        .car
        .update(&input.intents, &session.road, &session.tuning);

    // Difficulty, then distance at the ambient (not player) speed
    session.difficulty = compute_difficulty(session.distance, &session.tuning);
    session.distance += session.difficulty.base_speed * DISTANCE_SCALE;

    // Lane dashes
    session.road_offset = road::scroll(session.road_offset, session.car.speed);

    spawn_obstacles(session, now_ms);

    // Obstacles approach at player speed plus the ambient floor
    let step = session.car.speed + session.difficulty.base_speed;
    let passed = advance_obstacles(
        &mut session.obstacles,
        step,
        session.car.trailing_edge(),
        session.road.height,
    );
    for id in passed {
        session.score += PASS_SCORE;
        log::debug!("Passed obstacle {} (score {})", id, session.score);
        session.emit(GameEvent::ScoreIncrement {
            score: session.score,
        });
    }

    if let Some(index) = first_collision(&session.car.rect(), &session.obstacles) {
        let id = session.obstacles[index].id;
        session.end_run(id);
    }
}

/// Run a spawn event if the interval has elapsed
fn spawn_obstacles(session: &mut GameSession, now_ms: f64) {
    if !session
        .spawn_timer
        .is_due(now_ms, session.difficulty.obstacle_interval_ms)
    {
        return;
    }

    let GameSession {
        rng,
        road,
        next_id,
        obstacles,
        difficulty,
        tuning,
        spawn_timer,
        ..
    } = session;

    let count = spawner::batch_size(difficulty.level, &tuning.double_spawn, road.lane_count, rng);
    let batch = spawner::spawn_batch(count, road, rng, || {
        let id = *next_id;
        *next_id += 1;
        id
    });

    log::debug!(
        "Spawned {}/{} obstacles at level {}: {:?}",
        batch.len(),
        count,
        difficulty.level,
        batch
            .iter()
            .map(|o| (o.lane, o.kind.as_str()))
            .collect::<Vec<_>>()
    );

    obstacles.extend(batch);
    spawn_timer.reset(now_ms);
}

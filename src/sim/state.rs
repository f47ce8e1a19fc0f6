//! Game session state
//!
//! One explicit context object owns everything the simulation mutates. Platform
//! code reads it (render view, HUD, events) but never writes gameplay fields.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::car::Car;
use super::difficulty::Difficulty;
use super::obstacles::Obstacle;
use super::road::RoadGeometry;
use super::spawner::SpawnTimer;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Active gameplay
    Playing,
    /// Crashed; simulation frozen until confirm
    GameOver,
}

/// Notifications for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (from Start or GameOver)
    GameStarted,
    /// An obstacle was passed
    ScoreIncrement { score: u64 },
    /// The car hit an obstacle; the run is over
    Collision { obstacle_id: u32, summary: RunSummary },
}

/// Final numbers of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub distance: f32,
    pub level: u32,
}

/// Read-only snapshot for the renderer
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub car: &'a Car,
    pub obstacles: &'a [Obstacle],
    pub road: &'a RoadGeometry,
    /// Lane-dash scroll offset
    pub scroll_phase: f32,
    pub phase: GamePhase,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the spawner RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    /// Accumulated points (monotonic within a run)
    pub score: u64,
    /// Distance traveled (monotonic within a run)
    pub distance: f32,
    /// Derived from `distance` every tick
    pub difficulty: Difficulty,
    pub car: Car,
    /// Live obstacles
    pub obstacles: Vec<Obstacle>,
    pub road: RoadGeometry,
    /// Cosmetic lane-dash offset
    pub road_offset: f32,
    pub spawn_timer: SpawnTimer,
    /// Simulation ticks in the current run
    pub time_ticks: u64,
    /// Result of the last finished run
    pub last_run: Option<RunSummary>,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    pub(crate) next_id: u32,
}

impl GameSession {
    /// New session on the title screen
    ///
    /// Fails if `tuning` would let a clamp see an inverted or negative range.
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let road = RoadGeometry::new(width, height);
        Ok(Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            distance: 0.0,
            difficulty: Difficulty::initial(&tuning),
            car: Car::new(&road),
            obstacles: Vec::new(),
            road,
            road_offset: 0.0,
            spawn_timer: SpawnTimer::default(),
            time_ticks: 0,
            last_run: None,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a run (Start -> Playing or GameOver -> Playing)
    ///
    /// Always produces the same initial gameplay state regardless of history.
    /// Does nothing while already playing.
    pub fn start(&mut self, now_ms: f64) {
        if self.phase == GamePhase::Playing {
            return;
        }

        self.reset_run(now_ms);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    fn reset_run(&mut self, now_ms: f64) {
        self.score = 0;
        self.distance = 0.0;
        self.difficulty = Difficulty::initial(&self.tuning);
        self.car = Car::new(&self.road);
        self.obstacles.clear();
        self.road_offset = 0.0;
        self.spawn_timer = SpawnTimer::new(now_ms);
        self.time_ticks = 0;
    }

    /// Playing -> GameOver; the run's numbers are kept for the UI
    pub fn end_run(&mut self, obstacle_id: u32) {
        let summary = self.summary();
        self.phase = GamePhase::GameOver;
        self.last_run = Some(summary);
        self.events.push(GameEvent::Collision {
            obstacle_id,
            summary,
        });
        log::info!(
            "Game over: score {}, distance {}m, level {}",
            summary.score,
            summary.distance.floor(),
            summary.level
        );
    }

    /// Current run's numbers
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            distance: self.distance,
            level: self.difficulty.level,
        }
    }

    /// Viewport changed: relayout lanes and re-home the car, keep the run going
    pub fn resize(&mut self, width: f32, height: f32) {
        self.road = RoadGeometry::with_lanes(width, height, self.road.lane_count);
        self.car.pos = self.road.car_home();
        self.car.lane = self.car.lane.min(self.road.last_lane());
        for obstacle in &mut self.obstacles {
            obstacle.lane = obstacle.lane.min(self.road.last_lane());
            obstacle.pos.x = self.road.lane_x(obstacle.lane, obstacle.size.x);
        }
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the renderer
    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            car: &self.car,
            obstacles: &self.obstacles,
            road: &self.road,
            scroll_phase: self.road_offset,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::ObstacleKind;

    #[test]
    fn test_new_session_waits_on_title() {
        let session = GameSession::new(1, 500.0, 600.0, Tuning::default()).unwrap();
        assert_eq!(session.phase, GamePhase::Start);
        assert_eq!(session.score, 0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.car.lane, 1);
    }

    #[test]
    fn test_start_emits_event_once() {
        let mut session = GameSession::new(1, 500.0, 600.0, Tuning::default()).unwrap();
        session.start(0.0);
        session.start(10.0);
        assert_eq!(session.drain_events(), vec![GameEvent::GameStarted]);
        assert!(session.drain_events().is_empty());
        assert_eq!(session.spawn_timer.last_spawn_ms, 0.0);
    }

    #[test]
    fn test_resize_keeps_run() {
        let mut session = GameSession::new(1, 500.0, 600.0, Tuning::default()).unwrap();
        session.start(0.0);
        session.score = 30;
        session.car.lane = 2;

        session.resize(400.0, 500.0);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score, 30);
        assert_eq!(session.car.lane, 2);
        assert_eq!(session.road.road_width, 320.0);
        assert_eq!(session.car.pos, session.road.car_home());
    }

    #[test]
    fn test_resize_keeps_obstacles_in_lane_slots() {
        let mut session = GameSession::new(1, 500.0, 600.0, Tuning::default()).unwrap();
        session.start(0.0);
        let id = session.next_entity_id();
        let road = session.road;
        session
            .obstacles
            .push(Obstacle::spawn(id, ObstacleKind::Cone, 2, &road));

        session.resize(300.0, 600.0);
        let road = session.road;
        let cone = &session.obstacles[0];
        assert_eq!(cone.lane, 2);
        assert_eq!(cone.pos.x, road.lane_x(2, cone.size.x));
        assert!(cone.pos.x + cone.size.x <= road.road_left() + road.road_width);
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let tuning = Tuning {
            min_speed: 10.0,
            max_speed: 5.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameSession::new(1, 500.0, 600.0, tuning),
            Err(TuningError::InvertedRange { field: "speed", .. })
        ));
    }

    #[test]
    fn test_end_run_records_summary() {
        let mut session = GameSession::new(1, 500.0, 600.0, Tuning::default()).unwrap();
        session.start(0.0);
        session.score = 40;
        session.distance = 123.4;
        session.difficulty.level = 2;
        session.end_run(9);

        let expected = RunSummary {
            score: 40,
            distance: 123.4,
            level: 2,
        };
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.last_run, Some(expected));
        let events = session.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::Collision {
                obstacle_id: 9,
                summary: expected
            })
        );
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Wall-clock time only enters through `TickInput::now_ms`
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod car;
pub mod collision;
pub mod difficulty;
pub mod input;
pub mod obstacles;
pub mod road;
pub mod spawner;
pub mod state;
pub mod tick;

pub use car::Car;
pub use collision::{Rect, first_collision};
pub use difficulty::{Difficulty, compute_difficulty};
pub use input::{Control, Gesture, GestureSample, InputAggregator, InputEvent, Intents};
pub use obstacles::{Obstacle, ObstacleKind, advance_obstacles};
pub use road::RoadGeometry;
pub use spawner::SpawnTimer;
pub use state::{GameEvent, GamePhase, GameSession, RenderView, RunSummary};
pub use tick::{TickInput, tick};

//! Lane Rush - A three-lane arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (car, obstacles, difficulty, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Scene tessellation for whatever host draws the frame
//! - `platform`: Browser/native platform abstraction (frame scheduling)
//! - `persistence`: Key-value preference storage
//! - `audio`: Event-driven sound effects and music
//! - `app`: Frame driver tying the session to its collaborators

pub mod app;
pub mod audio;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of lanes on the road
    pub const LANE_COUNT: usize = 3;

    /// Player car dimensions
    pub const CAR_WIDTH: f32 = 40.0;
    pub const CAR_HEIGHT: f32 = 70.0;
    /// Gap between the car's bottom edge and the bottom of the play area
    pub const CAR_BOTTOM_GAP: f32 = 50.0;

    /// Obstacle dimensions
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;

    /// Road occupies this fraction of the play-area width
    pub const ROAD_WIDTH_FRACTION: f32 = 0.8;

    /// Speed the car relaxes toward when neither pedal is held
    pub const CRUISE_SPEED: f32 = 5.0;
    /// Within this distance of cruise speed the car snaps to it exactly
    pub const SPEED_DEADZONE: f32 = 0.1;
    /// Fraction of the remaining lateral distance covered each tick
    pub const LANE_EASE: f32 = 0.2;

    /// Points awarded when an obstacle passes the car
    pub const PASS_SCORE: u64 = 10;
    /// Hitboxes shrink by this much on every side
    pub const COLLISION_MARGIN: f32 = 5.0;

    /// Distance units per difficulty level
    pub const DISTANCE_PER_LEVEL: f32 = 100.0;
    /// Distance gained per tick, per unit of base speed
    pub const DISTANCE_SCALE: f32 = 0.15;

    /// Lane dash pattern length (road scroll wraps at this offset)
    pub const ROAD_DASH_PERIOD: f32 = 40.0;

    /// Random draws allowed when looking for a free lane in one spawn batch
    pub const SPAWN_LANE_ATTEMPTS: u32 = 10;
}

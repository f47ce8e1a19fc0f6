//! Data-driven game balance
//!
//! Every number a designer might want to turn lives here. Defaults reproduce the
//! shipped pacing; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chance of upgrading a spawn batch to two obstacles once a level is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleSpawnRule {
    /// Difficulty level at which this rule starts rolling
    pub min_level: u32,
    /// Probability (0-1) that the roll succeeds
    pub chance: f64,
}

/// Thresholds used to classify a touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Minimum travel (px) along the dominant axis for a swipe
    pub min_swipe_distance: f32,
    /// Swipes slower than this (ms) are ignored
    pub max_swipe_ms: f64,
    /// Both axes must travel less than this (px) for a tap
    pub tap_distance: f32,
    /// Taps longer than this (ms) are ignored
    pub max_tap_ms: f64,
    /// Speed change applied by a vertical swipe
    pub swipe_speed_nudge: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            min_swipe_distance: 30.0,
            max_swipe_ms: 300.0,
            tap_distance: 10.0,
            max_tap_ms: 200.0,
            swipe_speed_nudge: 2.0,
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Car ===
    pub min_speed: f32,
    pub max_speed: f32,
    /// Speed gained per tick while accelerating
    pub acceleration: f32,
    /// Speed lost per tick while braking
    pub deceleration: f32,
    /// Pull-down rate toward cruise speed (pull-up is half of this)
    pub friction: f32,

    // === Difficulty curve ===
    /// Ambient obstacle speed at distance 0
    pub base_speed: f32,
    /// Ambient speed gained per distance unit
    pub base_speed_increase_rate: f32,
    pub max_base_speed: f32,
    pub min_obstacle_interval_ms: f32,
    pub max_obstacle_interval_ms: f32,
    /// Hyperbolic decay rate of the spawn interval per distance unit
    pub difficulty_increase_rate: f32,

    // === Spawning ===
    pub double_spawn: Vec<DoubleSpawnRule>,

    // === Touch ===
    pub gestures: GestureThresholds,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_speed: 0.0,
            max_speed: 15.0,
            acceleration: 0.3,
            deceleration: 0.2,
            friction: 0.05,

            base_speed: 3.0,
            base_speed_increase_rate: 0.001,
            max_base_speed: 8.0,
            min_obstacle_interval_ms: 600.0,
            max_obstacle_interval_ms: 1500.0,
            difficulty_increase_rate: 0.02,

            double_spawn: vec![
                DoubleSpawnRule {
                    min_level: 3,
                    chance: 0.3,
                },
                DoubleSpawnRule {
                    min_level: 5,
                    chance: 0.15,
                },
            ],

            gestures: GestureThresholds::default(),
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("double spawn chance {0} is outside 0..=1")]
    BadChance(f64),
}

impl Tuning {
    /// Parse and validate a JSON tuning document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject parameter sets that would let clamps produce invalid states
    pub fn validate(&self) -> Result<(), TuningError> {
        let ranges = [
            ("speed", self.min_speed, self.max_speed),
            ("base_speed", self.base_speed, self.max_base_speed),
            (
                "obstacle_interval_ms",
                self.min_obstacle_interval_ms,
                self.max_obstacle_interval_ms,
            ),
        ];
        for (field, min, max) in ranges {
            if !(min <= max) {
                return Err(TuningError::InvertedRange { field, min, max });
            }
        }

        let non_negative = [
            ("min_speed", self.min_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("friction", self.friction),
            ("base_speed", self.base_speed),
            ("base_speed_increase_rate", self.base_speed_increase_rate),
            ("min_obstacle_interval_ms", self.min_obstacle_interval_ms),
            ("difficulty_increase_rate", self.difficulty_increase_rate),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if let Some(rule) = self
            .double_spawn
            .iter()
            .find(|r| !(0.0..=1.0).contains(&r.chance))
        {
            return Err(TuningError::BadChance(rule.chance));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 20.0 }"#).unwrap();
        assert_eq!(tuning.max_speed, 20.0);
        assert_eq!(tuning.base_speed, 3.0);
        assert_eq!(tuning.double_spawn.len(), 2);
        assert_eq!(tuning.gestures.min_swipe_distance, 30.0);
    }

    #[test]
    fn test_nan_range_rejected() {
        let tuning = Tuning {
            max_speed: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedRange { field: "speed", .. })
        ));
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let err = Tuning::from_json(
            r#"{ "min_obstacle_interval_ms": 2000.0, "max_obstacle_interval_ms": 1000.0 }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvertedRange {
                field: "obstacle_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_chance_rejected() {
        let err =
            Tuning::from_json(r#"{ "double_spawn": [{ "min_level": 2, "chance": 1.5 }] }"#)
                .unwrap_err();
        assert!(matches!(err, TuningError::BadChance(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}

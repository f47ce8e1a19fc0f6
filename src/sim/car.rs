//! Player car and its per-tick kinematics
//!
//! Integration is frame-coupled: every tick applies a fixed delta regardless of
//! how much wall-clock time passed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::input::Intents;
use super::road::RoadGeometry;
use crate::consts::*;
use crate::tuning::Tuning;

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Top-left corner (x eases between lanes, y is fixed)
    pub pos: Vec2,
    pub size: Vec2,
    /// Player-controlled speed, also the road scroll rate
    pub speed: f32,
    /// Always in `0..lane_count`
    pub lane: usize,
}

impl Car {
    /// Car parked at its home position in the middle lane
    pub fn new(road: &RoadGeometry) -> Self {
        Self {
            pos: road.car_home(),
            size: Vec2::new(CAR_WIDTH, CAR_HEIGHT),
            speed: 0.0,
            lane: road.middle_lane(),
        }
    }

    /// Hitbox
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Y of the car's trailing (bottom) edge
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Where the car is heading horizontally
    pub fn target_x(&self, road: &RoadGeometry) -> f32 {
        road.lane_x(self.lane, self.size.x)
    }

    /// One tick of longitudinal and lateral motion
    pub fn update(&mut self, intents: &Intents, road: &RoadGeometry, tuning: &Tuning) {
        self.update_speed(intents, tuning);
        self.update_lane(intents, road);

        let target = self.target_x(road);
        self.pos.x += (target - self.pos.x) * LANE_EASE;
    }

    fn update_speed(&mut self, intents: &Intents, tuning: &Tuning) {
        if intents.accelerate {
            self.speed = (self.speed + tuning.acceleration).min(tuning.max_speed);
        } else if intents.decelerate {
            self.speed = (self.speed - tuning.deceleration).max(tuning.min_speed);
        } else if (self.speed - CRUISE_SPEED).abs() < SPEED_DEADZONE {
            // Snap, otherwise friction would flicker around the target
            self.speed = CRUISE_SPEED;
        } else if self.speed > CRUISE_SPEED {
            self.speed -= tuning.friction;
        } else {
            self.speed += tuning.friction * 0.5;
        }

        if intents.speed_nudge != 0.0 {
            self.speed += intents.speed_nudge;
        }

        self.speed = self.speed.clamp(tuning.min_speed, tuning.max_speed);
    }

    fn update_lane(&mut self, intents: &Intents, road: &RoadGeometry) {
        if intents.steer_left {
            self.lane = self.lane.saturating_sub(1);
        }
        if intents.steer_right {
            self.lane += 1;
        }
        self.lane = self.lane.min(road.last_lane());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn road() -> RoadGeometry {
        RoadGeometry::new(500.0, 600.0)
    }

    #[test]
    fn test_starts_centered_in_middle_lane() {
        let road = road();
        let car = Car::new(&road);
        assert_eq!(car.lane, 1);
        assert_eq!(car.speed, 0.0);
        assert!((car.pos.x - car.target_x(&road)).abs() < 1e-3);
    }

    #[test]
    fn test_left_at_lane_zero_stays() {
        let road = road();
        let tuning = Tuning::default();
        let mut car = Car::new(&road);
        car.lane = 0;
        let intents = Intents {
            steer_left: true,
            ..Default::default()
        };
        car.update(&intents, &road, &tuning);
        assert_eq!(car.lane, 0);
    }

    #[test]
    fn test_right_at_last_lane_stays() {
        let road = road();
        let tuning = Tuning::default();
        let mut car = Car::new(&road);
        car.lane = 2;
        let intents = Intents {
            steer_right: true,
            ..Default::default()
        };
        car.update(&intents, &road, &tuning);
        assert_eq!(car.lane, 2);
    }

    #[test]
    fn test_lane_change_eases() {
        let road = road();
        let tuning = Tuning::default();
        let mut car = Car::new(&road);
        let start_x = car.pos.x;
        let intents = Intents {
            steer_right: true,
            ..Default::default()
        };
        car.update(&intents, &road, &tuning);
        assert_eq!(car.lane, 2);

        // Covers exactly 20% of the gap on the first tick
        let target = car.target_x(&road);
        let expected = start_x + (target - start_x) * LANE_EASE;
        assert!((car.pos.x - expected).abs() < 1e-3);

        for _ in 0..60 {
            car.update(&Intents::default(), &road, &tuning);
        }
        assert!((car.pos.x - target).abs() < 0.01);
    }

    #[test]
    fn test_acceleration_clamps() {
        let road = road();
        let tuning = Tuning::default();
        let mut car = Car::new(&road);
        let gas = Intents {
            accelerate: true,
            ..Default::default()
        };
        for _ in 0..200 {
            car.update(&gas, &road, &tuning);
        }
        assert_eq!(car.speed, tuning.max_speed);

        let brake = Intents {
            decelerate: true,
            ..Default::default()
        };
        for _ in 0..200 {
            car.update(&brake, &road, &tuning);
        }
        assert_eq!(car.speed, tuning.min_speed);
    }

    #[test]
    fn test_relaxes_to_cruise_and_snaps() {
        let road = road();
        let tuning = Tuning::default();

        // From below: pull-up at half friction
        let mut car = Car::new(&road);
        car.update(&Intents::default(), &road, &tuning);
        assert!((car.speed - tuning.friction * 0.5).abs() < 1e-6);
        for _ in 0..400 {
            car.update(&Intents::default(), &road, &tuning);
        }
        assert_eq!(car.speed, CRUISE_SPEED);

        // From above: full friction
        car.speed = 10.0;
        car.update(&Intents::default(), &road, &tuning);
        assert!((car.speed - (10.0 - tuning.friction)).abs() < 1e-6);
        for _ in 0..200 {
            car.update(&Intents::default(), &road, &tuning);
        }
        assert_eq!(car.speed, CRUISE_SPEED);

        // Stays put once there
        car.update(&Intents::default(), &road, &tuning);
        assert_eq!(car.speed, CRUISE_SPEED);
    }

    #[test]
    fn test_speed_nudge_is_clamped() {
        let road = road();
        let tuning = Tuning::default();
        let mut car = Car::new(&road);
        car.speed = 14.5;
        let nudge = Intents {
            speed_nudge: 2.0,
            ..Default::default()
        };
        car.update(&nudge, &road, &tuning);
        assert_eq!(car.speed, tuning.max_speed);

        car.speed = 1.0;
        let nudge = Intents {
            speed_nudge: -2.0,
            ..Default::default()
        };
        car.update(&nudge, &road, &tuning);
        assert_eq!(car.speed, tuning.min_speed);
    }

    proptest! {
        #[test]
        fn prop_lane_in_bounds(steps in prop::collection::vec((any::<bool>(), any::<bool>()), 0..200)) {
            let road = road();
            let tuning = Tuning::default();
            let mut car = Car::new(&road);
            for (left, right) in steps {
                let before = car.lane;
                let intents = Intents { steer_left: left, steer_right: right, ..Default::default() };
                car.update(&intents, &road, &tuning);
                prop_assert!(car.lane < road.lane_count);
                prop_assert!(car.lane.abs_diff(before) <= 1);
            }
        }
    }
}

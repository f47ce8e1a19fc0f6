//! Demo autopilot
//!
//! Looks at the session and picks a lane change for this tick. The host merges
//! it into the tick's intents as a one-tick edge, next to (not through) the
//! player's held controls. Used by the headless binary and the in-browser
//! demo toggle.

use super::input::{Control, Intents};
use super::state::{GamePhase, GameSession};

/// How far above the car (px) an obstacle counts as a threat
const LOOKAHEAD: f32 = 220.0;

/// True if `lane` has an unpassed obstacle between the lookahead line and the car's tail
fn lane_threatened(session: &GameSession, lane: usize) -> bool {
    let car = &session.car;
    session.obstacles.iter().any(|o| {
        o.lane == lane
            && !o.passed
            && o.pos.y + o.size.y > car.pos.y - LOOKAHEAD
            && o.pos.y < car.trailing_edge()
    })
}

/// Lane change to make this tick, if any
pub fn plan(session: &GameSession) -> Option<Control> {
    if session.phase != GamePhase::Playing {
        return None;
    }

    let lane = session.car.lane;
    if !lane_threatened(session, lane) {
        return None;
    }

    let mut options = Vec::with_capacity(2);
    if lane > 0 {
        options.push((lane - 1, Control::SteerLeft));
    }
    if lane < session.road.last_lane() {
        options.push((lane + 1, Control::SteerRight));
    }

    // Alternate preference so the car doesn't hug one side
    if session.time_ticks % 2 == 1 {
        options.reverse();
    }

    // Boxed in: nothing useful to do
    options
        .into_iter()
        .find(|(target, _)| !lane_threatened(session, *target))
        .map(|(_, control)| control)
}

/// Fold a planned lane change into this tick's intents
pub fn steer(intents: &mut Intents, control: Control) {
    match control {
        Control::SteerLeft => intents.steer_left = true,
        Control::SteerRight => intents.steer_right = true,
        Control::Accelerate | Control::Decelerate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{InputAggregator, InputEvent};
    use crate::sim::obstacles::{Obstacle, ObstacleKind};
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::Tuning;

    fn playing() -> GameSession {
        let mut session = GameSession::new(11, 500.0, 600.0, Tuning::default()).unwrap();
        session.start(0.0);
        session
    }

    #[test]
    fn test_idle_when_clear() {
        let session = playing();
        assert_eq!(plan(&session), None);
    }

    #[test]
    fn test_dodges_obstacle_ahead() {
        let mut session = playing();
        let id = session.next_entity_id();
        let mut obstacle = Obstacle::spawn(id, ObstacleKind::Car, 1, &session.road);
        obstacle.pos.y = session.car.pos.y - 150.0;
        session.obstacles.push(obstacle);

        let control = plan(&session).expect("should dodge");
        let mut intents = Intents::default();
        steer(&mut intents, control);
        assert!(intents.steer_left ^ intents.steer_right);
    }

    #[test]
    fn test_player_hold_survives_autopilot_steering() {
        let mut session = playing();
        let id = session.next_entity_id();
        let mut obstacle = Obstacle::spawn(id, ObstacleKind::Car, 1, &session.road);
        obstacle.pos.y = session.car.pos.y - 150.0;
        session.obstacles.push(obstacle);

        // Player holds left; the autopilot steers on the same tick
        let mut input = InputAggregator::default();
        input.push(InputEvent::press(Control::SteerLeft));
        let mut intents = input.snapshot();
        if let Some(control) = plan(&session) {
            steer(&mut intents, control);
        }
        assert!(intents.steer_left || intents.steer_right);

        // A key-repeat press while still held must not re-arm a lane change
        input.push(InputEvent::press(Control::SteerLeft));
        let intents = input.snapshot();
        assert!(!intents.steer_left);
    }

    #[test]
    fn test_survives_a_while() {
        let mut session = playing();
        for i in 1..600 {
            let mut intents = Intents::default();
            if let Some(control) = plan(&session) {
                steer(&mut intents, control);
            }
            let tick_input = TickInput {
                intents,
                now_ms: i as f64 * 1000.0 / 60.0,
            };
            tick(&mut session, &tick_input);
        }
        // Lone obstacles in the opening seconds are always dodgeable
        assert!(session.score >= 20, "score {}", session.score);
    }
}

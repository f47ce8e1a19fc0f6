//! HUD numbers, derived from the session each frame

use serde::Serialize;

use crate::sim::{GamePhase, GameSession};

/// What the score panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    /// Car speed scaled for display (`round(speed * 10)`)
    pub speed_display: i32,
    /// Whole meters traveled
    pub distance_m: u32,
    /// Final numbers, set once a run has ended
    pub final_score: Option<u64>,
    pub final_distance_m: Option<u32>,
}

impl HudSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let last = session.last_run;
        Self {
            phase: session.phase,
            score: session.score,
            level: session.difficulty.level,
            speed_display: (session.car.speed * 10.0).round() as i32,
            distance_m: whole_meters(session.distance),
            final_score: last.map(|run| run.score),
            final_distance_m: last.map(|run| whole_meters(run.distance)),
        }
    }
}

fn whole_meters(distance: f32) -> u32 {
    distance.max(0.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_display_rounding() {
        let mut session = GameSession::new(1, 500.0, 600.0, Tuning::default()).unwrap();
        session.start(0.0);
        session.car.speed = 4.96;
        session.distance = 57.9;
        session.score = 30;

        let hud = HudSnapshot::from_session(&session);
        assert_eq!(hud.speed_display, 50);
        assert_eq!(hud.distance_m, 57);
        assert_eq!(hud.score, 30);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.final_score, None);
    }

    #[test]
    fn test_final_numbers_after_crash() {
        let mut session = GameSession::new(1, 500.0, 600.0, Tuning::default()).unwrap();
        session.start(0.0);
        session.score = 70;
        session.distance = 212.6;
        session.end_run(3);

        let hud = HudSnapshot::from_session(&session);
        assert_eq!(hud.phase, GamePhase::GameOver);
        assert_eq!(hud.final_score, Some(70));
        assert_eq!(hud.final_distance_m, Some(212));
    }
}

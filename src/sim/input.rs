//! Input aggregation
//!
//! Platform callbacks push raw events whenever they fire; the simulation drains
//! them once at the start of each tick and sees a stable [`Intents`] snapshot.
//!
//! Lane changes are edge-triggered: a press arms one lane change, and holding
//! the control does nothing more until it is released.

use std::collections::VecDeque;

use glam::Vec2;

use crate::tuning::GestureThresholds;

/// A held control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SteerLeft,
    SteerRight,
    Accelerate,
    Decelerate,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::SteerLeft),
            "ArrowRight" => Some(Control::SteerRight),
            "ArrowUp" => Some(Control::Accelerate),
            "ArrowDown" => Some(Control::Decelerate),
            _ => None,
        }
    }
}

/// A completed touch gesture (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start: Vec2,
    pub end: Vec2,
    pub elapsed_ms: f64,
}

/// What a gesture means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    SwipeLeft,
    SwipeRight,
    /// Toward the top of the screen
    SwipeUp,
    SwipeDown,
    Tap,
    /// Too slow, too short or too diagonal to mean anything
    Ignored,
}

impl GestureSample {
    /// Classify by dominant axis, travel distance and duration
    pub fn classify(&self, thresholds: &GestureThresholds) -> Gesture {
        let delta = self.end - self.start;
        let abs = delta.abs();
        let quick_swipe = self.elapsed_ms < thresholds.max_swipe_ms;

        if abs.x > abs.y && abs.x > thresholds.min_swipe_distance && quick_swipe {
            if delta.x > 0.0 {
                Gesture::SwipeRight
            } else {
                Gesture::SwipeLeft
            }
        } else if abs.y > abs.x && abs.y > thresholds.min_swipe_distance && quick_swipe {
            if delta.y < 0.0 {
                Gesture::SwipeUp
            } else {
                Gesture::SwipeDown
            }
        } else if abs.x < thresholds.tap_distance
            && abs.y < thresholds.tap_distance
            && self.elapsed_ms < thresholds.max_tap_ms
        {
            Gesture::Tap
        } else {
            Gesture::Ignored
        }
    }
}

/// Raw input as delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key or on-screen button pressed/released
    Control { control: Control, pressed: bool },
    /// Space / tap / start or restart button
    Confirm,
    /// Finished touch gesture on the play area
    Gesture(GestureSample),
}

impl InputEvent {
    pub fn press(control: Control) -> Self {
        InputEvent::Control {
            control,
            pressed: true,
        }
    }

    pub fn release(control: Control) -> Self {
        InputEvent::Control {
            control,
            pressed: false,
        }
    }
}

/// Logical intents for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intents {
    pub accelerate: bool,
    pub decelerate: bool,
    /// Move one lane left this tick (edge, not level)
    pub steer_left: bool,
    /// Move one lane right this tick (edge, not level)
    pub steer_right: bool,
    /// Start or restart (ignored while playing)
    pub confirm: bool,
    /// One-off speed change from vertical swipes
    pub speed_nudge: f32,
}

/// Collapses raw events into per-tick intents
#[derive(Debug, Default)]
pub struct InputAggregator {
    queue: VecDeque<InputEvent>,
    thresholds: GestureThresholds,

    // Level state
    left_held: bool,
    right_held: bool,
    accelerate_held: bool,
    decelerate_held: bool,

    // Edges waiting for the next snapshot
    left_armed: bool,
    right_armed: bool,
    confirm: bool,
    speed_nudge: f32,
}

impl InputAggregator {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            ..Default::default()
        }
    }

    /// Queue an event for the next tick (safe to call from any platform callback)
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Fold one event into the intent set
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Control { control, pressed } => self.set_control(control, pressed),
            InputEvent::Confirm => self.confirm = true,
            InputEvent::Gesture(sample) => match sample.classify(&self.thresholds) {
                Gesture::SwipeLeft => self.left_armed = true,
                Gesture::SwipeRight => self.right_armed = true,
                Gesture::SwipeUp => self.speed_nudge += self.thresholds.swipe_speed_nudge,
                Gesture::SwipeDown => self.speed_nudge -= self.thresholds.swipe_speed_nudge,
                Gesture::Tap => self.confirm = true,
                Gesture::Ignored => {}
            },
        }
    }

    fn set_control(&mut self, control: Control, pressed: bool) {
        match control {
            Control::SteerLeft => {
                // Key repeat re-sends "pressed" while held; only a fresh press arms
                if pressed && !self.left_held {
                    self.left_armed = true;
                }
                self.left_held = pressed;
            }
            Control::SteerRight => {
                if pressed && !self.right_held {
                    self.right_armed = true;
                }
                self.right_held = pressed;
            }
            Control::Accelerate => self.accelerate_held = pressed,
            Control::Decelerate => self.decelerate_held = pressed,
        }
    }

    /// Drain queued events and return this tick's intents, consuming edges
    pub fn snapshot(&mut self) -> Intents {
        while let Some(event) = self.queue.pop_front() {
            self.apply(event);
        }

        let intents = Intents {
            accelerate: self.accelerate_held,
            decelerate: self.decelerate_held,
            steer_left: self.left_armed,
            steer_right: self.right_armed,
            confirm: self.confirm,
            speed_nudge: self.speed_nudge,
        };

        self.left_armed = false;
        self.right_armed = false;
        self.confirm = false;
        self.speed_nudge = 0.0;

        intents
    }

    /// Forget everything held or pending (focus loss, teardown)
    pub fn clear(&mut self) {
        let thresholds = self.thresholds;
        *self = Self::new(thresholds);
    }

    /// Number of events waiting for the next tick
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(dx: f32, dy: f32, ms: f64) -> InputEvent {
        InputEvent::Gesture(GestureSample {
            start: Vec2::new(100.0, 100.0),
            end: Vec2::new(100.0 + dx, 100.0 + dy),
            elapsed_ms: ms,
        })
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut input = InputAggregator::default();
        input.push(InputEvent::press(Control::SteerLeft));
        assert!(input.snapshot().steer_left);

        // Still held (plus an auto-repeat press): no further lane change
        input.push(InputEvent::press(Control::SteerLeft));
        assert!(!input.snapshot().steer_left);
        assert!(!input.snapshot().steer_left);

        // Release re-arms
        input.push(InputEvent::release(Control::SteerLeft));
        assert!(!input.snapshot().steer_left);
        input.push(InputEvent::press(Control::SteerLeft));
        assert!(input.snapshot().steer_left);
    }

    #[test]
    fn test_tap_within_one_tick_still_counts() {
        let mut input = InputAggregator::default();
        input.push(InputEvent::press(Control::SteerRight));
        input.push(InputEvent::release(Control::SteerRight));
        let intents = input.snapshot();
        assert!(intents.steer_right);
        assert!(!input.snapshot().steer_right);
    }

    #[test]
    fn test_pedals_are_level_triggered() {
        let mut input = InputAggregator::default();
        input.push(InputEvent::press(Control::Accelerate));
        assert!(input.snapshot().accelerate);
        assert!(input.snapshot().accelerate);
        input.push(InputEvent::release(Control::Accelerate));
        assert!(!input.snapshot().accelerate);
    }

    #[test]
    fn test_confirm_is_one_shot() {
        let mut input = InputAggregator::default();
        input.push(InputEvent::Confirm);
        assert_eq!(input.pending(), 1);
        assert!(input.snapshot().confirm);
        assert!(!input.snapshot().confirm);
    }

    #[test]
    fn test_gesture_classification() {
        let t = GestureThresholds::default();
        let classify = |dx: f32, dy: f32, ms: f64| {
            GestureSample {
                start: Vec2::ZERO,
                end: Vec2::new(dx, dy),
                elapsed_ms: ms,
            }
            .classify(&t)
        };

        assert_eq!(classify(50.0, 5.0, 100.0), Gesture::SwipeRight);
        assert_eq!(classify(-50.0, 5.0, 100.0), Gesture::SwipeLeft);
        assert_eq!(classify(5.0, -50.0, 100.0), Gesture::SwipeUp);
        assert_eq!(classify(5.0, 50.0, 100.0), Gesture::SwipeDown);
        assert_eq!(classify(3.0, 3.0, 100.0), Gesture::Tap);
        // Too slow for a swipe
        assert_eq!(classify(50.0, 0.0, 400.0), Gesture::Ignored);
        // Too short for a swipe, too long for a tap
        assert_eq!(classify(20.0, 0.0, 100.0), Gesture::Ignored);
        // Tap held too long
        assert_eq!(classify(2.0, 2.0, 250.0), Gesture::Ignored);
    }

    #[test]
    fn test_gestures_map_to_intents() {
        let mut input = InputAggregator::default();
        input.push(gesture(-60.0, 0.0, 120.0));
        input.push(gesture(0.0, -60.0, 120.0));
        let intents = input.snapshot();
        assert!(intents.steer_left);
        assert_eq!(intents.speed_nudge, 2.0);

        input.push(gesture(1.0, 1.0, 50.0));
        assert!(input.snapshot().confirm);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::SteerLeft));
        assert_eq!(Control::from_key("ArrowDown"), Some(Control::Decelerate));
        assert_eq!(Control::from_key("x"), None);
    }
}

//! Browser scheduler on top of `requestAnimationFrame`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{Scheduler, TickCallback};

/// Schedules frames with `window.requestAnimationFrame`
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrameScheduler;

impl Scheduler for AnimationFrameScheduler {
    fn schedule_next_tick(&self, callback: TickCallback) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; animation loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| callback(time));
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed; animation loop stopped");
        }
        closure.forget();
    }
}

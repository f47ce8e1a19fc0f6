//! Event-driven audio
//!
//! The simulation raises [`GameEvent`]s; the [`AudioDirector`] turns them into
//! sound effects and background music on whatever [`AudioSink`] the platform
//! provides. Sinks swallow their own failures (autoplay blocked, no audio
//! device) so nothing here can interrupt a tick.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Obstacle passed
    Score,
    /// Car hit an obstacle
    Crash,
}

/// Something that can make noise
pub trait AudioSink {
    fn play(&self, effect: SoundEffect);
    fn start_music(&self);
    fn stop_music(&self);
}

/// Sink that only logs (headless native runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&self, effect: SoundEffect) {
        log::debug!("sfx: {:?}", effect);
    }

    fn start_music(&self) {
        log::debug!("music: start");
    }

    fn stop_music(&self) {
        log::debug!("music: stop");
    }
}

/// Maps game events to sounds and owns the mute state
pub struct AudioDirector<S: AudioSink> {
    sink: S,
    muted: bool,
}

impl<S: AudioSink> AudioDirector<S> {
    pub fn new(sink: S, muted: bool) -> Self {
        Self { sink, muted }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// React to one simulation event
    pub fn handle(&self, event: &GameEvent) {
        if self.muted {
            return;
        }
        match event {
            GameEvent::GameStarted => self.sink.start_music(),
            GameEvent::ScoreIncrement { .. } => self.sink.play(SoundEffect::Score),
            GameEvent::Collision { .. } => {
                self.sink.stop_music();
                self.sink.play(SoundEffect::Crash);
            }
        }
    }

    /// Mute/unmute; unmuting mid-run brings the music back
    pub fn set_muted(&mut self, muted: bool, playing: bool) {
        self.muted = muted;
        if muted {
            self.sink.stop_music();
        } else if playing {
            self.sink.start_music();
        }
    }
}

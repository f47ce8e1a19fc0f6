//! Game host shared by the native and web entry points
//!
//! Owns the session plus its collaborators and runs one frame at a time:
//! drain input, tick once, dispatch events.

use crate::audio::{AudioDirector, AudioSink};
use crate::hud::HudSnapshot;
use crate::persistence::KvStore;
use crate::renderer::{Vertex, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameSession, InputAggregator, InputEvent, TickInput};
use crate::sim::{autopilot, tick};

pub struct App<A: AudioSink> {
    session: GameSession,
    input: InputAggregator,
    audio: AudioDirector<A>,
    settings: Settings,
    store: Box<dyn KvStore>,
    /// Demo mode: the autopilot adds lane changes on top of player input
    autopilot: bool,
}

impl<A: AudioSink> App<A> {
    /// Wrap a session; settings come from `store`
    pub fn new(session: GameSession, sink: A, store: Box<dyn KvStore>) -> Self {
        let settings = Settings::load(&*store);
        Self {
            input: InputAggregator::new(session.tuning.gestures),
            audio: AudioDirector::new(sink, settings.muted),
            session,
            settings,
            store,
            autopilot: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &AudioDirector<A> {
        &self.audio
    }

    /// Queue a platform input event for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at host time `now_ms`; returns the events it raised
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut intents = self.input.snapshot();
        if self.autopilot {
            if let Some(control) = autopilot::plan(&self.session) {
                autopilot::steer(&mut intents, control);
            }
        }

        let input = TickInput { intents, now_ms };
        tick(&mut self.session, &input);

        let events = self.session.drain_events();
        for event in &events {
            if let GameEvent::ScoreIncrement { score } = event {
                log::debug!("Score: {}", score);
            }
            self.audio.handle(event);
        }
        events
    }

    /// Flip the mute flag and persist it; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.settings.muted;
        self.settings.muted = muted;
        self.audio
            .set_muted(muted, self.session.phase == GamePhase::Playing);
        self.settings.save(&mut *self.store);
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        muted
    }

    /// Drop held controls and pending edges (window lost focus)
    pub fn release_all_input(&mut self) {
        self.input.clear();
        log::debug!("Input released");
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_session(&self.session)
    }

    /// Triangle list for the current frame
    pub fn scene(&self) -> Vec<Vertex> {
        build_scene(self.session.view())
    }
}

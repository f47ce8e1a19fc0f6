//! Web Audio sink
//!
//! Procedural sounds from oscillators, no asset files. Autoplay restrictions
//! and missing contexts just mean silence.

use std::cell::RefCell;

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, SoundEffect};

const MUSIC_VOLUME: f32 = 0.3;
const CRASH_VOLUME: f32 = 0.5;
const SCORE_VOLUME: f32 = 0.4;

/// Oscillator-backed audio for the browser
pub struct WebAudio {
    ctx: Option<AudioContext>,
    /// Running music voices, stopped together
    music: RefCell<Vec<OscillatorNode>>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music: RefCell::new(Vec::new()),
        }
    }

    /// Context ready to make sound, resumed if the browser suspended it
    fn context(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Two quick rising blips
    fn play_score(ctx: &AudioContext) {
        let t = ctx.current_time();
        for (i, freq) in [660.0, 990.0].into_iter().enumerate() {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Square) else {
                return;
            };
            let start = t + i as f64 * 0.06;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(SCORE_VOLUME * 0.25, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.08)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.1).ok();
        }
    }

    /// Low falling sawtooth
    fn play_crash(ctx: &AudioContext) {
        let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(CRASH_VOLUME * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.65).ok();
    }
}

impl AudioSink for WebAudio {
    fn play(&self, effect: SoundEffect) {
        let Some(ctx) = self.context() else { return };
        match effect {
            SoundEffect::Score => Self::play_score(ctx),
            SoundEffect::Crash => Self::play_crash(ctx),
        }
    }

    fn start_music(&self) {
        let Some(ctx) = self.context() else { return };
        // Restarting replaces any voices still running
        self.stop_music();

        let mut voices = self.music.borrow_mut();
        for (freq, osc_type, level) in [
            (55.0, OscillatorType::Triangle, 0.35),
            (110.0, OscillatorType::Square, 0.08),
        ] {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, osc_type) else {
                continue;
            };
            gain.gain().set_value(MUSIC_VOLUME * level);
            if osc.start().is_ok() {
                voices.push(osc);
            }
        }
    }

    fn stop_music(&self) {
        for osc in self.music.borrow_mut().drain(..) {
            osc.stop().ok();
        }
    }
}

//! Audio cue sink
//!
//! The simulation only emits events; this module turns them into
//! fire-and-forget sound effects. On the web the tones are synthesised with
//! the Web Audio API, no external files needed. Native builds log the cues.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Impulse applied
    Jump,
    /// Obstacle passed
    Score,
    /// Run ended
    Die,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Died { .. } => Some(SoundEffect::Die),
            GameEvent::Started => None,
        }
    }
}

/// Something that can play cues. Must never block.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Called on the first user gesture (browsers keep audio suspended until then)
    fn resume(&mut self) {}
}

/// Silent sink
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Sink that logs and remembers every cue
#[derive(Debug, Default, Clone)]
pub struct LogAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("Sound cue: {:?}", effect);
        self.played.push(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Web Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 1.0 }
        }

        /// Set volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Jump - quick rising chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(vol * 0.05, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Score - two-note ding (C5 then E5)
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            let peak = vol * 0.1;

            for (freq, offset, len) in [(523.25, 0.0, 0.15), (659.25, 0.03, 0.15)] {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                    continue;
                };
                let start = t + offset;
                gain.gain().set_value_at_time(0.0, start).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(peak, start + 0.01)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + len)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + len).ok();
            }
        }

        /// Die - falling square buzz
        fn play_die(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.3)
                .ok();
            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    impl AudioSink for AudioManager {
        fn resume(&mut self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn play(&mut self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, self.volume),
                SoundEffect::Score => self.play_score(ctx, self.volume),
                SoundEffect::Die => self.play_die(ctx, self.volume),
            }
        }
    }
}

//! Audio and haptics using the Web Audio and Vibration APIs
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{FeedbackSink, vibration_pattern};
use crate::sim::{Haptic, Sound};

/// Celebration arpeggio: C5, E5, G5, C6
const ARPEGGIO: [f32; 4] = [523.0, 659.0, 784.0, 1047.0];

/// Browser feedback sink
pub struct AudioManager {
    ctx: Option<AudioContext>,
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
        Self { ctx }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound at the given volume
    pub fn play(&self, sound: Sound, vol: f32) {
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match sound {
            Sound::Pop => self.play_pop(ctx, vol),
            Sound::Celebration => self.play_celebration(ctx, vol),
        }
    }

    /// Vibrate the device, if it can
    pub fn vibrate(&self, haptic: Haptic) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pattern = js_sys::Array::new();
        for ms in vibration_pattern(haptic) {
            pattern.push(&wasm_bindgen::JsValue::from(*ms));
        }
        let _ = window.navigator().vibrate_with_pattern(&pattern);
    }

    // === Sound generators ===

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

    /// Pop - quick downward sweep
    fn play_pop(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(100.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Celebration - ascending arpeggio
    fn play_celebration(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in ARPEGGIO.iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }
}

impl FeedbackSink for AudioManager {
    fn play_sound(&mut self, sound: Sound, volume: f32) {
        self.play(sound, volume);
    }

    fn trigger_haptic(&mut self, haptic: Haptic) {
        self.vibrate(haptic);
    }
}

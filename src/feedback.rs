//! Audio/haptic feedback boundary
//!
//! Games only describe feedback. A sink plays it, best effort: failures are
//! swallowed and never reach game logic.

use crate::settings::Settings;
use crate::sim::{Feedback, Haptic, Sound};

/// Plays sounds and haptics for a platform
pub trait FeedbackSink {
    fn play_sound(&mut self, sound: Sound, volume: f32);
    fn trigger_haptic(&mut self, haptic: Haptic);
}

/// Hand a frame's feedback to a sink, honoring the player's toggles
pub fn dispatch(sink: &mut dyn FeedbackSink, settings: &Settings, feedback: &[Feedback]) {
    let volume = settings.volume();
    for item in feedback {
        match *item {
            Feedback::Sound(sound) if volume > 0.0 => sink.play_sound(sound, volume),
            Feedback::Haptic(haptic) if settings.haptics => sink.trigger_haptic(haptic),
            _ => {}
        }
    }
}

/// Vibration pattern in ms (on, off, on, ...) for a haptic cue
pub fn vibration_pattern(haptic: Haptic) -> &'static [u32] {
    match haptic {
        Haptic::Light => &[10],
        Haptic::Medium => &[20],
        Haptic::Success => &[30, 60, 30],
        Haptic::Warning => &[50, 40, 50],
    }
}

/// Logs feedback instead of playing it (native demo)
#[derive(Debug, Default)]
pub struct LogSink;

impl FeedbackSink for LogSink {
    fn play_sound(&mut self, sound: Sound, volume: f32) {
        log::debug!("♪ {:?} at {:.2}", sound, volume);
    }

    fn trigger_haptic(&mut self, haptic: Haptic) {
        log::debug!("~ {:?} {:?}", haptic, vibration_pattern(haptic));
    }
}

/// Collects feedback for inspection
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sounds: Vec<Sound>,
    pub haptics: Vec<Haptic>,
}

impl FeedbackSink for RecordingSink {
    fn play_sound(&mut self, sound: Sound, _volume: f32) {
        self.sounds.push(sound);
    }

    fn trigger_haptic(&mut self, haptic: Haptic) {
        self.haptics.push(haptic);
    }
}

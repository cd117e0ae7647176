//! Toddles - touchscreen mini-games for toddlers
//!
//! Core modules:
//! - `sim`: Deterministic mini-game core (spawning, motion, touch resolution, rounds)
//! - `games`: Bubble Pop, Color Match, Number Catch and Shape Sorter
//! - `shell`: Home menu and screen navigation
//! - `feedback`: Audio/haptic feedback boundary
//! - `settings`: Player preferences and per-game tuning

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod autoplay;
pub mod feedback;
pub mod games;
pub mod settings;
pub mod shell;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{Settings, SettingsError};
pub use shell::{App, Screen};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame on most phones)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default logical viewport (portrait phone, in points)
    pub const VIEWPORT_WIDTH: f32 = 390.0;
    pub const VIEWPORT_HEIGHT: f32 = 844.0;

    /// Extra touch slop around entities - toddler fingers are imprecise
    pub const HIT_SLOP: f32 = 15.0;
    /// Pop-out effect length for a resolved entity (ms)
    pub const POP_DURATION_MS: u32 = 200;
}

/// Convert a millisecond duration to whole simulation ticks (rounded, never zero)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    let ticks = (ms as u64 * consts::TICKS_PER_SECOND as u64 + 500) / 1000;
    (ticks as u32).max(1)
}

/// Logical screen area the games lay themselves out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::VIEWPORT_WIDTH,
            height: consts::VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a point lies on screen
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }
}

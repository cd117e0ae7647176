//! Browser bindings
//!
//! A JS renderer owns the canvas and the animation frame. It forwards touches
//! here and draws the JSON snapshot each frame returns.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::settings::Settings;
use crate::shell::{App, HOME_CARDS};
use crate::sim::{GameKind, Touch};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialized on hot reload
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Toddles starting...");
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// App handle exported to JS
#[wasm_bindgen]
pub struct WebApp {
    app: App,
    audio: AudioManager,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebApp {
        let seed = js_sys::Date::now() as u64;
        WebApp {
            app: App::new(Settings::load(), seed),
            audio: AudioManager::new(),
            last_time: None,
        }
    }

    /// Home menu cards as JSON
    pub fn home_cards(&self) -> Result<String, JsValue> {
        serde_json::to_string(&HOME_CARDS).map_err(to_js)
    }

    /// Current screen as JSON
    pub fn screen(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.app.screen()).map_err(to_js)
    }

    /// Open a game by name ("bubble_pop", "shapes", ...)
    pub fn open(&mut self, game: &str) -> Result<(), JsValue> {
        let kind: GameKind = game.parse().map_err(to_js)?;
        // Opening a game is a user gesture; unlock audio now
        self.audio.resume();
        self.app.open(kind);
        self.last_time = None;
        Ok(())
    }

    pub fn back(&mut self) {
        self.app.back();
        self.last_time = None;
    }

    pub fn touch_point(&mut self, x: f32, y: f32) -> bool {
        self.app.touch(Touch::Point(Vec2::new(x, y)))
    }

    pub fn tap_entity(&mut self, id: u32) -> bool {
        self.app.touch(Touch::Entity(id))
    }

    pub fn tap_zone(&mut self, index: usize) -> bool {
        self.app.touch(Touch::Zone(index))
    }

    /// Advance to `now` (ms, from requestAnimationFrame). Returns the
    /// snapshot JSON, or `None` on the home screen.
    pub fn frame(&mut self, now: f64) -> Result<Option<String>, JsValue> {
        let dt = self
            .last_time
            .map(|last| ((now - last) / 1000.0) as f32)
            .unwrap_or(0.0);
        self.last_time = Some(now);

        match self.app.frame(dt, &mut self.audio) {
            Some(snapshot) => serde_json::to_string(&snapshot).map(Some).map_err(to_js),
            None => Ok(None),
        }
    }

    pub fn resume_audio(&self) {
        self.audio.resume();
    }

    /// Replace settings from JSON and persist them
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(to_js)?;
        settings.save().map_err(to_js)?;
        self.app.set_settings(settings);
        Ok(())
    }

    pub fn settings(&self) -> Result<String, JsValue> {
        self.app.settings().to_json().map_err(to_js)
    }
}

impl Default for WebApp {
    fn default() -> Self {
        Self::new()
    }
}

//! Player preferences and per-game tuning
//!
//! Persisted as JSON in LocalStorage on the web. Native builds read an
//! optional file named by `TODDLES_SETTINGS`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Viewport;
use crate::games::{BubblePopConfig, ColorMatchConfig, NumberCatchConfig, ShapeSorterConfig};

/// Settings load/save failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings storage unavailable")]
    StorageUnavailable,
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Player preferences and game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Feedback ===
    /// Play pop and celebration sounds
    pub sound: bool,
    /// Vibrate on taps and celebrations
    pub haptics: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Accessibility ===
    /// Skip decorative animation in the renderer
    pub reduced_motion: bool,

    // === Layout ===
    pub viewport: Viewport,

    // === Games ===
    pub bubble_pop: BubblePopConfig,
    pub color_match: ColorMatchConfig,
    pub number_catch: NumberCatchConfig,
    pub shape_sorter: ShapeSorterConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            haptics: true,
            master_volume: 0.8,

            reduced_motion: false,

            viewport: Viewport::default(),

            bubble_pop: BubblePopConfig::default(),
            color_match: ColorMatchConfig::default(),
            number_catch: NumberCatchConfig::default(),
            shape_sorter: ShapeSorterConfig::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "toddles_settings";

    /// Environment variable naming a native settings file
    pub const ENV_PATH: &'static str = "TODDLES_SETTINGS";

    /// Parse settings; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Effective playback volume (0 when sound is off)
    pub fn volume(&self) -> f32 {
        if self.sound { self.master_volume } else { 0.0 }
    }

    /// Read a settings file
    pub fn load_file(path: &str) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write a settings file
    pub fn save_file(&self, path: &str) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, SettingsError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(SettingsError::StorageUnavailable)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage().and_then(|storage| {
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => Self::from_json(&json).map(Some),
                Ok(None) => Ok(None),
                Err(_) => Err(SettingsError::StorageUnavailable),
            }
        });

        match stored {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| SettingsError::StorageUnavailable)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from the file named by `TODDLES_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            return Self::default();
        };
        match Self::load_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings to the file named by `TODDLES_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = std::env::var(Self::ENV_PATH).map_err(|_| SettingsError::StorageUnavailable)?;
        self.save_file(&path)?;
        log::info!("Settings saved to {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TieBreak;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "sound": false,
            "bubble_pop": {"max_bubbles": 4},
            "shape_sorter": {"tie_break": "Nearest"}
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert!(!settings.sound);
        assert!(settings.haptics);
        assert_eq!(settings.bubble_pop.max_bubbles, 4);
        assert_eq!(settings.bubble_pop.spawn_interval_ms, 800);
        assert_eq!(settings.shape_sorter.tie_break, TieBreak::Nearest);
        assert_eq!(settings.viewport, Viewport::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.number_catch.max_target = 9;
        settings.viewport = Viewport::new(800.0, 600.0);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_volume() {
        let mut settings = Settings::from_json(r#"{"master_volume": 3.0}"#).unwrap();
        assert_eq!(settings.volume(), 1.0);
        settings.sound = false;
        assert_eq!(settings.volume(), 0.0);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_file("/nonexistent/toddles.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/toddles.json"));
    }

    #[test]
    fn test_file_round_trip() {
        let name = format!("toddles-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name).to_string_lossy().to_string();
        let mut settings = Settings::default();
        settings.haptics = false;
        settings.save_file(&path).unwrap();
        assert_eq!(Settings::load_file(&path).unwrap(), settings);
        let _ = std::fs::remove_file(&path);
    }
}

//! Player settings and preferences
//!
//! Persisted as `settings.json` in the data directory, separately from the
//! highscore.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::tuning::Tuning;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "medium" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Next preset in menu order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            DifficultyPreset::Easy => DifficultyPreset::Normal,
            DifficultyPreset::Normal => DifficultyPreset::Hard,
            DifficultyPreset::Hard => DifficultyPreset::Easy,
        }
    }

    /// Multiplier on the spawn interval (higher = fewer cats)
    pub fn spawn_interval_factor(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 1.3,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 0.7,
        }
    }

    /// Multiplier on the global cat speed ceiling
    pub fn max_speed_factor(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 0.75,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 1.4,
        }
    }

    /// Scale a tuning for this preset
    pub fn apply(&self, tuning: &mut Tuning) {
        let interval = tuning.spawn_interval_ticks as f32 * self.spawn_interval_factor();
        tuning.spawn_interval_ticks = (interval.round() as u32).max(1);
        tuning.cat_max_speed =
            (tuning.cat_max_speed * self.max_speed_factor()).max(tuning.cat_start_speed);
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyPreset,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Ring the terminal bell when a cat is hit
    pub bell_on_hit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyPreset::Normal,
            show_fps: false,
            bell_on_hit: false,
        }
    }
}

impl Settings {
    /// Tuning for a new session with these settings applied
    pub fn session_tuning(&self, base: &Tuning) -> Tuning {
        let mut tuning = base.clone();
        self.difficulty.apply(&mut tuning);
        tuning
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&storage::settings_path())
    }

    /// Save settings to the default location
    pub fn save(&self) {
        self.save_to(&storage::settings_path());
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(err) => log::warn!("Ignoring malformed settings file: {}", err),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(err) => log::warn!("Failed to save settings: {}", err),
            },
            Err(err) => log::warn!("Failed to encode settings: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_cycle_and_parse() {
        let p = DifficultyPreset::Easy;
        assert_eq!(p.next().next().next(), p);
        assert_eq!(DifficultyPreset::parse("HARD"), Some(DifficultyPreset::Hard));
        assert_eq!(DifficultyPreset::parse("medium"), Some(DifficultyPreset::Normal));
        assert_eq!(DifficultyPreset::parse("insane"), None);
    }

    #[test]
    fn test_presets_scale_tuning() {
        let base = Tuning::default();

        let normal = Settings::default().session_tuning(&base);
        assert_eq!(normal, base);

        let hard = Settings {
            difficulty: DifficultyPreset::Hard,
            ..Default::default()
        }
        .session_tuning(&base);
        assert_eq!(hard.spawn_interval_ticks, 140);
        assert!(hard.cat_max_speed > base.cat_max_speed);

        let easy = Settings {
            difficulty: DifficultyPreset::Easy,
            ..Default::default()
        }
        .session_tuning(&base);
        assert_eq!(easy.spawn_interval_ticks, 260);
        assert!(easy.cat_max_speed >= easy.cat_start_speed);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            difficulty: DifficultyPreset::Easy,
            show_fps: true,
            bell_on_hit: true,
        };
        settings.save_to(&path);
        assert_eq!(Settings::load_from(&path), settings);

        std::fs::write(&path, r#"{"show_fps": true}"#).unwrap();
        let partial = Settings::load_from(&path);
        assert!(partial.show_fps);
        assert_eq!(partial.difficulty, DifficultyPreset::Normal);
    }
}

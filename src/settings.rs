//! Game settings and preferences
//!
//! Persisted separately from the best score as JSON.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Difficulty choice from the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Normal => "normal",
            DifficultyLevel::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(DifficultyLevel::Easy),
            "normal" | "medium" => Some(DifficultyLevel::Normal),
            "hard" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    /// Multiplier on the base spawn interval
    pub fn spawn_interval_scale(&self) -> f32 {
        match self {
            DifficultyLevel::Easy => 1.3,
            DifficultyLevel::Normal => 1.0,
            DifficultyLevel::Hard => 0.75,
        }
    }

    pub fn spawn_interval_ms(&self, base_ms: f32) -> f32 {
        base_ms * self.spawn_interval_scale()
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Last selected difficulty
    pub difficulty: DifficultyLevel,

    // === Visual Effects ===
    /// Screen shake when a malus is caught
    pub screen_shake: bool,
    /// Red flash when a malus is caught
    pub hit_flash: bool,

    // === Audio ===
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    /// Reduced motion (no shake, no flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyLevel::Normal,
            screen_shake: true,
            hit_flash: true,
            sound: true,
            master_volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "catch_settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective hit flash (respects reduced_motion)
    pub fn effective_hit_flash(&self) -> bool {
        self.hit_flash && !self.reduced_motion
    }

    /// Volume to play cues at (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!(DifficultyLevel::from_str("easy"), Some(DifficultyLevel::Easy));
        assert_eq!(DifficultyLevel::from_str(" HARD "), Some(DifficultyLevel::Hard));
        assert_eq!(DifficultyLevel::from_str("normal"), Some(DifficultyLevel::Normal));
        assert_eq!(DifficultyLevel::from_str("insane"), None);
    }

    #[test]
    fn test_spawn_intervals() {
        assert!((DifficultyLevel::Easy.spawn_interval_ms(1200.0) - 1560.0).abs() < 0.01);
        assert_eq!(DifficultyLevel::Normal.spawn_interval_ms(1200.0), 1200.0);
        assert_eq!(DifficultyLevel::Hard.spawn_interval_ms(1200.0), 900.0);
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_hit_flash());
    }

    #[test]
    fn test_muted_volume() {
        let settings = Settings {
            sound: false,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            difficulty: DifficultyLevel::Hard,
            sound: false,
            ..Settings::default()
        };
        settings.save(&mut store).unwrap();

        let loaded = Settings::load(&store);
        assert_eq!(loaded.difficulty, DifficultyLevel::Hard);
        assert!(!loaded.sound);
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_default() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, "{not json");
        let loaded = Settings::load(&store);
        assert_eq!(loaded.difficulty, DifficultyLevel::Normal);
        assert!(loaded.sound);
    }
}

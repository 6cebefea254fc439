//! Key-value settings persisted as JSON: volumes, chosen difficulties, the
//! run id counter and the player's name.
//!
//! Loaded once at startup. Every setter writes the file when the value
//! actually changes.

use std::fs;
use std::path::{Path, PathBuf};

use flappyhawk_core::enums::{Difficulty, GameDayDifficulty};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

pub const FILE_NAME: &str = "settings.json";

pub const DEFAULT_VOLUME: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub master_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub difficulty: Difficulty,
    pub game_day_difficulty: GameDayDifficulty,
    /// Id of the last logged run.
    pub run_id_counter: u32,
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: DEFAULT_VOLUME,
            music_volume: DEFAULT_VOLUME,
            sfx_volume: DEFAULT_VOLUME,
            difficulty: Difficulty::default(),
            game_day_difficulty: GameDayDifficulty::default(),
            run_id_counter: 0,
            player_name: String::new(),
        }
    }
}

/// Which volume channel a setter addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChannel {
    Master,
    Music,
    Sfx,
}

pub fn default_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flappyhawk"))
}

/// Settings bound to the file they are stored in.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Read settings from `dir`. A missing or unreadable file yields defaults.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(FILE_NAME);
        let settings = if !path.exists() {
            info!("No settings file at {path:?}, using defaults");
            Settings::default()
        } else {
            match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(settings) => {
                        info!("Loaded settings from {path:?}");
                        settings
                    }
                    Err(e) => {
                        warn!("Failed to parse settings, using defaults: {e}");
                        Settings::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read settings, using defaults: {e}");
                    Settings::default()
                }
            }
        };
        Self { path, settings }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, json).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Apply `change` and persist if it altered anything. Returns whether the
    /// settings changed.
    fn update(&mut self, change: impl FnOnce(&mut Settings)) -> Result<bool, PersistenceError> {
        let before = self.settings.clone();
        change(&mut self.settings);
        if self.settings == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn volume(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Master => self.settings.master_volume,
            VolumeChannel::Music => self.settings.music_volume,
            VolumeChannel::Sfx => self.settings.sfx_volume,
        }
    }

    pub fn set_volume(
        &mut self,
        channel: VolumeChannel,
        value: f32,
    ) -> Result<bool, PersistenceError> {
        let value = value.max(0.0);
        self.update(|s| match channel {
            VolumeChannel::Master => s.master_volume = value,
            VolumeChannel::Music => s.music_volume = value,
            VolumeChannel::Sfx => s.sfx_volume = value,
        })
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<bool, PersistenceError> {
        self.update(|s| s.difficulty = difficulty)
    }

    pub fn set_game_day_difficulty(
        &mut self,
        difficulty: GameDayDifficulty,
    ) -> Result<bool, PersistenceError> {
        self.update(|s| s.game_day_difficulty = difficulty)
    }

    pub fn set_player_name(&mut self, name: &str) -> Result<bool, PersistenceError> {
        self.update(|s| s.player_name = name.to_string())
    }

    /// Increment and persist the run id counter, returning the new id.
    pub fn next_run_id(&mut self) -> Result<u32, PersistenceError> {
        self.update(|s| s.run_id_counter += 1)?;
        Ok(self.settings.run_id_counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flappyhawk_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = temp_dir("settings_missing");
        let store = SettingsStore::load(&dir);
        assert_eq!(store.settings(), &Settings::default());
        assert_eq!(store.volume(VolumeChannel::Music), DEFAULT_VOLUME);
        assert!(!store.path().exists(), "loading must not create the file");
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = temp_dir("settings_corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "{ not json").unwrap();
        let store = SettingsStore::load(&dir);
        assert_eq!(store.settings(), &Settings::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = temp_dir("settings_partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), r#"{ "difficulty": "Hard" }"#).unwrap();
        let store = SettingsStore::load(&dir);
        assert_eq!(store.settings().difficulty, Difficulty::Hard);
        assert_eq!(store.settings().sfx_volume, DEFAULT_VOLUME);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn changes_are_written_and_reloaded() {
        let dir = temp_dir("settings_roundtrip");
        let mut store = SettingsStore::load(&dir);
        assert!(store.set_volume(VolumeChannel::Sfx, 2.5).unwrap());
        assert!(store.set_game_day_difficulty(GameDayDifficulty::Pro).unwrap());
        assert!(store.set_player_name("Herky").unwrap());

        let reloaded = SettingsStore::load(&dir);
        assert_eq!(reloaded.volume(VolumeChannel::Sfx), 2.5);
        assert_eq!(reloaded.settings().game_day_difficulty, GameDayDifficulty::Pro);
        assert_eq!(reloaded.settings().player_name, "Herky");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unchanged_value_does_not_write() {
        let dir = temp_dir("settings_unchanged");
        let mut store = SettingsStore::load(&dir);
        assert!(!store.set_difficulty(Difficulty::default()).unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn negative_volume_clamps_to_zero() {
        let dir = temp_dir("settings_volume_floor");
        let mut store = SettingsStore::load(&dir);
        store.set_volume(VolumeChannel::Master, -3.0).unwrap();
        assert_eq!(store.volume(VolumeChannel::Master), 0.0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn run_ids_increment_across_loads() {
        let dir = temp_dir("settings_run_ids");
        let mut store = SettingsStore::load(&dir);
        assert_eq!(store.next_run_id().unwrap(), 1);
        assert_eq!(store.next_run_id().unwrap(), 2);

        let mut reloaded = SettingsStore::load(&dir);
        assert_eq!(reloaded.next_run_id().unwrap(), 3);
        let _ = fs::remove_dir_all(&dir);
    }
}

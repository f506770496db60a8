//! Game settings
//!
//! Defaults, overridden by an optional JSON file, overridden in turn by
//! command-line flags (see `main.rs`).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::{LengthClass, Terrain};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Horse catalog CSV
    pub catalog_path: PathBuf,
    /// Seed for reproducible sessions (random when unset)
    pub seed: Option<u64>,

    // === Race ===
    pub length_class: LengthClass,
    pub terrain: Terrain,
    /// Field size range (inclusive)
    pub min_horses: usize,
    pub max_horses: usize,

    // === Display ===
    /// Pause between ticks
    pub tick_ms: u64,
    /// Pause after the race card before the start
    pub grid_pause_ms: u64,
    /// Clear the screen between frames
    pub clear_screen: bool,

    // === Audio ===
    /// Background track, looped during the session
    pub music: Option<PathBuf>,
    /// Played once when a winner is declared
    pub fanfare: Option<PathBuf>,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence music and fanfare without dropping the paths
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            seed: None,

            length_class: LengthClass::Short,
            terrain: Terrain::Dirt,
            min_horses: MIN_FIELD_SIZE,
            max_horses: MAX_FIELD_SIZE,

            tick_ms: DEFAULT_TICK_MS,
            grid_pause_ms: DEFAULT_GRID_PAUSE_MS,
            clear_screen: true,

            music: None,
            fanfare: None,
            music_volume: 0.7,
            mute: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings if the file exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        match Self::load(path.as_ref()) {
            Err(SettingsError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_ms == 0 {
            return Err(SettingsError::Invalid("tick_ms must be positive".into()));
        }
        if self.min_horses == 0 || self.min_horses > self.max_horses {
            return Err(SettingsError::Invalid(format!(
                "horse range {}..={} is empty",
                self.min_horses, self.max_horses
            )));
        }
        if !(0.0..=1.0).contains(&self.music_volume) {
            return Err(SettingsError::Invalid(format!(
                "music_volume {} outside 0.0 - 1.0",
                self.music_volume
            )));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn grid_pause(&self) -> Duration {
        Duration::from_millis(self.grid_pause_ms)
    }
}

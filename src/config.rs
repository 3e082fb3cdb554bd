//! Game settings, read from an optional JSON file next to the executable's
//! working directory. Every field has a default, so a partial file is fine.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use macroquad::logging::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "retro_tetris.json";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible piece sequences.
    pub seed: Option<u64>,
    pub rules: RulesConfig,
    pub audio: AudioConfig,
}

/// Speed curve and scoring knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Seconds per automatic step at level 0.
    pub initial_fall_speed: f32,
    /// Seconds shaved off per level.
    pub fall_speed_step: f32,
    pub min_fall_speed: f32,
    pub lines_per_level: u32,
    pub soft_drop_points: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            initial_fall_speed: 1.0,
            fall_speed_step: 0.1,
            min_fall_speed: 0.1,
            lines_per_level: 10,
            soft_drop_points: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioBackend {
    /// Synthesized music and effects on a background rodio thread.
    Rodio,
    /// No sound; cues are only logged.
    Silent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub backend: AudioBackend,
    pub music_volume: f32,
    pub effects_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            backend: AudioBackend::Rodio,
            music_volume: 0.3,
            effects_volume: 0.5,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(text).context("malformed config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates `path`. A missing file yields `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        Self::from_json(&text)
            .with_context(|| format!("invalid config in {}", path.display()))
            .map(Some)
    }

    /// Like [`GameConfig::load`], but any problem falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(config)) => {
                info!("loaded config from {}", path.display());
                config
            }
            Ok(None) => {
                debug!("no {} found, using default config", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{:#}; using default config", err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let rules = &self.rules;
        ensure!(rules.initial_fall_speed > 0.0, "initial_fall_speed must be positive");
        ensure!(rules.min_fall_speed > 0.0, "min_fall_speed must be positive");
        ensure!(
            rules.min_fall_speed <= rules.initial_fall_speed,
            "min_fall_speed must not exceed initial_fall_speed"
        );
        ensure!(rules.fall_speed_step >= 0.0, "fall_speed_step must not be negative");
        ensure!(rules.lines_per_level > 0, "lines_per_level must be at least 1");
        for (name, volume) in [
            ("music_volume", self.audio.music_volume),
            ("effects_volume", self.audio.effects_volume),
        ] {
            ensure!((0.0..=1.0).contains(&volume), "{} must be within 0.0..=1.0", name);
        }
        Ok(())
    }
}

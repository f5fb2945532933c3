//! Generation parameters and their TOML loader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid must be at least 3x3, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    #[error("minimum room {axis} must be at least 1")]
    EmptyRoomSize { axis: &'static str },

    #[error("room {axis} bounds are inverted: min {min} > max {max}")]
    InvertedRoomBounds { axis: &'static str, min: usize, max: usize },

    #[error("extra door chance must lie in [0, 1], got {0}")]
    ChanceOutOfRange(f32),

    #[error("could not read config file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    pub min_room_width: usize,
    pub max_room_width: usize,
    pub min_room_height: usize,
    pub max_room_height: usize,
    /// Probability of one extra door on top of the spanning tree.
    pub extra_door_chance: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            min_room_width: 2,
            max_room_width: 10,
            min_room_height: 2,
            max_room_height: 10,
            extra_door_chance: 0.0,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::GridTooSmall { width: self.width, height: self.height });
        }
        check_room_axis("width", self.min_room_width, self.max_room_width)?;
        check_room_axis("height", self.min_room_height, self.max_room_height)?;
        if !(0.0..=1.0).contains(&self.extra_door_chance) {
            return Err(ConfigError::ChanceOutOfRange(self.extra_door_chance));
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }
}

fn check_room_axis(axis: &'static str, min: usize, max: usize) -> Result<(), ConfigError> {
    if min == 0 {
        return Err(ConfigError::EmptyRoomSize { axis });
    }
    if min > max {
        return Err(ConfigError::InvertedRoomBounds { axis, min, max });
    }
    Ok(())
}

//! Generator tuning constants, TOML loading, and up-front validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest room side that leaves a mob cell beside the exit.
pub const MIN_ROOM_SIDE: i32 = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("map must be at least 3x3, got {width}x{height}")]
    MapTooSmall { width: i32, height: i32 },

    #[error(
        "map {width}x{height} cannot be partitioned: one side must exceed twice min_node_size ({min_node_size})"
    )]
    MapNotSplittable { width: i32, height: i32, min_node_size: i32 },

    #[error("map dimension {dimension} is smaller than min_node_size {min_node_size}")]
    MapSmallerThanNode { dimension: i32, min_node_size: i32 },

    #[error("padding must be at least 1, got {padding}")]
    PaddingTooSmall { padding: i32 },

    #[error("room size range is invalid: min {min_room_size} (at least 2), max {max_room_size}")]
    InvalidRoomRange { min_room_size: i32, max_room_size: i32 },

    #[error(
        "min_node_size {min_node_size} cannot hold a room of {min_room_size} with padding {padding} on both sides"
    )]
    NodeTooSmallForRoom { min_node_size: i32, min_room_size: i32, padding: i32 },

    #[error("padding {padding} leaves no centred placement window in a {min_node_size} node")]
    PaddingTooLargeForNode { min_node_size: i32, padding: i32 },

    #[error("erosion walk range is invalid: {min}..={max}")]
    InvalidWalkRange { min: u32, max: u32 },

    #[error("erosion weighting must be finite and non-negative, got {0}")]
    InvalidWeighting(f64),

    #[error("{field} must be a positive octave count")]
    ZeroOctaves { field: &'static str },

    #[error("mob extra roll needs 1 <= min ({min}) <= sides ({sides})")]
    InvalidMobRoll { min: u32, sides: u32 },

    #[error("failed to parse generator config: {0}")]
    Parse(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub min_node_size: i32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    pub padding: i32,
    pub erosion_weighting: f64,
    pub erosion_walk_min: u32,
    pub erosion_walk_max: u32,
    pub dirt_octaves: u32,
    pub dirt_threshold: f64,
    pub flower_octaves: u32,
    pub flower_threshold: f64,
    pub mob_extra_attempts: u32,
    pub mob_extra_roll_sides: u32,
    pub mob_extra_roll_min: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            map_width: 64,
            map_height: 56,
            min_node_size: 16,
            min_room_size: 7,
            max_room_size: 16,
            padding: 4,
            erosion_weighting: 0.2,
            erosion_walk_min: 1,
            erosion_walk_max: 3,
            dirt_octaves: 8,
            dirt_threshold: 0.09,
            flower_octaves: 20,
            flower_threshold: 0.21,
            mob_extra_attempts: 2,
            mob_extra_roll_sides: 3,
            mob_extra_roll_min: 2,
        }
    }
}

impl GeneratorConfig {
    /// Parses a TOML document. Keys that are absent keep their default value.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|error| ConfigError::Parse(error.to_string()))
    }

    pub fn erosion_trials(&self) -> usize {
        self.map_width as usize * (self.map_height as usize / 2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.map_width, self.map_height);
        if width < 3 || height < 3 {
            return Err(ConfigError::MapTooSmall { width, height });
        }
        if self.padding < 1 {
            return Err(ConfigError::PaddingTooSmall { padding: self.padding });
        }
        if self.min_room_size < MIN_ROOM_SIDE || self.max_room_size < self.min_room_size {
            return Err(ConfigError::InvalidRoomRange {
                min_room_size: self.min_room_size,
                max_room_size: self.max_room_size,
            });
        }
        if self.min_node_size < self.min_room_size + 2 * self.padding {
            return Err(ConfigError::NodeTooSmallForRoom {
                min_node_size: self.min_node_size,
                min_room_size: self.min_room_size,
                padding: self.padding,
            });
        }
        if self.min_node_size / 2 <= self.padding {
            return Err(ConfigError::PaddingTooLargeForNode {
                min_node_size: self.min_node_size,
                padding: self.padding,
            });
        }
        for dimension in [width, height] {
            if dimension < self.min_node_size {
                return Err(ConfigError::MapSmallerThanNode {
                    dimension,
                    min_node_size: self.min_node_size,
                });
            }
        }
        if width <= 2 * self.min_node_size && height <= 2 * self.min_node_size {
            return Err(ConfigError::MapNotSplittable {
                width,
                height,
                min_node_size: self.min_node_size,
            });
        }
        if self.erosion_walk_min == 0 || self.erosion_walk_max < self.erosion_walk_min {
            return Err(ConfigError::InvalidWalkRange {
                min: self.erosion_walk_min,
                max: self.erosion_walk_max,
            });
        }
        if !self.erosion_weighting.is_finite() || self.erosion_weighting < 0.0 {
            return Err(ConfigError::InvalidWeighting(self.erosion_weighting));
        }
        if self.dirt_octaves == 0 {
            return Err(ConfigError::ZeroOctaves { field: "dirt_octaves" });
        }
        if self.flower_octaves == 0 {
            return Err(ConfigError::ZeroOctaves { field: "flower_octaves" });
        }
        if self.mob_extra_roll_min == 0 || self.mob_extra_roll_min > self.mob_extra_roll_sides {
            return Err(ConfigError::InvalidMobRoll {
                min: self.mob_extra_roll_min,
                sides: self.mob_extra_roll_sides,
            });
        }
        Ok(())
    }
}

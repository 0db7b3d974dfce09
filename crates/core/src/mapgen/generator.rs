//! High-level dungeon generation entry point: validate, seed, run the pipeline.

mod pipeline;

use log::info;

use crate::config::{ConfigError, GeneratorConfig};

use super::model::DungeonMap;
use super::rng::DungeonRng;

pub struct DungeonGenerator {
    seed: u64,
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(seed: u64, config: GeneratorConfig) -> Self {
        Self { seed, config }
    }

    pub fn generate(&self) -> Result<DungeonMap, ConfigError> {
        let mut rng = DungeonRng::from_seed(self.seed);
        self.generate_with_rng(&mut rng)
    }

    /// Generates from a caller-owned stream; `seed` is only recorded on the map.
    pub fn generate_with_rng(&self, rng: &mut DungeonRng) -> Result<DungeonMap, ConfigError> {
        self.config.validate()?;
        let map = pipeline::build_dungeon(&self.config, self.seed, rng).ok_or(
            ConfigError::MapNotSplittable {
                width: self.config.map_width,
                height: self.config.map_height,
                min_node_size: self.config.min_node_size,
            },
        )?;
        info!(
            "generated {}x{} dungeon for seed {}: {} rooms, {} mobs, spawn {:?}",
            map.width,
            map.height,
            self.seed,
            map.rooms.len() + 1,
            map.mob_spawns.len(),
            map.spawn_point
        );
        Ok(map)
    }
}

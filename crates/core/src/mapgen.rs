//! Procedural dungeon generation split into one submodule per pipeline stage.

pub mod classify;
pub mod corridors;
pub mod erosion;
pub mod grid;
pub mod model;
pub mod overlay;
pub mod partition;
pub mod rng;
pub mod rooms;

mod generator;

pub use generator::DungeonGenerator;
pub use grid::Grid;
pub use model::DungeonMap;
pub use partition::{Partition, PartitionNode};
pub use rng::DungeonRng;

use crate::config::{ConfigError, GeneratorConfig};

pub fn generate_dungeon(seed: u64, config: &GeneratorConfig) -> Result<DungeonMap, ConfigError> {
    DungeonGenerator::new(seed, config.clone()).generate()
}

pub mod atlas;
pub mod config;
pub mod mapgen;
pub mod types;

pub use config::{ConfigError, GeneratorConfig, MIN_ROOM_SIDE};
pub use mapgen::{DungeonGenerator, DungeonMap, DungeonRng, Grid, generate_dungeon};
pub use types::*;

//! Dungeon construction pipeline that composes the mapgen stages in order.

use log::debug;

use crate::config::GeneratorConfig;
use crate::types::{Rect, Terrain};

use super::super::classify::classify;
use super::super::corridors::connect;
use super::super::erosion::{ErosionSettings, erode};
use super::super::grid::Grid;
use super::super::model::DungeonMap;
use super::super::overlay::{OverlayContext, build_overlay, place_dirt};
use super::super::partition::partition;
use super::super::rng::DungeonRng;
use super::super::rooms::RoomCarver;

/// Runs every stage against an already validated config.
///
/// Returns `None` only if the config lets the partition end with a single
/// leaf, which validation rules out.
pub(super) fn build_dungeon(
    config: &GeneratorConfig,
    seed: u64,
    rng: &mut DungeonRng,
) -> Option<DungeonMap> {
    let width = config.map_width as usize;
    let height = config.map_height as usize;

    let root = Rect::new(0, 0, config.map_width, config.map_height);
    let layout = partition(root, config.min_node_size, rng);
    debug!("partitioned {width}x{height} map into {} leaves", layout.leaves.len());

    let mut base = Grid::filled(width, height, Terrain::Wall);
    let mut carver = RoomCarver::new(&mut base, config);
    for leaf in &layout.leaves {
        carver.carve_room(*leaf, rng);
    }
    let carved = carver.finish()?;
    debug!("carved {} rooms, spawn room {:?}", carved.rooms.len(), carved.spawn_room());

    connect(&layout.tree, &mut base);
    debug!("corridors opened {} cells", base.count(|cell| cell == Terrain::Corridor));

    let opened = erode(&mut base, &ErosionSettings::from_config(config), rng);
    debug!("erosion opened {opened} cells over {} trials", config.erosion_trials());

    let spawn_room = carved.spawn_room();
    let rooms = carved.listed_rooms();

    let dirt = place_dirt(&mut base, config, rng);
    debug!("dirt covers {dirt} floor cells");

    let tiles = classify(&base);

    let placement =
        build_overlay(&OverlayContext { config, base: &base, rooms: &rooms }, rng)?;
    debug!(
        "overlay: exit in {:?}, {} mobs, {} flowers",
        placement.exit_room,
        placement.mob_spawns.len(),
        placement.flowers
    );

    Some(DungeonMap {
        seed,
        width,
        height,
        tiles,
        overlay: placement.overlay,
        spawn_point: spawn_room.center(),
        spawn_room,
        exit_room: placement.exit_room,
        rooms,
        mob_spawns: placement.mob_spawns,
    })
}

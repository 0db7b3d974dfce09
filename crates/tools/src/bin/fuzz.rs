use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::{DungeonGenerator, DungeonMap, GeneratorConfig, OverlayMarker, TileKind};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    count: u64,
    /// Optional TOML file overriding generator constants
    #[arg(long)]
    config: Option<String>,
}

fn check_invariants(map: &DungeonMap) -> Result<()> {
    let (width, height) = (map.width as i32, map.height as i32);
    for pos in map.tiles.positions() {
        let on_border = pos.x == 0 || pos.y == 0 || pos.x == width - 1 || pos.y == height - 1;
        if on_border && !matches!(map.tile_at(pos), TileKind::Wall(_)) {
            bail!("border tile opened at {pos:?}");
        }
    }

    if !map.all_rooms_reachable() {
        bail!("a room is unreachable from spawn {:?}", map.spawn_point);
    }
    if map.rooms.contains(&map.spawn_room) || map.exit_room == map.spawn_room {
        bail!("spawn room leaked into the room list");
    }
    for room in &map.rooms {
        let has_mob = map.mob_spawns.iter().any(|pos| room.contains(*pos));
        if !has_mob {
            bail!("room {room:?} has no mob");
        }
    }
    let exit = map.exit_room.center();
    if map.marker_at(exit) != OverlayMarker::Exit {
        bail!("exit marker missing at {exit:?}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            GeneratorConfig::from_toml_str(&source)
                .with_context(|| format!("Invalid generator config in {path}"))?
        }
        None => GeneratorConfig::default(),
    };
    config.validate().context("Generator config rejected")?;

    println!("Starting fuzz sweep from seed {} over {} seeds...", args.seed, args.count);
    let mut total_rooms = 0_usize;
    let mut total_mobs = 0_usize;
    for offset in 0..args.count {
        let seed = args.seed.wrapping_add(offset);
        let map = DungeonGenerator::new(seed, config.clone()).generate()?;
        if let Err(error) = check_invariants(&map) {
            bail!("Invariant failed for seed {seed}: {error}");
        }
        total_rooms += map.rooms.len() + 1;
        total_mobs += map.mob_spawns.len();
    }

    println!("Checked {} dungeons: {} rooms, {} mobs.", args.count, total_rooms, total_mobs);
    println!("Fuzzing completed successfully.");
    Ok(())
}

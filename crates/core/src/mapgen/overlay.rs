//! Decoration and spawn overlay: dirt patches, flowers, the exit and mobs.
//!
//! Precedence is fixed by call order: flowers first, then the exit, then mobs.
//! Mobs never land on the exit cell, so a cell shows Exit over Mob over Flower.

use noise::{NoiseFn, Perlin};

use crate::config::GeneratorConfig;
use crate::types::{OverlayMarker, Pos, Rect, Terrain};

use super::grid::Grid;
use super::rng::DungeonRng;

/// Scales Perlin output into the value range the density thresholds were tuned for.
const FIELD_AMPLITUDE: f64 = 0.5;

/// Smooth pseudo-random field over the map, sampled at normalized coordinates.
pub struct NoiseField {
    perlin: Perlin,
    octaves: f64,
    width: f64,
    height: f64,
}

impl NoiseField {
    pub fn new(seed: u32, octaves: u32, width: usize, height: usize) -> Self {
        Self {
            perlin: Perlin::new(seed),
            octaves: f64::from(octaves),
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn sample(&self, x: i32, y: i32) -> f64 {
        let nx = f64::from(x) / self.width * self.octaves;
        let ny = f64::from(y) / self.height * self.octaves;
        self.perlin.get([nx, ny]) * FIELD_AMPLITUDE
    }
}

/// Turns room floor into dirt wherever a fresh field reaches the threshold.
/// Corridors and walls are left alone.
pub fn place_dirt(base: &mut Grid<Terrain>, config: &GeneratorConfig, rng: &mut DungeonRng) -> usize {
    let field = NoiseField::new(rng.noise_seed(), config.dirt_octaves, base.width(), base.height());
    let mut placed = 0;
    for pos in base.positions() {
        if base.at(pos) == Some(Terrain::Floor) && field.sample(pos.x, pos.y) >= config.dirt_threshold
        {
            base.set(pos.x, pos.y, Terrain::Dirt);
            placed += 1;
        }
    }
    placed
}

pub struct OverlayContext<'a> {
    pub config: &'a GeneratorConfig,
    pub base: &'a Grid<Terrain>,
    /// Rooms eligible for the exit and for mobs; the spawn room is not among them.
    pub rooms: &'a [Rect],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayPlacement {
    pub overlay: Grid<OverlayMarker>,
    pub exit_room: Rect,
    pub mob_spawns: Vec<Pos>,
    pub flowers: usize,
}

/// Returns `None` when there is no room to hold the exit.
pub fn build_overlay(context: &OverlayContext<'_>, rng: &mut DungeonRng) -> Option<OverlayPlacement> {
    let mut overlay =
        Grid::filled(context.base.width(), context.base.height(), OverlayMarker::None);
    let flowers = place_flowers(&mut overlay, context, rng);
    let exit_room = place_exit(&mut overlay, context.rooms, rng)?;
    let mob_spawns = place_mobs(&mut overlay, context, rng);
    Some(OverlayPlacement { overlay, exit_room, mob_spawns, flowers })
}

pub fn place_flowers(
    overlay: &mut Grid<OverlayMarker>,
    context: &OverlayContext<'_>,
    rng: &mut DungeonRng,
) -> usize {
    let base = context.base;
    let field =
        NoiseField::new(rng.noise_seed(), context.config.flower_octaves, base.width(), base.height());
    let mut placed = 0;
    for pos in base.positions() {
        let open = base.at(pos).is_some_and(|terrain| terrain != Terrain::Wall);
        let free = overlay.at(pos) == Some(OverlayMarker::None);
        if open && free && field.sample(pos.x, pos.y) >= context.config.flower_threshold {
            overlay.set(pos.x, pos.y, OverlayMarker::Flower);
            placed += 1;
        }
    }
    placed
}

pub fn place_exit(
    overlay: &mut Grid<OverlayMarker>,
    rooms: &[Rect],
    rng: &mut DungeonRng,
) -> Option<Rect> {
    if rooms.is_empty() {
        return None;
    }
    let exit_room = rooms[rng.index(rooms.len())];
    let center = exit_room.center();
    overlay.set(center.x, center.y, OverlayMarker::Exit);
    Some(exit_room)
}

/// One guaranteed mob per room plus extra rolls; returns every spawn in order,
/// stacked duplicates included.
pub fn place_mobs(
    overlay: &mut Grid<OverlayMarker>,
    context: &OverlayContext<'_>,
    rng: &mut DungeonRng,
) -> Vec<Pos> {
    let config = context.config;
    let mut spawns = Vec::new();
    for room in context.rooms {
        let Some(first) = mob_point(overlay, *room, rng) else {
            continue;
        };
        spawns.push(first);
        for _ in 0..config.mob_extra_attempts {
            let roll = rng.range_inclusive_u32(1, config.mob_extra_roll_sides);
            if roll < config.mob_extra_roll_min {
                continue;
            }
            if let Some(extra) = mob_point(overlay, *room, rng) {
                spawns.push(extra);
            }
        }
    }
    for spawn in &spawns {
        overlay.set(spawn.x, spawn.y, OverlayMarker::Mob);
    }
    spawns
}

/// Random point strictly inside `room`, resampled off the exit cell.
///
/// Rooms whose interior is empty or holds only the exit fall back to any
/// other room cell, so every room of at least two cells gets a mob.
fn mob_point(overlay: &Grid<OverlayMarker>, room: Rect, rng: &mut DungeonRng) -> Option<Pos> {
    let interior = Rect::new(room.x + 1, room.y + 1, room.width - 2, room.height - 2);
    sample_off_exit(overlay, interior, rng).or_else(|| sample_off_exit(overlay, room, rng))
}

fn sample_off_exit(overlay: &Grid<OverlayMarker>, area: Rect, rng: &mut DungeonRng) -> Option<Pos> {
    if area.width < 1 || area.height < 1 {
        return None;
    }
    let (left, right) = (area.x, area.right() - 1);
    let (top, bottom) = (area.y, area.bottom() - 1);
    for _ in 0..area.area().max(8) {
        let pos = Pos { y: rng.range_inclusive(top, bottom), x: rng.range_inclusive(left, right) };
        if overlay.at(pos) != Some(OverlayMarker::Exit) {
            return Some(pos);
        }
    }
    (top..=bottom)
        .flat_map(|y| (left..=right).map(move |x| Pos { y, x }))
        .find(|&pos| overlay.at(pos) != Some(OverlayMarker::Exit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: usize, height: usize) -> Grid<Terrain> {
        let mut grid = Grid::filled(width, height, Terrain::Wall);
        for y in 1..height as i32 - 1 {
            for x in 1..width as i32 - 1 {
                grid.set(x, y, Terrain::Floor);
            }
        }
        grid
    }

    #[test]
    fn noise_field_is_reproducible_for_a_seed() {
        let left = NoiseField::new(42, 8, 64, 56);
        let right = NoiseField::new(42, 8, 64, 56);
        for (x, y) in [(0, 0), (13, 7), (63, 55), (31, 20)] {
            assert_eq!(left.sample(x, y), right.sample(x, y));
        }
    }

    #[test]
    fn dirt_only_replaces_room_floor() {
        let config = GeneratorConfig { dirt_threshold: -1.0, ..GeneratorConfig::default() };
        let mut grid = open_grid(20, 20);
        grid.set(5, 5, Terrain::Corridor);
        let mut rng = DungeonRng::from_seed(3);
        let placed = place_dirt(&mut grid, &config, &mut rng);

        assert_eq!(placed, 18 * 18 - 1);
        assert_eq!(grid.get(5, 5), Some(Terrain::Corridor));
        assert_eq!(grid.get(0, 0), Some(Terrain::Wall));
        assert_eq!(grid.get(1, 1), Some(Terrain::Dirt));
    }

    #[test]
    fn unreachable_threshold_places_nothing() {
        let config = GeneratorConfig { dirt_threshold: 2.0, ..GeneratorConfig::default() };
        let mut grid = open_grid(20, 20);
        let mut rng = DungeonRng::from_seed(3);
        assert_eq!(place_dirt(&mut grid, &config, &mut rng), 0);
    }

    #[test]
    fn flowers_stay_off_walls() {
        let config = GeneratorConfig { flower_threshold: -1.0, ..GeneratorConfig::default() };
        let base = open_grid(12, 10);
        let context = OverlayContext { config: &config, base: &base, rooms: &[] };
        let mut overlay = Grid::filled(12, 10, OverlayMarker::None);
        let mut rng = DungeonRng::from_seed(11);
        let placed = place_flowers(&mut overlay, &context, &mut rng);

        assert_eq!(placed, 10 * 8);
        assert_eq!(overlay.get(0, 4), Some(OverlayMarker::None));
        assert_eq!(overlay.get(3, 4), Some(OverlayMarker::Flower));
    }

    #[test]
    fn exit_marks_the_centre_of_a_listed_room() {
        let rooms = [Rect::new(2, 2, 8, 8), Rect::new(20, 4, 10, 7)];
        let mut overlay = Grid::filled(40, 20, OverlayMarker::None);
        let mut rng = DungeonRng::from_seed(6);
        let exit_room = place_exit(&mut overlay, &rooms, &mut rng).expect("rooms exist");
        assert!(rooms.contains(&exit_room));
        assert_eq!(overlay.at(exit_room.center()), Some(OverlayMarker::Exit));
        assert_eq!(overlay.count(|marker| marker == OverlayMarker::Exit), 1);
    }

    #[test]
    fn no_rooms_means_no_exit() {
        let mut overlay = Grid::filled(4, 4, OverlayMarker::None);
        let mut rng = DungeonRng::from_seed(6);
        assert_eq!(place_exit(&mut overlay, &[], &mut rng), None);
    }

    #[test]
    fn every_room_gets_between_one_and_three_interior_mobs() {
        let config = GeneratorConfig::default();
        let base = open_grid(64, 40);
        let rooms = [Rect::new(3, 3, 7, 7), Rect::new(20, 5, 12, 9), Rect::new(40, 20, 16, 16)];
        let context = OverlayContext { config: &config, base: &base, rooms: &rooms };
        for seed in 0..50 {
            let mut overlay = Grid::filled(64, 40, OverlayMarker::None);
            let mut rng = DungeonRng::from_seed(seed);
            let spawns = place_mobs(&mut overlay, &context, &mut rng);
            for room in &rooms {
                let inner = Rect::new(room.x + 1, room.y + 1, room.width - 2, room.height - 2);
                let count = spawns.iter().filter(|pos| room.contains(**pos)).count();
                assert!((1..=3).contains(&count), "room {room:?} got {count} mobs");
                assert!(spawns.iter().filter(|pos| room.contains(**pos)).all(|pos| inner.contains(*pos)));
            }
            for spawn in &spawns {
                assert_eq!(overlay.at(*spawn), Some(OverlayMarker::Mob));
            }
        }
    }

    #[test]
    fn mobs_never_cover_the_exit() {
        let config = GeneratorConfig {
            mob_extra_roll_min: 1,
            ..GeneratorConfig::default()
        };
        let base = open_grid(16, 16);
        let rooms = [Rect::new(4, 4, 5, 5)];
        let context = OverlayContext { config: &config, base: &base, rooms: &rooms };
        for seed in 0..100 {
            let mut rng = DungeonRng::from_seed(seed);
            let placement = build_overlay(&context, &mut rng).expect("one room exists");
            assert_eq!(placement.exit_room, rooms[0]);
            assert_eq!(placement.overlay.at(rooms[0].center()), Some(OverlayMarker::Exit));
            assert_eq!(placement.mob_spawns.len(), 3);
            assert!(placement.mob_spawns.iter().all(|pos| *pos != rooms[0].center()));
        }
    }

    #[test]
    fn rooms_without_a_free_interior_still_get_a_mob() {
        let config = GeneratorConfig::default();
        let base = open_grid(24, 16);
        let rooms = [Rect::new(2, 2, 2, 2), Rect::new(8, 3, 3, 3), Rect::new(14, 4, 2, 5)];
        let context = OverlayContext { config: &config, base: &base, rooms: &rooms };
        for seed in 0..100 {
            let mut rng = DungeonRng::from_seed(seed);
            let placement = build_overlay(&context, &mut rng).expect("rooms exist");
            let exit = placement.exit_room.center();
            for room in &rooms {
                let mobs: Vec<&Pos> =
                    placement.mob_spawns.iter().filter(|pos| room.contains(**pos)).collect();
                assert!(!mobs.is_empty(), "room {room:?} got no mob for seed {seed}");
                assert!(mobs.iter().all(|pos| **pos != exit));
                assert!(
                    mobs.iter().any(|pos| placement.overlay.at(**pos) == Some(OverlayMarker::Mob))
                );
            }
            assert_eq!(placement.overlay.at(exit), Some(OverlayMarker::Exit));
        }
    }

    #[test]
    fn three_cell_exit_room_places_its_mob_on_the_rim() {
        let config = GeneratorConfig::default();
        let base = open_grid(10, 10);
        let rooms = [Rect::new(3, 3, 3, 3)];
        let context = OverlayContext { config: &config, base: &base, rooms: &rooms };
        for seed in 0..50 {
            let mut rng = DungeonRng::from_seed(seed);
            let placement = build_overlay(&context, &mut rng).expect("one room exists");
            assert_eq!(placement.exit_room.center(), Pos { y: 4, x: 4 });
            assert!(!placement.mob_spawns.is_empty());
            for spawn in &placement.mob_spawns {
                assert!(rooms[0].contains(*spawn));
                assert_ne!(*spawn, Pos { y: 4, x: 4 });
            }
        }
    }
}

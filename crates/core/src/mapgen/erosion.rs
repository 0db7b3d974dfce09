//! Biased random-walk erosion that roughens room and corridor edges.

use crate::config::GeneratorConfig;
use crate::types::Terrain;

use super::grid::Grid;
use super::rng::DungeonRng;

/// North, east, south, west. The order fixes how a sample maps to a direction.
const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErosionSettings {
    pub trials: usize,
    pub weighting: f64,
    pub walk_min: u32,
    pub walk_max: u32,
}

impl ErosionSettings {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            trials: config.erosion_trials(),
            weighting: config.erosion_weighting,
            walk_min: config.erosion_walk_min,
            walk_max: config.erosion_walk_max,
        }
    }
}

/// Runs every erosion trial and returns how many wall cells became floor.
///
/// Walks start on open cells, only ever convert walls, and never leave the
/// interior, so the outer ring stays wall and no open cell is closed.
pub fn erode(grid: &mut Grid<Terrain>, settings: &ErosionSettings, rng: &mut DungeonRng) -> usize {
    let max_x = grid.width() as i32 - 2;
    let max_y = grid.height() as i32 - 2;
    if max_x < 1 || max_y < 1 {
        return 0;
    }

    let mut opened = 0;
    for _ in 0..settings.trials {
        let mut x = rng.range_inclusive(1, max_x);
        let mut y = rng.range_inclusive(1, max_y);
        if cell(grid, x, y) == Terrain::Wall {
            continue;
        }

        let mut weights = [1.0_f64; 4];
        for (weight, (dx, dy)) in weights.iter_mut().zip(DIRECTIONS) {
            if cell(grid, x + dx, y + dy) == Terrain::Wall {
                *weight += settings.weighting;
            }
        }

        let mut remaining = rng.range_inclusive_u32(settings.walk_min, settings.walk_max);
        while remaining > 0 {
            remaining -= 1;
            let Some((dx, dy)) = pick_direction(&weights, x, y, max_x, max_y, rng) else {
                break;
            };
            x += dx;
            y += dy;
            if cell(grid, x, y) != Terrain::Wall {
                break;
            }
            grid.set(x, y, Terrain::Floor);
            opened += 1;
        }
    }
    opened
}

/// Out-of-bounds lookups read as wall, the rock that continues past the edge.
fn cell(grid: &Grid<Terrain>, x: i32, y: i32) -> Terrain {
    grid.get(x, y).unwrap_or(Terrain::Wall)
}

/// Samples a step from the normalized weights of the directions that stay
/// inside `[1, max]` on both axes.
fn pick_direction(
    weights: &[f64; 4],
    x: i32,
    y: i32,
    max_x: i32,
    max_y: i32,
    rng: &mut DungeonRng,
) -> Option<(i32, i32)> {
    let allowed = DIRECTIONS.map(|(dx, dy)| {
        let (nx, ny) = (x + dx, y + dy);
        nx >= 1 && ny >= 1 && nx <= max_x && ny <= max_y
    });
    let total: f64 = weights.iter().zip(allowed).filter(|&(_, ok)| ok).map(|(w, _)| w).sum();
    if total <= 0.0 {
        return None;
    }

    let mut roll = rng.unit_f64() * total;
    let mut fallback = None;
    for ((weight, direction), ok) in weights.iter().zip(DIRECTIONS).zip(allowed) {
        if !ok {
            continue;
        }
        if roll < *weight {
            return Some(direction);
        }
        roll -= weight;
        fallback = Some(direction);
    }
    fallback
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn settings(trials: usize) -> ErosionSettings {
        ErosionSettings { trials, weighting: 0.2, walk_min: 1, walk_max: 3 }
    }

    fn room_grid() -> Grid<Terrain> {
        let mut grid = Grid::filled(30, 24, Terrain::Wall);
        for y in 8..16 {
            for x in 10..20 {
                grid.set(x, y, Terrain::Floor);
            }
        }
        for x in 1..10 {
            grid.set(x, 12, Terrain::Corridor);
        }
        grid
    }

    #[test]
    fn all_wall_grid_is_never_eroded() {
        let mut grid = Grid::filled(20, 20, Terrain::Wall);
        let mut rng = DungeonRng::from_seed(1);
        assert_eq!(erode(&mut grid, &settings(500), &mut rng), 0);
        assert_eq!(grid.count(|cell| cell != Terrain::Wall), 0);
    }

    #[test]
    fn erosion_only_adds_floor() {
        let before = room_grid();
        let mut after = before.clone();
        let mut rng = DungeonRng::from_seed(21);
        let opened = erode(&mut after, &settings(2_000), &mut rng);

        assert!(opened > 0, "a room this size should be eroded");
        for pos in before.positions() {
            match before.at(pos) {
                Some(Terrain::Wall) => {
                    assert!(matches!(after.at(pos), Some(Terrain::Wall | Terrain::Floor)));
                }
                original => assert_eq!(after.at(pos), original, "open cell changed at {pos:?}"),
            }
        }
        let newly_open = after.count(|cell| cell != Terrain::Wall)
            - before.count(|cell| cell != Terrain::Wall);
        assert_eq!(newly_open, opened);
    }

    #[test]
    fn direction_sampling_skips_moves_out_of_the_interior() {
        let mut rng = DungeonRng::from_seed(8);
        for _ in 0..200 {
            let (dx, dy) =
                pick_direction(&[1.0; 4], 1, 1, 5, 5, &mut rng).expect("two directions remain");
            assert!((dx, dy) == (1, 0) || (dx, dy) == (0, 1));
        }
    }

    #[test]
    fn single_interior_cell_has_nowhere_to_go() {
        let mut rng = DungeonRng::from_seed(8);
        assert_eq!(pick_direction(&[1.0; 4], 1, 1, 1, 1, &mut rng), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn outer_ring_survives_erosion(seed in any::<u64>()) {
            let mut grid = room_grid();
            let mut rng = DungeonRng::from_seed(seed);
            erode(&mut grid, &settings(3_000), &mut rng);
            let (width, height) = (grid.width() as i32, grid.height() as i32);
            for x in 0..width {
                prop_assert_eq!(grid.get(x, 0), Some(Terrain::Wall));
                prop_assert_eq!(grid.get(x, height - 1), Some(Terrain::Wall));
            }
            for y in 0..height {
                prop_assert_eq!(grid.get(0, y), Some(Terrain::Wall));
                prop_assert_eq!(grid.get(width - 1, y), Some(Terrain::Wall));
            }
        }
    }
}

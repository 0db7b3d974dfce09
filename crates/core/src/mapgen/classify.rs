//! 8-neighbor autotile classification of the frozen base grid.

use crate::types::{Terrain, TileKind};

use super::grid::Grid;

/// Bit weights: nw, n, ne, w, e, sw, s, se.
const NW: u8 = 1;
const N: u8 = 2;
const NE: u8 = 4;
const W: u8 = 8;
const E: u8 = 16;
const SW: u8 = 32;
const S: u8 = 64;
const SE: u8 = 128;

/// Reads `base` and writes every cell's classified tile into a new grid.
pub fn classify(base: &Grid<Terrain>) -> Grid<TileKind> {
    base.map(|pos, terrain| match terrain {
        Terrain::Wall => TileKind::Wall(autotile_mask(base, pos.x, pos.y, Terrain::Wall)),
        Terrain::Dirt => TileKind::Dirt(autotile_mask(base, pos.x, pos.y, Terrain::Dirt)),
        Terrain::Floor => TileKind::Floor,
        Terrain::Corridor => TileKind::Corridor,
    })
}

/// Neighbor mask for the cell at `(x, y)` against `category`.
///
/// A diagonal bit is only set when both adjacent cardinals match as well.
/// Cells past the grid edge count as matching.
pub fn autotile_mask(grid: &Grid<Terrain>, x: i32, y: i32, category: Terrain) -> u8 {
    let matches = |dx: i32, dy: i32| grid.get(x + dx, y + dy).is_none_or(|cell| cell == category);

    let n = matches(0, -1);
    let s = matches(0, 1);
    let w = matches(-1, 0);
    let e = matches(1, 0);
    let nw = n && w && matches(-1, -1);
    let ne = n && e && matches(1, -1);
    let sw = s && w && matches(-1, 1);
    let se = s && e && matches(1, 1);

    [(nw, NW), (n, N), (ne, NE), (w, W), (e, E), (sw, SW), (s, S), (se, SE)]
        .into_iter()
        .filter(|&(set, _)| set)
        .fold(0, |mask, (_, bit)| mask | bit)
}
